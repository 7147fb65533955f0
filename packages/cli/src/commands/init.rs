use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing project...".bright_blue().bold());

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        ..Default::default()
    };

    let pages_dir = cwd.join(&config.pages_dir);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), config.pages_dir);
    }

    write_if_missing(
        &cwd.join(&config.tokens),
        &json!({
            "colors": { "primary": { "value": "#3366FF" } },
            "spacing": {
                "sm": { "value": 8, "unit": "px" },
                "lg": { "value": 24, "unit": "px" }
            }
        }),
    )?;
    write_if_missing(
        &cwd.join(&config.components),
        &json!([{
            "id": "Stack",
            "props": [{ "name": "gap", "type": "space" }],
            "slots": [{ "name": "Root" }],
            "styles": { "slots": { "Root": { "display": "flex", "gap": "{gap}" } } }
        }]),
    )?;
    write_if_missing(
        &pages_dir.join("home.json"),
        &json!({
            "name": "Home",
            "entry": {
                "type": "Stack",
                "props": {
                    "id": "stack-1",
                    "gap": { "$res": true, "xl": { "tokenId": "lg" }, "xs": { "tokenId": "sm" } }
                }
            }
        }),
    )?;

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/home.json", config.pages_dir);
    println!("  2. Run: nsc compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

fn write_if_missing(path: &Path, content: &serde_json::Value) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, serde_json::to_string_pretty(content)?)?;
    println!("  {} Created {}", "✓".green(), path.display());
    Ok(())
}
