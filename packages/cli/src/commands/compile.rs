use crate::config::Config;
use crate::manifest::load_registry;
use crate::pages::{find_page_files, load_page};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use ns_compiler_css::render_stylesheet;
use ns_contract::{CompileInput, CompileOptions, CompileOutput, ContractCompiler};
use ns_model::TokenSource;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Also write a stylesheet rendered from the style contract
    #[arg(long)]
    pub css: bool,
}

pub fn compile(args: CompileArgs, cwd: &Path) -> Result<()> {
    let root = cwd.join(&args.path);
    let config = Config::load(&root)?;

    let tokens = read_json(&root.join(&config.tokens))?;
    let tokens = TokenSource::from_value(&tokens)
        .with_context(|| format!("Invalid token source {}", config.tokens))?;
    let registry = load_registry(&root.join(&config.components))?;
    let text_styles = match &config.text_styles {
        Some(path) => match read_json(&root.join(path))? {
            Value::Object(styles) => Some(styles),
            other => return Err(anyhow!("{} must hold an object, found {}", path, ns_model::json_kind(&other))),
        },
        None => None,
    };
    let variables = config
        .variables
        .as_ref()
        .map(|path| read_json(&root.join(path)))
        .transpose()?;

    let pages_dir = root.join(&config.pages_dir);
    if !pages_dir.exists() {
        return Err(anyhow!("Pages directory does not exist: {:?}", pages_dir));
    }
    let page_files = find_page_files(&pages_dir);
    if page_files.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
    }

    if !args.stdout {
        println!("{}", "🔨 Compiling contracts...".bright_blue().bold());
        println!("Found {} pages, {} components", page_files.len(), registry.len());
    }

    let pages = page_files
        .iter()
        .map(|path| load_page(path))
        .collect::<Result<Vec<_>>>()?;

    let options = CompileOptions {
        breakpoints: config.breakpoints.clone(),
        css_prefix: config.css_prefix.clone(),
        include_hash: config.include_hash,
        ..Default::default()
    };
    let input = CompileInput {
        tokens,
        pages,
        text_styles,
        variables,
    };
    let output = ContractCompiler::new(&registry, options).compile(&input)?;

    if args.stdout {
        let bundle = json!({
            "layout": output.layout,
            "style": output.style,
            "registry": output.registry,
        });
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    let out_dir = root.join(args.out_dir.as_deref().unwrap_or(&config.out_dir));
    fs::create_dir_all(&out_dir)?;

    write_file(&out_dir.join("layout.json"), &output.layout.to_json_pretty()?)?;
    write_file(&out_dir.join("style.json"), &output.style.to_json_pretty()?)?;
    write_file(&out_dir.join("registry.json"), &output.registry.to_json_pretty()?)?;
    if args.css {
        write_file(&out_dir.join("styles.css"), &stylesheet(&output, &config.css_prefix))?;
    }

    print_report(&output);
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))?;
    println!("  {} {}", "✓".green(), path.display());
    Ok(())
}

/// `:root` variables followed by the per-slot rules
fn stylesheet(output: &CompileOutput, prefix: &str) -> String {
    let style = &output.style.payload;
    let mut css = String::from(":root {\n");
    for (name, value) in &style.css_variables {
        if let Some(value) = value.as_str() {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
    }
    css.push_str("}\n\n");
    css.push_str(&render_stylesheet(&style.components.styles, &style.breakpoints, prefix));
    css
}

fn print_report(output: &CompileOutput) {
    let report = &output.report;

    println!();
    println!("   Pages:  {}", report.pages);
    println!("   Nodes:  {}", report.nodes);
    println!("   Styled: {}", report.styled_nodes);

    for failure in &report.style_failures {
        println!(
            "   {} {} at {}: {}",
            "⚠️".yellow(),
            failure.node_id,
            failure.breakpoint,
            failure.message
        );
    }
    for collision in &report.id_collisions {
        println!(
            "   {} Node {} in {} overwrote {}",
            "⚠️".yellow(),
            collision.node_id,
            collision.page,
            collision.previous_page
        );
    }

    println!();
    if report.style_failures.is_empty() && report.id_collisions.is_empty() {
        println!("{} Contracts compiled successfully", "✅".green());
    } else {
        println!(
            "{} Contracts compiled with {} style failures, {} id collisions",
            "⚠️".yellow(),
            report.style_failures.len(),
            report.id_collisions.len()
        );
    }
}
