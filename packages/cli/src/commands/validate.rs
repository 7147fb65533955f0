use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use ns_validator::{validate as validate_layout, Diagnostic, DiagnosticLevel};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Layout contract to check
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.input);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let report = validate_layout(&document);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("🔍 {} {}", "Validating".green().bold(), path.display());
        println!();
        for diagnostic in report.errors.iter().chain(&report.warnings) {
            print_diagnostic(diagnostic);
        }
        println!();
        if report.valid && report.warnings.is_empty() {
            println!("   {} No issues found!", "✓".green());
        } else {
            println!(
                "   {} {}   {} {}",
                "Errors:".red(),
                report.errors.len(),
                "Warnings:".yellow(),
                report.warnings.len()
            );
        }
    }

    if !report.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let level = match diagnostic.level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
    };
    println!(
        "  {}[{}]: {}",
        level,
        diagnostic.rule,
        diagnostic.message
    );
    if !diagnostic.path.is_empty() {
        println!("    {} {}", "-->".blue(), diagnostic.path);
    }
}
