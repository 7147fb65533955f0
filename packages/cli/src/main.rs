mod commands;
mod config;
mod declarative;
mod manifest;
mod pages;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, init, validate, CompileArgs, InitArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Compiles editor pages into layout, style and registry contracts
#[derive(Parser, Debug)]
#[command(name = "nsc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log per-node decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config and a starter project
    Init(InitArgs),

    /// Compile pages into contracts
    Compile(CompileArgs),

    /// Check a layout contract
    Validate(ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Compile(args) => compile(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
