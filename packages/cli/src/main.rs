mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{format, render, FormatArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Mailblocks CLI - render block documents to email HTML
#[derive(Parser, Debug)]
#[command(name = "mailblocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a block document to an HTML email
    Render(RenderArgs),

    /// Rewrite a block document as canonical JSON
    Format(FormatArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Render(args) => render(args, &cwd),
        Command::Format(args) => format(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
