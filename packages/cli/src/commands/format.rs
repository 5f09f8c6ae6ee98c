use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailblocks_common::{to_json, try_from_json};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Block document to rewrite in canonical form
    pub input: PathBuf,

    /// Write compact single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Print to stdout instead of rewriting the file
    #[arg(long)]
    pub stdout: bool,
}

pub fn format(args: FormatArgs, cwd: &str) -> Result<()> {
    let input = if args.input.is_absolute() {
        args.input.clone()
    } else {
        PathBuf::from(cwd).join(&args.input)
    };

    let source = fs::read_to_string(&input)?;
    let blocks = try_from_json(&source).map_err(|e| anyhow!("{}: {}", input.display(), e))?;
    let formatted = to_json(&blocks, !args.compact);

    if args.stdout {
        println!("{}", formatted);
    } else {
        fs::write(&input, format!("{}\n", formatted))?;
        println!(
            "  {} {} ({} blocks)",
            "✓".green(),
            input.display(),
            blocks.len()
        );
    }

    Ok(())
}
