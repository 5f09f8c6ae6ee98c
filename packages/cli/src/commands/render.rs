use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailblocks_common::{try_from_json, StyleStore};
use mailblocks_compiler_html::{export_html, normalize_lists, serialize_styled};
use mailblocks_editor::EditSession;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Block document (JSON array of blocks)
    pub input: PathBuf,

    /// Output file (defaults to the input path with an .html extension)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Document title (overrides config)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Content max width in pixels (overrides config)
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Emit only the HTML fragment, without the document shell
    #[arg(long)]
    pub fragment: bool,

    /// Saved style store (email styles + per-block overrides); replaces the
    /// config's email styles
    #[arg(short, long)]
    pub styles: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = resolve(cwd, &args.input);
    let styles = args.styles.as_deref().map(|path| resolve(cwd, path));

    let output = render_file(&input, styles.as_deref(), &args, &config)?;

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let output_file = match &args.out {
        Some(out) => resolve(cwd, out),
        None => input.with_extension("html"),
    };

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        input.display(),
        output_file.display()
    );

    Ok(())
}

fn render_file(
    input: &Path,
    styles_file: Option<&Path>,
    args: &RenderArgs,
    config: &Config,
) -> Result<String> {
    let source = fs::read_to_string(input)
        .map_err(|e| anyhow!("Cannot read {}: {}", input.display(), e))?;

    let blocks = try_from_json(&source).map_err(|e| anyhow!("{}: {}", input.display(), e))?;
    let session = EditSession::with_blocks(input.display().to_string(), blocks)?;

    tracing::debug!(blocks = session.blocks().len(), "Loaded block document");

    let styles = match styles_file {
        Some(path) => load_styles(path)?,
        None => StyleStore::with_email_styles(config.email_styles.clone()),
    };

    if args.fragment {
        let fragment = serialize_styled(session.blocks(), &styles);
        return Ok(normalize_lists(&fragment)?);
    }

    let options = config.document_options_for(
        styles.email_styles(),
        args.title.as_deref(),
        args.max_width,
    );
    Ok(export_html(session.blocks(), &styles, &options)?)
}

fn load_styles(path: &Path) -> Result<StyleStore> {
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    let styles =
        StyleStore::try_from_json(&source).map_err(|e| anyhow!("{}: {}", path.display(), e))?;

    tracing::debug!(
        path = %path.display(),
        overrides = styles.override_count(),
        "Loaded saved styles"
    );
    Ok(styles)
}

fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_common::{BlockStyleKey, EmailStyleKey};

    fn args(input: PathBuf) -> RenderArgs {
        RenderArgs {
            input,
            out: None,
            stdout: false,
            title: None,
            max_width: None,
            fragment: false,
            styles: None,
        }
    }

    #[test]
    fn test_render_writes_html_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("welcome.json");
        fs::write(
            &input,
            r#"[{"id":"h","type":"heading","content":"Welcome"},{"id":"d","type":"divider"}]"#,
        )
        .unwrap();

        render(args(input), dir.path().to_str().unwrap()).unwrap();

        let html = fs::read_to_string(dir.path().join("welcome.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(">Welcome</h2>"));
        assert!(html.contains("<hr"));
    }

    #[test]
    fn test_render_fragment_with_title_flag_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.json");
        fs::write(&input, r#"[{"id":"t","type":"text","content":"Hi"}]"#).unwrap();

        let mut render_args = args(input.clone());
        render_args.fragment = true;
        render_args.title = Some("Ignored".to_string());

        let output = render_file(&input, None, &render_args, &Config::default()).unwrap();
        assert!(output.starts_with("<p style="));
        assert!(!output.contains("<title>"));
    }

    #[test]
    fn test_render_rejects_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"{"not":"a list"}"#).unwrap();

        let err = render_file(&input, None, &args(input.clone()), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Malformed input"));
    }

    #[test]
    fn test_render_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dup.json");
        fs::write(
            &input,
            r#"[{"id":"x","type":"divider"},{"id":"x","type":"divider"}]"#,
        )
        .unwrap();

        assert!(render_file(&input, None, &args(input.clone()), &Config::default()).is_err());
    }

    #[test]
    fn test_render_applies_saved_styles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        fs::write(&input, r#"[{"id":"t","type":"text","content":"Hi"}]"#).unwrap();

        let mut saved = StyleStore::new();
        saved.update_block_style("t", BlockStyleKey::TextAlign, "right");
        saved.update_email_style(EmailStyleKey::BackgroundColor, "#123456");
        let styles_path = dir.path().join("doc.styles.json");
        fs::write(&styles_path, saved.to_json(true)).unwrap();

        let mut render_args = args(input.clone());
        render_args.styles = Some(PathBuf::from("doc.styles.json"));
        render(render_args, dir.path().to_str().unwrap()).unwrap();

        let html = fs::read_to_string(dir.path().join("doc.html")).unwrap();
        assert!(html.contains("text-align: right;"));
        assert!(html.contains("background-color: #123456;"));
    }

    #[test]
    fn test_render_rejects_malformed_styles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        fs::write(&input, "[]").unwrap();
        let styles_path = dir.path().join("bad.styles.json");
        fs::write(&styles_path, "[1, 2]").unwrap();

        let result = render_file(
            &input,
            Some(&styles_path),
            &args(input.clone()),
            &Config::default(),
        );
        assert!(result.is_err());
    }
}
