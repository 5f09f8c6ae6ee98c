use crate::list_normalizer::normalize_lists;
use mailblocks_common::{sanitize_css_value, Block, BlockContent, BlockStyles, EmailStyles, StyleStore};
use thiserror::Error;
use tracing::{debug, instrument};

const BUTTON_STYLE: &str = "display: inline-block; padding: 12px 24px; background-color: #2563eb; \
color: #ffffff; text-decoration: none; border-radius: 6px; font-weight: 600;";

const DIVIDER_STYLE: &str = "border: none; border-top: 1px solid #e5e7eb; margin: 24px 0;";

const DEFAULT_BUTTON_TEXT: &str = "Click here";

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Options for wrapping a fragment into a standalone email document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    /// Document `<title>`
    pub title: String,
    /// Page background behind the content container
    pub background_color: String,
    /// Background of the centered content container
    pub content_background_color: String,
    /// Container max width in pixels
    pub max_width: u32,
    /// Email-wide typography, padding and border (when styled)
    pub email_styles: Option<EmailStyles>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "Email Template".to_string(),
            background_color: "#f3f4f6".to_string(),
            content_background_color: "#ffffff".to_string(),
            max_width: 600,
            email_styles: None,
        }
    }
}

impl DocumentOptions {
    /// Take colors and container styling from an email style record
    pub fn from_email_styles(styles: &EmailStyles) -> Self {
        Self {
            background_color: styles.background_color.clone(),
            content_background_color: styles.content_background_color.clone(),
            email_styles: Some(styles.clone()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }
}

struct Context {
    depth: usize,
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.add("  ");
        }
        self.add(text);
        self.add("\n");
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize blocks to an HTML fragment, one element per line.
///
/// Unknown block kinds contribute nothing.
pub fn serialize(blocks: &[Block]) -> String {
    join_elements(blocks.iter().map(|block| compile_block(block, None)))
}

/// Like [`serialize`], with each element's resolved styles inlined
pub fn serialize_styled(blocks: &[Block], styles: &StyleStore) -> String {
    join_elements(
        blocks
            .iter()
            .map(|block| compile_block(block, Some(styles))),
    )
}

fn join_elements(elements: impl Iterator<Item = String>) -> String {
    elements
        .filter(|element| !element.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn compile_block(block: &Block, styles: Option<&StyleStore>) -> String {
    match &block.content {
        BlockContent::Text(text) => format!(
            "<p{}>{}</p>",
            style_attribute(styles.map(|s| s.resolve(block).to_css())),
            escape_html(text)
        ),

        BlockContent::Heading(text) => format!(
            "<h2{}>{}</h2>",
            style_attribute(styles.map(|s| s.resolve(block).to_css())),
            escape_html(text)
        ),

        BlockContent::Image(image) => format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_html(&image.src),
            escape_html(&image.alt),
            style_attribute(styles.map(|s| explicit_styles(block, s).to_css()))
        ),

        BlockContent::Button(button) => {
            let url = button.url.as_deref().filter(|url| !url.is_empty()).unwrap_or("#");
            let text = button
                .text
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(DEFAULT_BUTTON_TEXT);
            format!(
                "<a href=\"{}\" style=\"{}\">{}</a>",
                escape_html(url),
                escape_html(&extend_style(BUTTON_STYLE, block, styles)),
                escape_html(text)
            )
        }

        BlockContent::Divider => format!(
            "<hr style=\"{}\" />",
            escape_html(&extend_style(DIVIDER_STYLE, block, styles))
        ),

        BlockContent::Unknown { kind, .. } => {
            debug!(block_id = %block.id, kind = %kind, "Skipping unknown block kind");
            String::new()
        }
    }
}

/// Only what the author set on the block, without kind defaults
fn explicit_styles(block: &Block, styles: &StyleStore) -> BlockStyles {
    let local = block.styles.clone().unwrap_or_default();
    match styles.block_override(&block.id) {
        Some(overrides) => overrides.merged_over(&local),
        None => local,
    }
}

fn extend_style(base: &str, block: &Block, styles: Option<&StyleStore>) -> String {
    let extra = styles
        .map(|s| explicit_styles(block, s).to_css())
        .unwrap_or_default();
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, extra)
    }
}

fn style_attribute(css: Option<String>) -> String {
    match css {
        Some(css) if !css.is_empty() => format!(" style=\"{}\"", escape_html(&css)),
        _ => String::new(),
    }
}

/// Wrap a fragment into a complete HTML email document
pub fn wrap_as_document(fragment: &str, options: &DocumentOptions) -> String {
    let mut ctx = Context::new();

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(options, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<div class=\"email-container\">");

    if !fragment.is_empty() {
        ctx.add(fragment);
        if !fragment.ends_with('\n') {
            ctx.add("\n");
        }
    }

    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn compile_head(options: &DocumentOptions, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&options.title)));

    ctx.add_line("<style>");
    ctx.indent();

    let mut body = vec![
        "margin: 0;".to_string(),
        "padding: 0;".to_string(),
        format!(
            "background-color: {};",
            sanitize_css_value(&options.background_color)
        ),
    ];
    let mut container = vec![
        format!("max-width: {}px;", options.max_width),
        "margin: 0 auto;".to_string(),
        format!(
            "background-color: {};",
            sanitize_css_value(&options.content_background_color)
        ),
    ];

    if let Some(email) = &options.email_styles {
        body.push(format!("font-family: {};", sanitize_css_value(&email.font_stack())));
        body.push(format!("color: {};", sanitize_css_value(&email.body_color)));
        container[1] = format!("margin: {};", sanitize_css_value(&email.margin()));
        container.push(format!("padding: {};", sanitize_css_value(&email.padding())));
        container.push(format!("border-radius: {};", sanitize_css_value(&email.radius)));
        container.push(format!(
            "border: {} solid {};",
            sanitize_css_value(&email.border_width),
            sanitize_css_value(&email.border_color)
        ));
    }

    ctx.add_line(&format!("body {{ {} }}", body.join(" ")));
    ctx.add_line(&format!(".email-container {{ {} }}", container.join(" ")));

    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Full export pipeline: styled fragment, list renormalization, document shell
#[instrument(skip_all, fields(blocks = blocks.len()))]
pub fn export_html(
    blocks: &[Block],
    styles: &StyleStore,
    options: &DocumentOptions,
) -> Result<String, CompileError> {
    let fragment = serialize_styled(blocks, styles);
    let fragment = normalize_lists(&fragment)?;
    let document = wrap_as_document(&fragment, options);
    debug!(bytes = document.len(), "Exported email document");
    Ok(document)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
