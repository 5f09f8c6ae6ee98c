//! # Style Records
//!
//! Two flat records drive all visual styling:
//!
//! - [`BlockStyles`]: sparse, every field optional. Used both as a block's
//!   override and, fully populated, as a resolved style.
//! - [`EmailStyles`]: the email container, always fully populated.
//!
//! Values are kept as CSS value strings. Merging is field-level: setting
//! `font_size` never touches `color`.

use crate::block::BlockContent;
use serde::{Deserialize, Serialize};

/// Per-block style record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Addressable field of [`BlockStyles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockStyleKey {
    TextAlign,
    BorderRadius,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    BackgroundColor,
    FontSize,
    LineHeight,
    Color,
}

impl BlockStyleKey {
    /// Every key, in CSS emission order
    pub const ALL: [BlockStyleKey; 14] = [
        BlockStyleKey::TextAlign,
        BlockStyleKey::FontSize,
        BlockStyleKey::LineHeight,
        BlockStyleKey::Color,
        BlockStyleKey::BackgroundColor,
        BlockStyleKey::BorderRadius,
        BlockStyleKey::PaddingTop,
        BlockStyleKey::PaddingRight,
        BlockStyleKey::PaddingBottom,
        BlockStyleKey::PaddingLeft,
        BlockStyleKey::MarginTop,
        BlockStyleKey::MarginRight,
        BlockStyleKey::MarginBottom,
        BlockStyleKey::MarginLeft,
    ];

    pub fn css_property(self) -> &'static str {
        match self {
            BlockStyleKey::TextAlign => "text-align",
            BlockStyleKey::BorderRadius => "border-radius",
            BlockStyleKey::PaddingTop => "padding-top",
            BlockStyleKey::PaddingRight => "padding-right",
            BlockStyleKey::PaddingBottom => "padding-bottom",
            BlockStyleKey::PaddingLeft => "padding-left",
            BlockStyleKey::MarginTop => "margin-top",
            BlockStyleKey::MarginRight => "margin-right",
            BlockStyleKey::MarginBottom => "margin-bottom",
            BlockStyleKey::MarginLeft => "margin-left",
            BlockStyleKey::BackgroundColor => "background-color",
            BlockStyleKey::FontSize => "font-size",
            BlockStyleKey::LineHeight => "line-height",
            BlockStyleKey::Color => "color",
        }
    }
}

impl BlockStyles {
    fn slot(&self, key: BlockStyleKey) -> &Option<String> {
        match key {
            BlockStyleKey::TextAlign => &self.text_align,
            BlockStyleKey::BorderRadius => &self.border_radius,
            BlockStyleKey::PaddingTop => &self.padding_top,
            BlockStyleKey::PaddingRight => &self.padding_right,
            BlockStyleKey::PaddingBottom => &self.padding_bottom,
            BlockStyleKey::PaddingLeft => &self.padding_left,
            BlockStyleKey::MarginTop => &self.margin_top,
            BlockStyleKey::MarginRight => &self.margin_right,
            BlockStyleKey::MarginBottom => &self.margin_bottom,
            BlockStyleKey::MarginLeft => &self.margin_left,
            BlockStyleKey::BackgroundColor => &self.background_color,
            BlockStyleKey::FontSize => &self.font_size,
            BlockStyleKey::LineHeight => &self.line_height,
            BlockStyleKey::Color => &self.color,
        }
    }

    fn slot_mut(&mut self, key: BlockStyleKey) -> &mut Option<String> {
        match key {
            BlockStyleKey::TextAlign => &mut self.text_align,
            BlockStyleKey::BorderRadius => &mut self.border_radius,
            BlockStyleKey::PaddingTop => &mut self.padding_top,
            BlockStyleKey::PaddingRight => &mut self.padding_right,
            BlockStyleKey::PaddingBottom => &mut self.padding_bottom,
            BlockStyleKey::PaddingLeft => &mut self.padding_left,
            BlockStyleKey::MarginTop => &mut self.margin_top,
            BlockStyleKey::MarginRight => &mut self.margin_right,
            BlockStyleKey::MarginBottom => &mut self.margin_bottom,
            BlockStyleKey::MarginLeft => &mut self.margin_left,
            BlockStyleKey::BackgroundColor => &mut self.background_color,
            BlockStyleKey::FontSize => &mut self.font_size,
            BlockStyleKey::LineHeight => &mut self.line_height,
            BlockStyleKey::Color => &mut self.color,
        }
    }

    pub fn get(&self, key: BlockStyleKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn set(&mut self, key: BlockStyleKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    pub fn unset(&mut self, key: BlockStyleKey) {
        *self.slot_mut(key) = None;
    }

    /// Builder-style setter
    pub fn with(mut self, key: BlockStyleKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        BlockStyleKey::ALL.iter().all(|key| self.slot(*key).is_none())
    }

    /// Field-level merge: fields set on `self` win, the rest come from `base`
    pub fn merged_over(&self, base: &BlockStyles) -> BlockStyles {
        let mut merged = base.clone();
        for key in BlockStyleKey::ALL {
            if let Some(value) = self.slot(key) {
                *merged.slot_mut(key) = Some(value.clone());
            }
        }
        merged
    }

    /// Inline CSS declarations for the set fields (`prop: value;` joined by spaces)
    pub fn to_css(&self) -> String {
        BlockStyleKey::ALL
            .iter()
            .filter_map(|key| {
                self.get(*key).map(|value| {
                    format!("{}: {};", key.css_property(), sanitize_css_value(value))
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Strip characters that could end a declaration, a rule or the enclosing markup
pub fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Email container style record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailStyles {
    pub font_family: String,
    pub font_fallback: String,
    pub padding_top: String,
    pub padding_right: String,
    pub padding_bottom: String,
    pub padding_left: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub body_color: String,
    pub background_color: String,
    pub content_background_color: String,
    pub radius: String,
    pub border_width: String,
    pub border_color: String,
}

/// Addressable field of [`EmailStyles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmailStyleKey {
    FontFamily,
    FontFallback,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    BodyColor,
    BackgroundColor,
    ContentBackgroundColor,
    Radius,
    BorderWidth,
    BorderColor,
}

impl Default for EmailStyles {
    fn default() -> Self {
        crate::defaults::email_styles()
    }
}

impl EmailStyles {
    fn slot_mut(&mut self, key: EmailStyleKey) -> &mut String {
        match key {
            EmailStyleKey::FontFamily => &mut self.font_family,
            EmailStyleKey::FontFallback => &mut self.font_fallback,
            EmailStyleKey::PaddingTop => &mut self.padding_top,
            EmailStyleKey::PaddingRight => &mut self.padding_right,
            EmailStyleKey::PaddingBottom => &mut self.padding_bottom,
            EmailStyleKey::PaddingLeft => &mut self.padding_left,
            EmailStyleKey::MarginTop => &mut self.margin_top,
            EmailStyleKey::MarginRight => &mut self.margin_right,
            EmailStyleKey::MarginBottom => &mut self.margin_bottom,
            EmailStyleKey::MarginLeft => &mut self.margin_left,
            EmailStyleKey::BodyColor => &mut self.body_color,
            EmailStyleKey::BackgroundColor => &mut self.background_color,
            EmailStyleKey::ContentBackgroundColor => &mut self.content_background_color,
            EmailStyleKey::Radius => &mut self.radius,
            EmailStyleKey::BorderWidth => &mut self.border_width,
            EmailStyleKey::BorderColor => &mut self.border_color,
        }
    }

    pub fn get(&self, key: EmailStyleKey) -> &str {
        match key {
            EmailStyleKey::FontFamily => &self.font_family,
            EmailStyleKey::FontFallback => &self.font_fallback,
            EmailStyleKey::PaddingTop => &self.padding_top,
            EmailStyleKey::PaddingRight => &self.padding_right,
            EmailStyleKey::PaddingBottom => &self.padding_bottom,
            EmailStyleKey::PaddingLeft => &self.padding_left,
            EmailStyleKey::MarginTop => &self.margin_top,
            EmailStyleKey::MarginRight => &self.margin_right,
            EmailStyleKey::MarginBottom => &self.margin_bottom,
            EmailStyleKey::MarginLeft => &self.margin_left,
            EmailStyleKey::BodyColor => &self.body_color,
            EmailStyleKey::BackgroundColor => &self.background_color,
            EmailStyleKey::ContentBackgroundColor => &self.content_background_color,
            EmailStyleKey::Radius => &self.radius,
            EmailStyleKey::BorderWidth => &self.border_width,
            EmailStyleKey::BorderColor => &self.border_color,
        }
    }

    pub fn set(&mut self, key: EmailStyleKey, value: impl Into<String>) {
        *self.slot_mut(key) = value.into();
    }

    /// `font-family` value: the family followed by its fallback stack
    pub fn font_stack(&self) -> String {
        match (self.font_family.trim(), self.font_fallback.trim()) {
            ("", fallback) => fallback.to_string(),
            (family, "") => family.to_string(),
            (family, fallback) => format!("{}, {}", family, fallback),
        }
    }

    pub fn padding(&self) -> String {
        format!(
            "{} {} {} {}",
            self.padding_top, self.padding_right, self.padding_bottom, self.padding_left
        )
    }

    pub fn margin(&self) -> String {
        format!(
            "{} {} {} {}",
            self.margin_top, self.margin_right, self.margin_bottom, self.margin_left
        )
    }
}

/// Key into the block default tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    OrderedList,
    UnorderedList,
}

impl StyleKind {
    /// Default table used for a block's content.
    ///
    /// Headings render as `<h2>`, so they resolve against the level 2 table.
    pub fn for_content(content: &BlockContent) -> Self {
        match content {
            BlockContent::Heading(_) => StyleKind::Heading2,
            _ => StyleKind::Paragraph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_field_level() {
        let base = BlockStyles::default()
            .with(BlockStyleKey::FontSize, "16px")
            .with(BlockStyleKey::Color, "#000000");
        let over = BlockStyles::default().with(BlockStyleKey::FontSize, "20px");

        let merged = over.merged_over(&base);
        assert_eq!(merged.font_size.as_deref(), Some("20px"));
        assert_eq!(merged.color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_to_css_skips_unset_fields() {
        let styles = BlockStyles::default()
            .with(BlockStyleKey::TextAlign, "center")
            .with(BlockStyleKey::Color, "#111827");
        assert_eq!(styles.to_css(), "text-align: center; color: #111827;");
        assert_eq!(BlockStyles::default().to_css(), "");
    }

    #[test]
    fn test_to_css_cannot_smuggle_declarations() {
        let styles = BlockStyles::default().with(BlockStyleKey::Color, "red; position: fixed");
        assert_eq!(styles.to_css(), "color: red position: fixed;");
        assert_eq!(sanitize_css_value("</style><script>"), "/stylescript");
    }

    #[test]
    fn test_unset_and_is_empty() {
        let mut styles = BlockStyles::default().with(BlockStyleKey::MarginTop, "4px");
        assert!(!styles.is_empty());
        styles.unset(BlockStyleKey::MarginTop);
        assert!(styles.is_empty());
    }

    #[test]
    fn test_block_styles_camel_case_json() {
        let styles = BlockStyles::default().with(BlockStyleKey::BackgroundColor, "#fff");
        let json = serde_json::to_string(&styles).unwrap();
        assert_eq!(json, r##"{"backgroundColor":"#fff"}"##);
    }

    #[test]
    fn test_email_styles_partial_json_fills_defaults() {
        let styles: EmailStyles = serde_json::from_str(r#"{"fontFamily":"Georgia"}"#).unwrap();
        assert_eq!(styles.font_family, "Georgia");
        assert_eq!(styles.background_color, EmailStyles::default().background_color);
    }

    #[test]
    fn test_font_stack() {
        let mut styles = EmailStyles::default();
        styles.set(EmailStyleKey::FontFamily, "Georgia");
        styles.set(EmailStyleKey::FontFallback, "serif");
        assert_eq!(styles.font_stack(), "Georgia, serif");

        styles.set(EmailStyleKey::FontFamily, "");
        assert_eq!(styles.font_stack(), "serif");
    }
}
