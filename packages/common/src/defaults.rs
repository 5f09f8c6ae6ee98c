//! Static default style tables.

use crate::styles::{BlockStyles, EmailStyles, StyleKind};

/// Default email container styles
pub fn email_styles() -> EmailStyles {
    EmailStyles {
        font_family: "Arial".to_string(),
        font_fallback: "Helvetica, sans-serif".to_string(),
        padding_top: "24px".to_string(),
        padding_right: "24px".to_string(),
        padding_bottom: "24px".to_string(),
        padding_left: "24px".to_string(),
        margin_top: "0px".to_string(),
        margin_right: "auto".to_string(),
        margin_bottom: "0px".to_string(),
        margin_left: "auto".to_string(),
        body_color: "#111827".to_string(),
        background_color: "#f3f4f6".to_string(),
        content_background_color: "#ffffff".to_string(),
        radius: "8px".to_string(),
        border_width: "0px".to_string(),
        border_color: "#e5e7eb".to_string(),
    }
}

struct Row {
    font_size: &'static str,
    line_height: &'static str,
    color: &'static str,
    margin_bottom: &'static str,
    padding_left: &'static str,
}

fn row(kind: StyleKind) -> Row {
    match kind {
        StyleKind::Paragraph => Row {
            font_size: "16px",
            line_height: "1.6",
            color: "#374151",
            margin_bottom: "16px",
            padding_left: "0px",
        },
        StyleKind::Heading1 => Row {
            font_size: "32px",
            line_height: "1.25",
            color: "#111827",
            margin_bottom: "24px",
            padding_left: "0px",
        },
        StyleKind::Heading2 => Row {
            font_size: "24px",
            line_height: "1.3",
            color: "#111827",
            margin_bottom: "16px",
            padding_left: "0px",
        },
        StyleKind::Heading3 => Row {
            font_size: "20px",
            line_height: "1.4",
            color: "#111827",
            margin_bottom: "12px",
            padding_left: "0px",
        },
        StyleKind::OrderedList | StyleKind::UnorderedList => Row {
            font_size: "16px",
            line_height: "1.6",
            color: "#374151",
            margin_bottom: "16px",
            padding_left: "24px",
        },
    }
}

/// Fully populated default block styles for a style kind
pub fn block_styles(kind: StyleKind) -> BlockStyles {
    let row = row(kind);
    BlockStyles {
        text_align: Some("left".to_string()),
        border_radius: Some("0px".to_string()),
        padding_top: Some("0px".to_string()),
        padding_right: Some("0px".to_string()),
        padding_bottom: Some("0px".to_string()),
        padding_left: Some(row.padding_left.to_string()),
        margin_top: Some("0px".to_string()),
        margin_right: Some("0px".to_string()),
        margin_bottom: Some(row.margin_bottom.to_string()),
        margin_left: Some("0px".to_string()),
        background_color: Some("transparent".to_string()),
        font_size: Some(row.font_size.to_string()),
        line_height: Some(row.line_height.to_string()),
        color: Some(row.color.to_string()),
    }
}
