//! # Blocks
//!
//! A [`Block`] is one addressable content unit of an email. Its payload is a
//! tagged union ([`BlockContent`]) so every consumer matches exhaustively on
//! the kind instead of probing an untyped value.
//!
//! ## Persisted shape
//!
//! ```json
//! { "id": "…", "type": "button", "content": { "url": "…", "text": "…" }, "styles": { … } }
//! ```
//!
//! Block kinds this crate does not know are kept as [`BlockContent::Unknown`]
//! with their raw payload, so documents written by newer tools survive a
//! load/save cycle untouched.

use crate::error::CommonError;
use crate::styles::BlockStyles;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One content unit of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    /// Stable identifier, unique within a document
    pub id: String,

    /// Kind-dependent payload
    pub content: BlockContent,

    /// Block-local style override (absent = kind defaults)
    pub styles: Option<BlockStyles>,
}

/// Typed block payload
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Text(String),
    Heading(String),
    Image(ImageContent),
    Button(ButtonContent),
    Divider,

    /// A kind this version does not recognize. Renders to nothing.
    Unknown { kind: String, content: Value },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl BlockContent {
    pub fn text(value: impl Into<String>) -> Self {
        BlockContent::Text(value.into())
    }

    pub fn heading(value: impl Into<String>) -> Self {
        BlockContent::Heading(value.into())
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        BlockContent::Image(ImageContent {
            src: src.into(),
            alt: alt.into(),
        })
    }

    pub fn button(url: impl Into<String>, text: impl Into<String>) -> Self {
        BlockContent::Button(ButtonContent {
            url: Some(url.into()),
            text: Some(text.into()),
        })
    }

    /// The `type` tag written to JSON
    pub fn kind_name(&self) -> &str {
        match self {
            BlockContent::Text(_) => "text",
            BlockContent::Heading(_) => "heading",
            BlockContent::Image(_) => "image",
            BlockContent::Button(_) => "button",
            BlockContent::Divider => "divider",
            BlockContent::Unknown { kind, .. } => kind,
        }
    }
}

impl Block {
    /// Create a block with a freshly generated id
    pub fn new(content: BlockContent) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), content)
    }

    /// Create a block with a caller-chosen id
    pub fn with_id(id: impl Into<String>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
            styles: None,
        }
    }

    pub fn with_styles(mut self, styles: BlockStyles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn kind_name(&self) -> &str {
        self.content.kind_name()
    }
}

/// Partial update merged into an existing block.
///
/// `None` leaves a field untouched. `styles: Some(None)` clears the block's
/// local override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BlockContent>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub styles: Option<Option<BlockStyles>>,
}

// A present key (even `null`) is `Some`; `default` covers the missing key.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl BlockPatch {
    pub fn content(content: BlockContent) -> Self {
        Self {
            content: Some(content),
            styles: None,
        }
    }

    pub fn styles(styles: Option<BlockStyles>) -> Self {
        Self {
            content: None,
            styles: Some(styles),
        }
    }

    pub fn apply_to(&self, block: &mut Block) {
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        if let Some(styles) = &self.styles {
            block.styles = styles.clone();
        }
    }
}

// BlockContent rides inside BlockPatch, so it needs the same wire shape as
// a block's `type` + `content` pair.
impl Serialize for BlockContent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a> {
            #[serde(rename = "type")]
            kind: &'a str,
            content: Value,
        }

        let (kind, content) = split_content(self.clone());
        Tagged {
            kind: &kind,
            content,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BlockContent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            content: Value,
        }

        let tagged = Tagged::deserialize(deserializer)?;
        join_content(tagged.kind, tagged.content).map_err(serde::de::Error::custom)
    }
}

/// Wire form of a block
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    styles: Option<BlockStyles>,
}

impl TryFrom<RawBlock> for Block {
    type Error = CommonError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(Block {
            content: join_content(raw.kind, raw.content)?,
            id: raw.id,
            styles: raw.styles,
        })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let (kind, content) = split_content(block.content);
        RawBlock {
            id: block.id,
            kind,
            content,
            styles: block.styles,
        }
    }
}

fn split_content(content: BlockContent) -> (String, Value) {
    match content {
        BlockContent::Text(text) => ("text".to_string(), Value::String(text)),
        BlockContent::Heading(text) => ("heading".to_string(), Value::String(text)),
        BlockContent::Image(image) => ("image".to_string(), payload_value(&image)),
        BlockContent::Button(button) => ("button".to_string(), payload_value(&button)),
        BlockContent::Divider => ("divider".to_string(), Value::Null),
        BlockContent::Unknown { kind, content } => (kind, content),
    }
}

fn payload_value<T: Serialize>(payload: &T) -> Value {
    // Plain string-field structs always serialize
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

fn join_content(kind: String, content: Value) -> Result<BlockContent, CommonError> {
    match kind.as_str() {
        "text" => Ok(BlockContent::Text(string_payload(&kind, content)?)),
        "heading" => Ok(BlockContent::Heading(string_payload(&kind, content)?)),
        "image" => Ok(BlockContent::Image(object_payload(content)?)),
        "button" => Ok(BlockContent::Button(object_payload(content)?)),
        "divider" => Ok(BlockContent::Divider),
        _ => Ok(BlockContent::Unknown { kind, content }),
    }
}

fn string_payload(kind: &str, content: Value) -> Result<String, CommonError> {
    match content {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Err(CommonError::MalformedInput(format!(
            "{} block content must be a string, got {}",
            kind, other
        ))),
    }
}

fn object_payload<T: Default + serde::de::DeserializeOwned>(content: Value) -> Result<T, CommonError> {
    match content {
        Value::Null => Ok(T::default()),
        other => Ok(serde_json::from_value(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_blocks_get_distinct_ids() {
        let a = Block::new(BlockContent::text("a"));
        let b = Block::new(BlockContent::text("a"));
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let block = Block::with_id("b1", BlockContent::button("https://example.com", "Go"));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "b1",
                "type": "button",
                "content": { "url": "https://example.com", "text": "Go" }
            })
        );
    }

    #[test]
    fn test_image_missing_fields_default_to_empty() {
        let block: Block =
            serde_json::from_value(json!({ "id": "i", "type": "image", "content": {} })).unwrap();
        assert_eq!(block.content, BlockContent::image("", ""));
    }

    #[test]
    fn test_divider_ignores_content() {
        let block: Block = serde_json::from_value(
            json!({ "id": "d", "type": "divider", "content": "anything" }),
        )
        .unwrap();
        assert_eq!(block.content, BlockContent::Divider);
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let raw = json!({ "id": "v", "type": "video", "content": { "src": "a.mp4" } });
        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(block.kind_name(), "video");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let block: Block = serde_json::from_value(
            json!({ "id": "t", "type": "text", "content": "hi", "locked": true }),
        )
        .unwrap();
        assert_eq!(block.content, BlockContent::text("hi"));
    }

    #[test]
    fn test_text_with_object_content_is_rejected() {
        let result: Result<Block, _> =
            serde_json::from_value(json!({ "id": "t", "type": "text", "content": { "x": 1 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut block = Block::with_id("t", BlockContent::text("old"))
            .with_styles(BlockStyles::default());
        BlockPatch::content(BlockContent::text("new")).apply_to(&mut block);
        assert_eq!(block.content, BlockContent::text("new"));
        assert!(block.styles.is_some());

        BlockPatch::styles(None).apply_to(&mut block);
        assert!(block.styles.is_none());
    }

    #[test]
    fn test_patch_distinguishes_missing_and_null_styles() {
        let untouched: BlockPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(untouched.styles, None);

        let cleared: BlockPatch = serde_json::from_value(json!({ "styles": null })).unwrap();
        assert_eq!(cleared.styles, Some(None));

        let set: BlockPatch =
            serde_json::from_value(json!({ "styles": { "color": "red" } })).unwrap();
        assert_eq!(set.styles.flatten().and_then(|s| s.color), Some("red".to_string()));
    }
}
