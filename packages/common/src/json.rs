//! # JSON Codec
//!
//! Persists a block list as a JSON array. Loading never fails the caller:
//! [`from_json`] recovers from malformed input with an empty list and reports
//! the problem as a `warn` event. Tooling that wants the error itself uses
//! [`try_from_json`].

use crate::block::Block;
use crate::error::{CommonError, CommonResult};
use serde_json::Value;
use tracing::warn;

/// Serialize blocks (2-space indented when `pretty`)
pub fn to_json(blocks: &[Block], pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(blocks)
    } else {
        serde_json::to_string(blocks)
    };

    // Block serialization has no failing path (string keys, no non-finite floats)
    result.unwrap_or_else(|_| "[]".to_string())
}

/// Parse blocks, returning `MalformedInput` on bad text or a non-array top level
pub fn try_from_json(text: &str) -> CommonResult<Vec<Block>> {
    let value: Value = serde_json::from_str(text)?;

    if !value.is_array() {
        return Err(CommonError::MalformedInput(format!(
            "expected a JSON array of blocks, got {}",
            value_kind(&value)
        )));
    }

    Ok(serde_json::from_value(value)?)
}

/// Parse blocks, recovering with an empty list on any failure
pub fn from_json(text: &str) -> Vec<Block> {
    match try_from_json(text) {
        Ok(blocks) => blocks,
        Err(error) => {
            warn!(%error, "Discarding malformed block document");
            Vec::new()
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
