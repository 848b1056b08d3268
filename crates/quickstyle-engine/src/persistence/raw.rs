//! Serde mirror of the stored document format.
//!
//! Field names follow the camelCase layout of the rich-text raw format:
//!
//! ```json
//! {
//!   "blocks": [
//!     {
//!       "key": "a1b2c3d4",
//!       "text": "Hello",
//!       "type": "header-one",
//!       "depth": 0,
//!       "inlineStyleRanges": [{ "offset": 0, "length": 5, "style": "BOLD" }],
//!       "entityRanges": [],
//!       "data": {}
//!     }
//!   ],
//!   "entityMap": {}
//! }
//! ```
//!
//! Offsets and lengths count chars. There is no version field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: Value,
}
