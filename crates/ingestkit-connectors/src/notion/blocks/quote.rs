//! `quote` block.
//!
//! Reference: <https://developers.notion.com/reference/block#quote>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};
use crate::notion::rich_text::{take_runs, RichText};

/// Quoted text. Nested blocks are fetched separately when `has_children` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub color: String,
    /// Inline child block objects, when the payload carries them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Value>,
    #[serde(skip_deserializing)]
    pub rich_text: Vec<RichText>,
}

impl BlockBase for Quote {
    const TYPE: &'static str = "quote";

    fn can_have_children() -> bool {
        true
    }

    fn from_map(mut data: Map<String, Value>) -> Result<Self> {
        let rich_text = take_runs(&mut data, "rich_text", Self::TYPE)?;

        let mut quote: Quote = skeleton(Self::TYPE, data)?;
        quote.rich_text = rich_text;
        Ok(quote)
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}
