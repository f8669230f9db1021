//! `code` block.
//!
//! Reference: <https://developers.notion.com/reference/block#code>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};
use crate::notion::rich_text::{take_runs, RichText};

/// Source code with a language tag and an optional caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub language: String,
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Deserialize)]
struct CodeFields {
    language: String,
}

impl BlockBase for Code {
    const TYPE: &'static str = "code";

    fn can_have_children() -> bool {
        false
    }

    fn from_map(mut data: Map<String, Value>) -> Result<Self> {
        let rich_text = take_runs(&mut data, "rich_text", Self::TYPE)?;
        let caption = take_runs(&mut data, "caption", Self::TYPE)?;
        let CodeFields { language } = skeleton(Self::TYPE, data)?;

        Ok(Self {
            language,
            rich_text,
            caption,
        })
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}
