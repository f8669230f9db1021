//! `file` block.
//!
//! Reference: <https://developers.notion.com/reference/block#file>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};
use crate::notion::rich_text::{take_runs, RichText};

/// A file attachment, either hosted by Notion (`file`) or linked (`external`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(rename = "type")]
    pub file_type: String,
    /// Notion-hosted file: `{ "url", "expiry_time" }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Map<String, Value>>,
    /// Externally hosted file: `{ "url" }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_deserializing)]
    pub rich_text: Vec<RichText>,
    #[serde(skip_deserializing)]
    pub caption: Vec<RichText>,
}

impl File {
    /// URL of the attachment, whichever way it is hosted.
    pub fn url(&self) -> Option<&str> {
        let source = match self.file_type.as_str() {
            "external" => self.external.as_ref(),
            _ => self.file.as_ref(),
        };
        source.and_then(|s| s.get("url")).and_then(|u| u.as_str())
    }
}

impl BlockBase for File {
    const TYPE: &'static str = "file";

    fn can_have_children() -> bool {
        false
    }

    fn from_map(mut data: Map<String, Value>) -> Result<Self> {
        let rich_text = take_runs(&mut data, "rich_text", Self::TYPE)?;
        let caption = take_runs(&mut data, "caption", Self::TYPE)?;

        let mut file: File = skeleton(Self::TYPE, data)?;
        file.rich_text = rich_text;
        file.caption = caption;
        Ok(file)
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}
