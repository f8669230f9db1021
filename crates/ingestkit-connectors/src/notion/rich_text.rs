//! Notion rich text runs.
//!
//! See <https://developers.notion.com/reference/rich-text>.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::{Error, Result};

/// Styling applied to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".into()
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineEquation {
    pub expression: String,
}

/// Payload of a run, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: Text },
    /// Page, database, user and date mentions are kept as raw JSON.
    Mention { mention: Value },
    Equation { equation: InlineEquation },
}

/// One inline text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(flatten)]
    pub content: RichTextContent,
}

impl RichText {
    /// Plain, unstyled text run.
    pub fn plain(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            plain_text: content.clone(),
            href: None,
            annotations: Annotations::default(),
            content: RichTextContent::Text {
                text: Text {
                    content,
                    link: None,
                },
            },
        }
    }

    pub fn from_map(data: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(data)).map_err(|e| Error::block_parse("rich_text", e))
    }

    pub fn from_value(data: Value) -> Result<Self> {
        match data {
            Value::Object(map) => Self::from_map(map),
            other => Err(Error::block_parse(
                "rich_text",
                format!("expected an object, got {}", other),
            )),
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Text as displayed, falling back to the payload when `plain_text` is empty.
    pub fn text(&self) -> &str {
        if !self.plain_text.is_empty() {
            return &self.plain_text;
        }
        match &self.content {
            RichTextContent::Text { text } => &text.content,
            RichTextContent::Equation { equation } => &equation.expression,
            RichTextContent::Mention { .. } => "",
        }
    }
}

/// Remove a run list from `data` and decode every element.
///
/// An absent key yields an empty list; a present key that is not an array
/// of objects is a parse error for `block`.
pub(crate) fn take_runs(
    data: &mut Map<String, Value>,
    key: &str,
    block: &str,
) -> Result<Vec<RichText>> {
    match data.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| {
                RichText::from_value(item)
                    .map_err(|e| Error::block_parse(block, format!("{}: {}", key, e)))
            })
            .collect(),
        Some(other) => Err(Error::block_parse(
            block,
            format!("`{}` must be an array, got {}", key, other),
        )),
    }
}

/// Concatenate the displayed text of a run list.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(RichText::text).collect()
}
