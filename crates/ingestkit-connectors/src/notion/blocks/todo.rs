//! `to_do` block.
//!
//! Reference: <https://developers.notion.com/reference/block#to-do>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};
use crate::notion::rich_text::{take_runs, RichText};

/// Checkbox item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDo {
    pub color: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(skip_deserializing)]
    pub rich_text: Vec<RichText>,
}

impl BlockBase for ToDo {
    const TYPE: &'static str = "to_do";

    fn can_have_children() -> bool {
        true
    }

    fn from_map(mut data: Map<String, Value>) -> Result<Self> {
        let rich_text = take_runs(&mut data, "rich_text", Self::TYPE)?;

        let mut todo: ToDo = skeleton(Self::TYPE, data)?;
        todo.rich_text = rich_text;
        Ok(todo)
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_checked_defaults_false() {
        let todo = ToDo::from_map(data(json!({
            "color": "default",
            "rich_text": [{ "type": "text", "text": { "content": "Buy milk" }, "plain_text": "Buy milk" }]
        })))
        .unwrap();
        assert!(!todo.checked);
        assert_eq!(todo.rich_text[0].text(), "Buy milk");
    }

    #[test]
    fn test_round_trip() {
        let todo = ToDo {
            color: "green".into(),
            checked: true,
            rich_text: vec![RichText::plain("done")],
        };
        assert_eq!(ToDo::from_map(todo.to_map()).unwrap(), todo);
    }
}
