//! `table_of_contents` block.
//!
//! Reference: <https://developers.notion.com/reference/block#table-of-contents>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};

/// Rendered by the client; only the color is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    pub color: String,
}

impl BlockBase for TableOfContents {
    const TYPE: &'static str = "table_of_contents";

    fn can_have_children() -> bool {
        false
    }

    fn from_map(data: Map<String, Value>) -> Result<Self> {
        skeleton(Self::TYPE, data)
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_required() {
        assert!(TableOfContents::from_map(Map::new()).is_err());

        let mut data = Map::new();
        data.insert("color".into(), Value::from("gray_background"));
        let toc = TableOfContents::from_map(data).unwrap();
        assert_eq!(toc.color, "gray_background");
    }

    #[test]
    fn test_round_trip() {
        let toc = TableOfContents {
            color: "blue".to_string(),
        };
        let map = toc.to_map();
        assert_eq!(map.get("color"), Some(&Value::from("blue")));
        assert_eq!(TableOfContents::from_map(map).unwrap(), toc);
    }
}
