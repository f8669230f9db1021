//! `child_database` block.
//!
//! Reference: <https://developers.notion.com/reference/block#child-database>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};

/// A database embedded in a page. Its rows are fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDatabase {
    pub title: String,
}

impl BlockBase for ChildDatabase {
    const TYPE: &'static str = "child_database";

    fn can_have_children() -> bool {
        true
    }

    fn from_map(data: Map<String, Value>) -> Result<Self> {
        skeleton(Self::TYPE, data)
    }

    fn to_map(&self) -> Map<String, Value> {
        payload(self)
    }
}
