//! `equation` block.
//!
//! Reference: <https://developers.notion.com/reference/block#equation>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::{payload, skeleton, BlockBase};

/// A KaTeX block equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub expression: String,
}

impl BlockBase for Equation {
    const TYPE: &'static str = "equation";

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
