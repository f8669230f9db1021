//! `breadcrumb` block.
//!
//! Reference: <https://developers.notion.com/reference/block#breadcrumb>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::Result;

use super::BlockBase;

/// Breadcrumb navigation. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {}

impl BlockBase for Breadcrumb {
    const TYPE: &'static str = "breadcrumb";

    fn can_have_children() -> bool {
        false
    }

    fn from_map(_data: Map<String, Value>) -> Result<Self> {
        Ok(Self {})
    }

    fn to_map(&self) -> Map<String, Value> {
        Map::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_payload() {
        let mut data = Map::new();
        data.insert("unexpected".into(), Value::from(1));
        assert_eq!(Breadcrumb::from_map(data).unwrap(), Breadcrumb {});
        assert!(Breadcrumb {}.to_map().is_empty());
    }
}
