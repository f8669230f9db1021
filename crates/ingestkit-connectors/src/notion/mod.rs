//! Notion block decoding.
//!
//! Raw block objects from the Notion API are tagged by a `type` field whose
//! value also names the key holding the variant payload. [`NotionBlock`]
//! reads that envelope; [`Block::parse`] decodes a payload given its tag.

pub mod blocks;
pub mod rich_text;

pub use blocks::{
    registered_types, Block, BlockBase, Breadcrumb, ChildDatabase, Code, Equation, File,
    NotionBlock, Quote, TableOfContents, ToDo,
};
pub use rich_text::{Annotations, RichText, RichTextContent};

use serde_json::Value;
use tracing::{debug, warn};

use ingestkit_core::{Error, Result};

/// Outcome of decoding a list of block objects.
#[derive(Debug, Default)]
pub struct ParsedBlocks {
    pub blocks: Vec<NotionBlock>,
    /// Block types with no registered decoder, with the number of
    /// occurrences skipped.
    pub unsupported: Vec<(String, usize)>,
}

/// Decode block objects, skipping variants with no registered decoder.
///
/// Malformed blocks of a known variant are returned as errors; the first
/// one aborts the whole list.
pub fn parse_blocks(values: Vec<Value>) -> Result<ParsedBlocks> {
    let mut parsed = ParsedBlocks::default();
    for value in values {
        match NotionBlock::from_value(value) {
            Ok(block) => parsed.blocks.push(block),
            Err(Error::UnknownBlockType(tag)) => {
                debug!("Skipping unsupported Notion block type {:?}", tag);
                match parsed.unsupported.iter_mut().find(|(t, _)| *t == tag) {
                    Some((_, count)) => *count += 1,
                    None => parsed.unsupported.push((tag, 1)),
                }
            }
            Err(e) => return Err(e),
        }
    }
    if !parsed.unsupported.is_empty() {
        warn!(
            "Skipped {} Notion blocks of unsupported types",
            parsed.unsupported.iter().map(|(_, n)| n).sum::<usize>()
        );
    }
    Ok(parsed)
}
