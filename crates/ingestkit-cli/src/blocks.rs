//! `ingestkit blocks` - decode a dump of Notion block objects.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use ingestkit_connectors::notion::parse_blocks;
use ingestkit_core::{FileHandler, LocalFileHandler};

#[derive(Debug, clap::Args)]
pub struct BlocksArgs {
    /// JSON file holding a block array or a `{ "results": [...] }` list response
    pub source: PathBuf,

    /// Where the JSON summary is written (default: the structured output dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// One decoded block in the summary output.
#[derive(Debug, Serialize)]
pub struct BlockSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    pub fetch_children: bool,
}

#[derive(Debug, Serialize)]
pub struct BlocksReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub blocks: Vec<BlockSummary>,
    pub unsupported: Vec<(String, usize)>,
}

/// Accepts either a bare array of blocks or a list response
/// (`{ "object": "list", "results": [...] }`).
fn block_values(value: Value) -> anyhow::Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => anyhow::bail!("expected a block array or an object with a `results` array"),
        },
        _ => anyhow::bail!("expected a block array or an object with a `results` array"),
    }
}

/// Decode `source` and write a JSON summary under `output_dir`.
pub fn run(source: &Path, output_dir: &Path) -> anyhow::Result<BlocksReport> {
    let handler = LocalFileHandler;
    let stat = handler.stat(source)?;
    if !stat.is_file {
        anyhow::bail!("{} is not a file", source.display());
    }

    let value: Value = handler.read_json(source)?;
    let parsed = parse_blocks(block_values(value)?)?;

    let blocks = parsed
        .blocks
        .iter()
        .map(|b| BlockSummary {
            id: b.id.clone(),
            block_type: b.block.block_type().to_string(),
            text: b.block.plain_text(),
            fetch_children: b.should_fetch_children(),
        })
        .collect();

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("blocks");
    handler.create_dir_all(output_dir)?;
    let report = BlocksReport {
        source: source.to_path_buf(),
        output: output_dir.join(format!("{}.json", stem)),
        blocks,
        unsupported: parsed.unsupported,
    };
    handler.write_json(&report, &report.output)?;

    info!(
        "Decoded {} blocks from {} into {}",
        report.blocks.len(),
        source.display(),
        report.output.display()
    );
    Ok(report)
}

pub fn print_report(report: &BlocksReport) {
    println!("Decoded blocks:    {}", report.blocks.len());
    for (block_type, count) in &report.unsupported {
        println!("Unsupported:       {} x{}", block_type, count);
    }
    println!("Summary written to {}", report.output.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_list_response() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("page.json");
        std::fs::write(
            &source,
            json!({
                "object": "list",
                "results": [
                    { "id": "a", "type": "equation", "has_children": false,
                      "equation": { "expression": "x^2" } },
                    { "id": "b", "type": "quote", "has_children": true,
                      "quote": { "color": "default", "rich_text": [
                          { "type": "text", "text": { "content": "hi" }, "plain_text": "hi" }
                      ] } },
                    { "id": "c", "type": "image", "image": {} }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let out = dir.path().join("out");
        let report = run(&source, &out).unwrap();
        assert_eq!(report.blocks.len(), 2);
        assert_eq!(report.blocks[1].text, "hi");
        assert!(report.blocks[1].fetch_children);
        assert_eq!(report.unsupported, vec![("image".to_string(), 1)]);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("page.json")).unwrap())
                .unwrap();
        assert_eq!(written["blocks"][0]["type"], "equation");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("missing.json"), dir.path()).is_err());
    }

    #[test]
    fn test_rejects_scalar_json() {
        assert!(block_values(json!(42)).is_err());
        assert!(block_values(json!({ "results": "nope" })).is_err());
        assert_eq!(block_values(json!([])).unwrap().len(), 0);
    }
}
