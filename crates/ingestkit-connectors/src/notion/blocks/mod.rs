//! Typed Notion block variants and the tag → decoder registry.
//!
//! Each variant decodes in two steps: nested run lists (`rich_text`,
//! `caption`) are popped from the raw object and decoded, the remaining
//! scalar fields build the record, and the decoded runs are attached.

mod breadcrumb;
mod child_database;
mod code;
mod equation;
mod file;
mod quote;
mod table_of_contents;
mod todo;

pub use breadcrumb::Breadcrumb;
pub use child_database::ChildDatabase;
pub use code::Code;
pub use equation::Equation;
pub use file::File;
pub use quote::Quote;
pub use table_of_contents::TableOfContents;
pub use todo::ToDo;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ingestkit_core::{Error, Result};

use super::rich_text::{self, RichText};

/// Capability shared by every block variant.
pub trait BlockBase: Sized {
    /// Discriminator tag, as found in the block object's `type` field.
    const TYPE: &'static str;

    /// Whether Notion allows nested blocks under this variant. Declared per
    /// type; callers use it to decide whether to fetch children.
    fn can_have_children() -> bool;

    /// Decode the variant payload (the object stored under the `type` key).
    fn from_map(data: Map<String, Value>) -> Result<Self>;

    fn to_map(&self) -> Map<String, Value>;
}

/// The closed set of supported block variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Breadcrumb(Breadcrumb),
    ChildDatabase(ChildDatabase),
    Code(Code),
    Equation(Equation),
    File(File),
    Quote(Quote),
    TableOfContents(TableOfContents),
    ToDo(ToDo),
}

type Decoder = fn(Map<String, Value>) -> Result<Block>;

fn decode<B>(data: Map<String, Value>) -> Result<Block>
where
    B: BlockBase + Into<Block>,
{
    B::from_map(data).map(Into::into)
}

static DECODERS: Lazy<HashMap<&'static str, Decoder>> = Lazy::new(|| {
    let entries: [(&'static str, Decoder); 8] = [
        (Breadcrumb::TYPE, decode::<Breadcrumb>),
        (ChildDatabase::TYPE, decode::<ChildDatabase>),
        (Code::TYPE, decode::<Code>),
        (Equation::TYPE, decode::<Equation>),
        (File::TYPE, decode::<File>),
        (Quote::TYPE, decode::<Quote>),
        (TableOfContents::TYPE, decode::<TableOfContents>),
        (ToDo::TYPE, decode::<ToDo>),
    ];
    entries.into_iter().collect()
});

/// Tags with a registered decoder, sorted.
pub fn registered_types() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = DECODERS.keys().copied().collect();
    tags.sort_unstable();
    tags
}

pub fn is_registered(tag: &str) -> bool {
    DECODERS.contains_key(tag)
}

impl Block {
    /// Decode `data` as the variant named by `tag`.
    pub fn parse(tag: &str, data: Map<String, Value>) -> Result<Self> {
        let decoder = DECODERS
            .get(tag)
            .ok_or_else(|| Error::UnknownBlockType(tag.to_string()))?;
        decoder(data)
    }

    pub fn block_type(&self) -> &'static str {
        match self {
            Self::Breadcrumb(_) => Breadcrumb::TYPE,
            Self::ChildDatabase(_) => ChildDatabase::TYPE,
            Self::Code(_) => Code::TYPE,
            Self::Equation(_) => Equation::TYPE,
            Self::File(_) => File::TYPE,
            Self::Quote(_) => Quote::TYPE,
            Self::TableOfContents(_) => TableOfContents::TYPE,
            Self::ToDo(_) => ToDo::TYPE,
        }
    }

    pub fn can_have_children(&self) -> bool {
        match self {
            Self::Breadcrumb(_) => Breadcrumb::can_have_children(),
            Self::ChildDatabase(_) => ChildDatabase::can_have_children(),
            Self::Code(_) => Code::can_have_children(),
            Self::Equation(_) => Equation::can_have_children(),
            Self::File(_) => File::can_have_children(),
            Self::Quote(_) => Quote::can_have_children(),
            Self::TableOfContents(_) => TableOfContents::can_have_children(),
            Self::ToDo(_) => ToDo::can_have_children(),
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            Self::Breadcrumb(b) => b.to_map(),
            Self::ChildDatabase(b) => b.to_map(),
            Self::Code(b) => b.to_map(),
            Self::Equation(b) => b.to_map(),
            Self::File(b) => b.to_map(),
            Self::Quote(b) => b.to_map(),
            Self::TableOfContents(b) => b.to_map(),
            Self::ToDo(b) => b.to_map(),
        }
    }

    /// Primary text runs of the block (empty for variants without text).
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Self::Code(b) => &b.rich_text,
            Self::File(b) => &b.rich_text,
            Self::Quote(b) => &b.rich_text,
            Self::ToDo(b) => &b.rich_text,
            _ => &[],
        }
    }

    /// Text content suitable for indexing.
    pub fn plain_text(&self) -> String {
        match self {
            Self::ChildDatabase(b) => b.title.clone(),
            Self::Equation(b) => b.expression.clone(),
            Self::File(b) if b.rich_text.is_empty() => rich_text::plain_text(&b.caption),
            other => rich_text::plain_text(other.rich_text()),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Block {
                fn from(block: $variant) -> Self {
                    Block::$variant(block)
                }
            }
        )*
    };
}

impl_from_variant!(
    Breadcrumb,
    ChildDatabase,
    Code,
    Equation,
    File,
    Quote,
    TableOfContents,
    ToDo,
);

/// A complete block object as returned by the Notion API.
#[derive(Debug, Clone, PartialEq)]
pub struct NotionBlock {
    pub id: String,
    pub has_children: bool,
    pub archived: bool,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub block: Block,
}

#[derive(Deserialize)]
struct BlockEnvelope {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    last_edited_time: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl NotionBlock {
    /// Decode a block object, dispatching on its `type` discriminator.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut envelope: BlockEnvelope =
            serde_json::from_value(value).map_err(|e| Error::block_parse("block", e))?;

        let data = match envelope.rest.remove(&envelope.block_type) {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                return Err(Error::block_parse(
                    envelope.block_type,
                    format!("payload must be an object, got {}", other),
                ))
            }
        };
        let block = Block::parse(&envelope.block_type, data)?;

        Ok(Self {
            id: envelope.id,
            has_children: envelope.has_children,
            archived: envelope.archived,
            created_time: envelope.created_time,
            last_edited_time: envelope.last_edited_time,
            block,
        })
    }

    /// Whether a children fetch is worth issuing for this block.
    pub fn should_fetch_children(&self) -> bool {
        self.has_children && self.block.can_have_children()
    }

    pub fn to_value(&self) -> Value {
        let block_type = self.block.block_type();
        let mut map = Map::new();
        map.insert("object".into(), Value::from("block"));
        map.insert("id".into(), Value::from(self.id.clone()));
        map.insert("type".into(), Value::from(block_type));
        map.insert("has_children".into(), Value::from(self.has_children));
        map.insert("archived".into(), Value::from(self.archived));
        if let Some(t) = &self.created_time {
            map.insert("created_time".into(), Value::from(t.clone()));
        }
        if let Some(t) = &self.last_edited_time {
            map.insert("last_edited_time".into(), Value::from(t.clone()));
        }
        map.insert(block_type.into(), Value::Object(self.block.to_map()));
        Value::Object(map)
    }
}

/// Build a variant's scalar skeleton from the remaining fields.
pub(crate) fn skeleton<T: DeserializeOwned>(block: &str, data: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(data)).map_err(|e| Error::block_parse(block, e))
}

/// Serialize a variant into its payload object.
pub(crate) fn payload<T: Serialize>(block: &T) -> Map<String, Value> {
    match serde_json::to_value(block) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
