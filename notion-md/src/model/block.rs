//! Raw block records as returned by the block-children API.
//!
//! A record is tagged with its `type` and carries a payload under the key of the same name:
//!
//! ```json
//! { "id": "…", "type": "to_do", "has_children": false,
//!   "to_do": { "rich_text": [ … ], "checked": true } }
//! ```
//!
//! Records are parsed into the closed [`BlockKind`] sum type. Unknown tags and payloads that
//! do not match their tag's shape become [`BlockKind::Unsupported`], so a single odd block can
//! never fail a whole page. The complete record is kept in [`Block::raw`] for custom
//! transformers.

use super::rich_text::RichText;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One block record.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    /// The record's `type` tag, kept verbatim even when the kind is unsupported.
    pub block_type: String,
    pub has_children: bool,
    pub kind: BlockKind,
    /// The full record as received (`Value::Null` for blocks built in code).
    pub raw: Value,
}

impl Block {
    /// Build a block in code; `block_type` is derived from the kind.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Block {
            id: id.into(),
            block_type: kind.tag().to_string(),
            has_children: false,
            kind,
            raw: Value::Null,
        }
    }

    pub fn with_children_flag(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// The type-keyed payload of the raw record.
    pub fn payload(&self) -> &Value {
        self.raw.get(&self.block_type).unwrap_or(&Value::Null)
    }

    pub fn from_value(raw: Value) -> Self {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let block_type = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let has_children = raw
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let payload = raw.get(&block_type).unwrap_or(&Value::Null);
        let kind = BlockKind::parse(&block_type, payload);

        Block {
            id,
            block_type,
            has_children,
            kind,
            raw,
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Block::from_value)
    }
}

/// The known block variants plus a catch-all.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Divider,
    Toggle(TextBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(LinkBlock),
    Embed(LinkBlock),
    LinkPreview(LinkBlock),
    LinkToPage(LinkToPageBlock),
    Equation(EquationBlock),
    ChildPage(ChildPageBlock),
    ColumnList,
    Column,
    SyncedBlock,
    Unsupported(String),
}

impl BlockKind {
    /// Parse a payload for the given tag, degrading to `Unsupported` on any mismatch.
    pub fn parse(tag: &str, payload: &Value) -> Self {
        let kind = match tag {
            "paragraph" => typed(payload).map(BlockKind::Paragraph),
            "heading_1" => typed(payload).map(BlockKind::Heading1),
            "heading_2" => typed(payload).map(BlockKind::Heading2),
            "heading_3" => typed(payload).map(BlockKind::Heading3),
            "bulleted_list_item" => typed(payload).map(BlockKind::BulletedListItem),
            "numbered_list_item" => typed(payload).map(BlockKind::NumberedListItem),
            "to_do" => typed(payload).map(BlockKind::ToDo),
            "quote" => typed(payload).map(BlockKind::Quote),
            "callout" => typed(payload).map(BlockKind::Callout),
            "code" => typed(payload).map(BlockKind::Code),
            "divider" => Some(BlockKind::Divider),
            "toggle" => typed(payload).map(BlockKind::Toggle),
            "table" => typed(payload).map(BlockKind::Table),
            "table_row" => typed(payload).map(BlockKind::TableRow),
            "image" => typed(payload).map(BlockKind::Image),
            "video" => typed(payload).map(BlockKind::Video),
            "file" => typed(payload).map(BlockKind::File),
            "pdf" => typed(payload).map(BlockKind::Pdf),
            "bookmark" => typed(payload).map(BlockKind::Bookmark),
            "embed" => typed(payload).map(BlockKind::Embed),
            "link_preview" => typed(payload).map(BlockKind::LinkPreview),
            "link_to_page" => typed(payload).map(BlockKind::LinkToPage),
            "equation" => typed(payload).map(BlockKind::Equation),
            "child_page" => typed(payload).map(BlockKind::ChildPage),
            "column_list" => Some(BlockKind::ColumnList),
            "column" => Some(BlockKind::Column),
            "synced_block" => Some(BlockKind::SyncedBlock),
            _ => None,
        };

        kind.unwrap_or_else(|| {
            log::debug!("treating block type '{tag}' as unsupported");
            BlockKind::Unsupported(tag.to_string())
        })
    }

    /// The API tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::ToDo(_) => "to_do",
            BlockKind::Quote(_) => "quote",
            BlockKind::Callout(_) => "callout",
            BlockKind::Code(_) => "code",
            BlockKind::Divider => "divider",
            BlockKind::Toggle(_) => "toggle",
            BlockKind::Table(_) => "table",
            BlockKind::TableRow(_) => "table_row",
            BlockKind::Image(_) => "image",
            BlockKind::Video(_) => "video",
            BlockKind::File(_) => "file",
            BlockKind::Pdf(_) => "pdf",
            BlockKind::Bookmark(_) => "bookmark",
            BlockKind::Embed(_) => "embed",
            BlockKind::LinkPreview(_) => "link_preview",
            BlockKind::LinkToPage(_) => "link_to_page",
            BlockKind::Equation(_) => "equation",
            BlockKind::ChildPage(_) => "child_page",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column => "column",
            BlockKind::SyncedBlock => "synced_block",
            BlockKind::Unsupported(tag) => tag,
        }
    }
}

fn typed<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    T::deserialize(payload).ok()
}

/// Payload of every block whose content is a single rich text run.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl TextBlock {
    pub fn new(rich_text: Vec<RichText>) -> Self {
        TextBlock { rich_text }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<CalloutIcon>,
}

/// Icon shown next to a callout. Only emoji icons are rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalloutIcon {
    Emoji {
        #[serde(default)]
        emoji: Option<String>,
    },
    External {
        #[serde(default)]
        external: Option<ExternalFile>,
    },
    File {
        #[serde(default)]
        file: Option<HostedFile>,
    },
    #[serde(other)]
    Other,
}

impl CalloutIcon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            CalloutIcon::Emoji { emoji } => emoji.as_deref().filter(|e| !e.is_empty()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A file hosted by the API; its URL stops working after `expiry_time`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<String>,
}

/// Payload of image, video, file and pdf blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaBlock {
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub external: Option<ExternalFile>,
    #[serde(default)]
    pub file: Option<HostedFile>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MediaBlock {
    pub fn external(url: impl Into<String>) -> Self {
        MediaBlock {
            external: Some(ExternalFile { url: url.into() }),
            ..MediaBlock::default()
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.external
            .as_ref()
            .map(|external| external.url.as_str())
            .or(self.file.as_ref().map(|file| file.url.as_str()))
    }
}

/// Payload of bookmark, embed and link preview blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkBlock {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkToPageBlock {
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChildPageBlock {
    pub title: String,
}
