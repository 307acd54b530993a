//! Block formatters
//!
//! Each block kind has one rule producing the block's own Markdown. The free functions are
//! the pure building blocks; [`BlockFormatter`] dispatches a [`Block`] to them. Children are
//! never rendered here, except where a block folds them into its own output:
//!
//! - toggles receive their children already rendered, through [`BlockContext::rendered_children`]
//! - tables read their `table_row` children directly from [`BlockContext::children`]
//!
//! Numbered list items get their ordinal from [`BlockContext::ordinal`]; the formatter keeps
//! no counters of its own.

use super::rich_text::RichTextRenderer;
use super::table::pipe_table;
use crate::assets::{url_file_name, AssetFetcher};
use crate::model::{
    plain_text_of, Block, BlockKind, BlockNode, CalloutIcon, LinkBlock, LinkToPageBlock,
    MediaBlock, RichText,
};

pub fn heading(level: usize, text: &str) -> String {
    format!("{} {text}", "#".repeat(level.clamp(1, 6)))
}

pub fn bullet(text: &str) -> String {
    format!("- {}", text.trim())
}

pub fn numbered(text: &str, ordinal: usize) -> String {
    format!("{ordinal}. {}", text.trim())
}

pub fn todo(text: &str, checked: bool) -> String {
    if checked {
        format!("- [x] {text}")
    } else {
        format!("- [ ] {text}")
    }
}

/// Prefix every line with `> `, keeping line breaks inside one blockquote.
pub fn quote(text: &str) -> String {
    format!("> {}", text.replace('\n', "  \n> "))
}

pub fn callout(text: &str, icon: Option<&CalloutIcon>) -> String {
    match icon.and_then(CalloutIcon::emoji) {
        Some(emoji) => format!("> {emoji} {}", text.replace('\n', "  \n> ")),
        None => quote(text),
    }
}

/// Fenced code block. The `plain text` language token is written as `text`.
pub fn code_block(text: &str, language: &str) -> String {
    let language = if language == "plain text" {
        "text"
    } else {
        language
    };
    format!("```{language}\n{text}\n```")
}

pub fn equation_block(expression: &str) -> String {
    format!("$$\n{expression}\n$$")
}

pub fn divider() -> String {
    "---".to_string()
}

/// Collapsible section. Without a summary the children are returned unwrapped.
pub fn toggle(summary: &str, children: &str) -> String {
    if summary.is_empty() {
        return children.to_string();
    }
    format!("<details>\n  <summary>{summary}</summary>\n\n{children}\n\n  </details>")
}

pub fn image(alt: &str, href: &str) -> String {
    format!("![{alt}]({href})")
}

pub fn link(text: &str, href: &str) -> String {
    format!("[{text}]({href})")
}

/// Per-invocation inputs supplied by the serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockContext<'a> {
    /// Position within the current run of numbered list items.
    pub ordinal: Option<usize>,
    pub children: &'a [BlockNode],
    /// Children already rendered to Markdown, for blocks that fold them in.
    pub rendered_children: Option<&'a str>,
}

/// Dispatches blocks to their formatting rule.
#[derive(Debug, Clone, Copy)]
pub struct BlockFormatter<'a> {
    rich_text: RichTextRenderer,
    assets: &'a AssetFetcher,
}

impl<'a> BlockFormatter<'a> {
    pub fn new(rich_text: RichTextRenderer, assets: &'a AssetFetcher) -> Self {
        BlockFormatter { rich_text, assets }
    }

    pub fn rich_text(&self) -> &RichTextRenderer {
        &self.rich_text
    }

    /// Markdown for `block` itself. Unsupported blocks render as an empty string.
    pub fn format(&self, block: &Block, context: BlockContext<'_>) -> String {
        let text = |spans: &[RichText]| self.rich_text.render(spans);

        match &block.kind {
            BlockKind::Paragraph(content) => text(&content.rich_text),
            BlockKind::Heading1(content) => heading(1, &text(&content.rich_text)),
            BlockKind::Heading2(content) => heading(2, &text(&content.rich_text)),
            BlockKind::Heading3(content) => heading(3, &text(&content.rich_text)),
            BlockKind::BulletedListItem(content) => bullet(&text(&content.rich_text)),
            BlockKind::NumberedListItem(content) => {
                numbered(&text(&content.rich_text), context.ordinal.unwrap_or(1))
            }
            BlockKind::ToDo(content) => todo(&text(&content.rich_text), content.checked),
            BlockKind::Quote(content) => quote(&text(&content.rich_text)),
            BlockKind::Callout(content) => {
                callout(&text(&content.rich_text), content.icon.as_ref())
            }
            BlockKind::Code(content) => {
                code_block(&plain_text_of(&content.rich_text), &content.language)
            }
            BlockKind::Divider => divider(),
            BlockKind::Toggle(content) => toggle(
                &text(&content.rich_text),
                context.rendered_children.unwrap_or_default(),
            ),
            BlockKind::Table(_) => self.table(context.children),
            BlockKind::Image(media) => self.image(media),
            BlockKind::Video(media) | BlockKind::File(media) | BlockKind::Pdf(media) => {
                media_link(media, block.kind.tag())
            }
            BlockKind::Bookmark(content)
            | BlockKind::Embed(content)
            | BlockKind::LinkPreview(content) => bookmark(content, block.kind.tag()),
            BlockKind::LinkToPage(target) => link_to_page(target),
            BlockKind::Equation(equation) => equation_block(&equation.expression),
            BlockKind::ChildPage(page) => heading(1, &page.title),
            BlockKind::ColumnList | BlockKind::Column | BlockKind::SyncedBlock => String::new(),
            BlockKind::TableRow(_) => {
                log::debug!("table row '{}' outside of a table", block.id);
                String::new()
            }
            BlockKind::Unsupported(tag) => {
                log::debug!("no formatter for block type '{tag}' (block '{}')", block.id);
                String::new()
            }
        }
    }

    /// Table from the rich text cells of `table_row` children.
    fn table(&self, rows: &[BlockNode]) -> String {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .filter_map(|node| match &node.block.kind {
                BlockKind::TableRow(row) => Some(
                    row.cells
                        .iter()
                        .map(|cell| self.rich_text.render(cell))
                        .collect(),
                ),
                _ => None,
            })
            .collect();
        pipe_table(&cells)
    }

    fn image(&self, media: &MediaBlock) -> String {
        let Some(url) = media.url() else {
            log::debug!("image block without a source");
            return String::new();
        };
        let caption = plain_text_of(&media.caption);
        let alt = if caption.trim().is_empty() {
            "image"
        } else {
            caption.as_str()
        };
        image(alt, &self.assets.resolve(url))
    }
}

fn caption_or(caption: &[RichText], fallback: impl FnOnce() -> String) -> String {
    let caption = plain_text_of(caption);
    if caption.trim().is_empty() {
        fallback()
    } else {
        caption
    }
}

fn media_link(media: &MediaBlock, tag: &str) -> String {
    let Some(url) = media.url() else {
        return String::new();
    };
    let title = caption_or(&media.caption, || {
        media
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| url_file_name(url))
            .unwrap_or_else(|| tag.to_string())
    });
    link(&title, url)
}

fn bookmark(content: &LinkBlock, tag: &str) -> String {
    if content.url.is_empty() {
        return String::new();
    }
    let title = caption_or(&content.caption, || tag.to_string());
    link(&title, &content.url)
}

fn link_to_page(target: &LinkToPageBlock) -> String {
    match target.page_id.as_deref().or(target.database_id.as_deref()) {
        Some(id) => link(
            "link_to_page",
            &format!("https://www.notion.so/{}", id.replace('-', "")),
        ),
        None => String::new(),
    }
}
