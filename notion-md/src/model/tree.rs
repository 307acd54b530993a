//! Tree shapes produced by the assembler and the serializer.

use super::block::{Block, BlockKind};

/// An assembled block with its children, in API order.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub block: Block,
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    pub fn leaf(block: Block) -> Self {
        BlockNode {
            block,
            children: Vec::new(),
        }
    }

    pub fn with_children(block: Block, children: Vec<BlockNode>) -> Self {
        BlockNode { block, children }
    }

    pub fn kind(&self) -> &BlockKind {
        &self.block.kind
    }
}

/// A rendered block: its own Markdown plus rendered children.
///
/// Blocks that fold their children into their own output (toggles, tables) have no
/// children here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MdBlock {
    /// `None` for synthetic blocks built by callers.
    pub block_type: Option<String>,
    pub block_id: String,
    /// Markdown for the block itself, before children.
    pub parent: String,
    pub children: Vec<MdBlock>,
}

impl MdBlock {
    /// A synthetic block holding literal Markdown.
    pub fn synthetic(markdown: impl Into<String>) -> Self {
        MdBlock {
            parent: markdown.into(),
            ..MdBlock::default()
        }
    }
}

/// A child page the conversion stopped at instead of inlining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPageRef {
    pub id: String,
    pub title: String,
}

/// Result of converting a whole page.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    pub markdown: String,
    /// Child pages left for separate conversion (empty unless child pages are separated).
    pub child_pages: Vec<ChildPageRef>,
}
