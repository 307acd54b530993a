//! Builds a nested block tree from paginated block-children listings.
//!
//! # The High-Level Concept
//!
//! The API hands out a block's children one page at a time, and each child only says
//! `has_children: true` without carrying its subtree. Assembly is therefore a depth-first
//! walk that, for every block it visits, drains the children cursor and then descends into
//! each child in turn.
//!
//! # The Algorithm
//!
//! 1. **Drain the level:** request pages for the parent until `has_more` is false. Results are
//!    appended in response order; nothing is sorted or deduplicated.
//!
//! 2. **Descend:** for each block of the level, in order, assemble its subtree if it has
//!    children and is not a stop point. A sibling is only visited after the previous
//!    sibling's subtree is complete, so the finished tree never depends on fetch timing.
//!
//! 3. **Stop points:** with `separate_child_page`, child pages are kept as leaves and their
//!    content is left for a separate conversion.
//!
//! Any source failure aborts the assembly. A silently truncated level would shift list
//! numbering and nesting in the rendered output.

use crate::error::ConvertError;
use crate::model::{Block, BlockKind, BlockNode};
use crate::options::ConvertOptions;
use crate::source::BlockSource;

/// Assembles block trees from a [`BlockSource`].
pub struct TreeAssembler<'a, S: BlockSource + ?Sized> {
    source: &'a S,
    options: &'a ConvertOptions,
}

impl<'a, S: BlockSource + ?Sized> TreeAssembler<'a, S> {
    pub fn new(source: &'a S, options: &'a ConvertOptions) -> Self {
        TreeAssembler { source, options }
    }

    /// Assemble the full tree below `root_id` (the root itself is not part of the result).
    pub fn assemble(&self, root_id: &str) -> Result<Vec<BlockNode>, ConvertError> {
        let blocks = self.fetch_children(root_id)?;
        self.assemble_blocks(blocks)
    }

    /// Assemble subtrees for an already-fetched list of top-level blocks.
    pub fn assemble_blocks(&self, blocks: Vec<Block>) -> Result<Vec<BlockNode>, ConvertError> {
        let mut nodes = Vec::with_capacity(blocks.len());
        for block in blocks {
            let children = if self.should_descend(&block) {
                self.assemble(&block.id)?
            } else {
                Vec::new()
            };
            nodes.push(BlockNode::with_children(block, children));
        }
        Ok(nodes)
    }

    /// Drain every page of `block_id`'s children.
    pub fn fetch_children(&self, block_id: &str) -> Result<Vec<Block>, ConvertError> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .list_children(block_id, cursor.as_deref())
                .map_err(|source| ConvertError::Fetch {
                    block_id: block_id.to_string(),
                    source,
                })?;
            pages += 1;
            blocks.extend(page.results);

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                (true, None) => {
                    log::warn!(
                        "children of block '{block_id}' report more pages but no cursor; stopping after page {pages}"
                    );
                    break;
                }
                (false, _) => break,
            }
        }

        log::debug!(
            "fetched {} children of block '{block_id}' in {pages} page(s)",
            blocks.len()
        );
        Ok(blocks)
    }

    fn should_descend(&self, block: &Block) -> bool {
        if !block.has_children {
            return false;
        }
        !(self.options.separate_child_page && matches!(block.kind, BlockKind::ChildPage(_)))
    }
}
