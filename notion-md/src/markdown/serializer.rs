//! Markdown serialization (block tree → Markdown string)
//!
//! Two passes over the assembled tree:
//!
//! 1. [`Serializer::render`] turns every [`BlockNode`] into an [`MdBlock`] holding the block's
//!    own Markdown and its rendered children. Numbered list ordinals are counted here, per
//!    sibling list.
//! 2. [`to_markdown_string`] flattens the [`MdBlock`] tree, indenting each level and joining
//!    siblings with blank lines.
//!
//! Keeping the passes apart lets callers inspect or patch the rendered tree (or splice in
//! synthetic blocks) before producing the final string.

use super::blocks::{BlockContext, BlockFormatter};
use crate::model::{BlockKind, BlockNode, MdBlock};
use crate::registry::TransformerRegistry;

/// Block types whose children stay at the parent's depth.
const INLINE_LAYOUT_TYPES: &[&str] = &["column_list", "column", "synced_block", "child_page"];

/// First pass: block tree → rendered tree.
pub struct Serializer<'a> {
    formatter: BlockFormatter<'a>,
    transformers: &'a TransformerRegistry,
    indent: &'a str,
}

impl<'a> Serializer<'a> {
    pub fn new(
        formatter: BlockFormatter<'a>,
        transformers: &'a TransformerRegistry,
        indent: &'a str,
    ) -> Self {
        Serializer {
            formatter,
            transformers,
            indent,
        }
    }

    /// Render one sibling list.
    pub fn render(&self, nodes: &[BlockNode]) -> Vec<MdBlock> {
        let mut ordinal = 0usize;
        nodes
            .iter()
            .map(|node| {
                ordinal = match node.kind() {
                    BlockKind::NumberedListItem(_) => ordinal + 1,
                    _ => 0,
                };
                self.render_node(node, (ordinal > 0).then_some(ordinal))
            })
            .collect()
    }

    /// Render a single node with its subtree.
    pub fn render_node(&self, node: &BlockNode, ordinal: Option<usize>) -> MdBlock {
        let block = &node.block;
        let rendered = |parent: String, children: Vec<MdBlock>| MdBlock {
            block_type: Some(block.block_type.clone()),
            block_id: block.id.clone(),
            parent,
            children,
        };

        if let Some(custom) = self.transformers.apply(block) {
            return rendered(custom, self.render(&node.children));
        }

        match &block.kind {
            BlockKind::Toggle(_) => {
                let inner = to_markdown_string(&self.render(&node.children), self.indent);
                let context = BlockContext {
                    ordinal,
                    children: &node.children,
                    rendered_children: Some(&inner),
                };
                rendered(self.formatter.format(block, context), Vec::new())
            }
            BlockKind::Table(_) => {
                let context = BlockContext {
                    ordinal,
                    children: &node.children,
                    rendered_children: None,
                };
                rendered(self.formatter.format(block, context), Vec::new())
            }
            _ => {
                let context = BlockContext {
                    ordinal,
                    children: &node.children,
                    rendered_children: None,
                };
                rendered(
                    self.formatter.format(block, context),
                    self.render(&node.children),
                )
            }
        }
    }

    /// Single block, without children.
    pub fn render_block(&self, node: &BlockNode) -> String {
        self.render_node(node, None).parent
    }
}

/// Second pass: flatten a rendered tree into Markdown.
///
/// Each level is indented by one more `indent` unit than its parent. Layout containers and
/// inlined child pages keep their children at their own depth, and a block with no Markdown
/// of its own contributes its children at its own depth.
pub fn to_markdown_string(blocks: &[MdBlock], indent: &str) -> String {
    serialize_level(blocks, indent, 0)
}

fn serialize_level(blocks: &[MdBlock], indent: &str, depth: usize) -> String {
    blocks
        .iter()
        .map(|block| serialize_block(block, indent, depth))
        .filter(|markdown| !markdown.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn serialize_block(block: &MdBlock, indent: &str, depth: usize) -> String {
    if block.parent.is_empty() {
        return serialize_level(&block.children, indent, depth);
    }

    let inline_layout = block
        .block_type
        .as_deref()
        .is_some_and(|tag| INLINE_LAYOUT_TYPES.contains(&tag));
    let own = indent_lines(&block.parent, &indent.repeat(depth));
    let child_depth = if inline_layout { depth } else { depth + 1 };
    let children = serialize_level(&block.children, indent, child_depth);

    match (children.is_empty(), inline_layout) {
        (true, _) => own,
        (false, true) => format!("{own}\n\n{children}"),
        (false, false) => format!("{own}\n{children}"),
    }
}

/// Prefix every non-empty line.
fn indent_lines(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
