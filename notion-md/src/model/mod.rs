//! Data model: raw block records, inline rich text, and the assembled/rendered trees.

pub mod block;
pub mod rich_text;
pub mod tree;

pub use block::{
    Block, BlockKind, CalloutBlock, CalloutIcon, ChildPageBlock, CodeBlock, EquationBlock,
    ExternalFile, HostedFile, LinkBlock, LinkToPageBlock, MediaBlock, TableBlock, TableRowBlock,
    TextBlock, ToDoBlock,
};
pub use rich_text::{plain_text_of, Annotations, Color, RichText, SpanKind};
pub use tree::{BlockNode, ChildPageRef, MarkdownDocument, MdBlock};
