//! Notion block trees to Markdown
//!
//!     This crate converts the block tree of a Notion page (as handed out, one page of children
//!     at a time, by the block-children API) into Markdown text. Nesting, inline formatting and
//!     block semantics are preserved; constructs Markdown has no syntax for (underline, colors,
//!     collapsible sections) are written as embedded HTML.
//!
//!     TLDR:
//!         - The crate never talks to the API. A caller implements `BlockSource` (or uses the
//!           recorded `SnapshotSource`) and the converter pulls pages through it.
//!         - Conversion is assemble first, then render, then serialize. No rendering happens
//!           while pages are still being fetched.
//!         - Unknown block types are not errors: they render as nothing.
//!         - The only side effect is writing image files (or downloading them for base64
//!           inlining).
//!
//! Architecture
//!
//!     The pipeline, leaf components first:
//!
//!     - Annotation composer (markdown/annotate.rs): style flags + text → nested markup
//!     - Rich-text renderer (markdown/rich_text.rs): spans → one inline string
//!     - Block formatters (markdown/blocks.rs): one rule per block type
//!     - Asset fetcher (assets.rs): image reference → local file or data URI
//!     - Tree assembler (common/assemble.rs): paginated listings → block tree
//!     - Serializer (markdown/serializer.rs): block tree → rendered tree → Markdown string
//!
//!     `NotionToMarkdown` (converter.rs) wires them together and holds the custom transformer
//!     registry (registry.rs), which lets callers override the output of any block type.
//!
//!     The file structure :
//!     .
//!     ├── assets.rs               # Image download / inlining
//!     ├── converter.rs            # NotionToMarkdown entry point
//!     ├── error.rs
//!     ├── options.rs              # ConvertOptions
//!     ├── registry.rs             # Custom block transformers
//!     ├── source.rs               # BlockSource trait, SnapshotSource
//!     ├── model                   # Blocks, rich text, block and rendered trees
//!     ├── common                  # Tree assembly, child page collection
//!     └── markdown                # Formatters and serializer
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── <area>.rs
//!     └── fixtures
//!         └── <snapshot>.json
//!
//!     Note that rust does not by default discover tests in subdirectories, so tests/lib.rs
//!     includes them as modules.
//!
//! Core Algorithms
//!
//!     Two pieces carry most of the logic. Assembly (common/assemble.rs) drains each block's
//!     children cursor and recurses depth-first, so the finished tree is in API order no matter
//!     how pages arrive. Serialization (markdown/serializer.rs) is split in two passes: the
//!     render pass counts numbered list ordinals per sibling list and folds children into the
//!     blocks that own them (toggles, tables); the string pass indents each level and joins
//!     siblings with blank lines.

pub mod assets;
pub mod common;
pub mod converter;
pub mod error;
pub mod markdown;
pub mod model;
pub mod options;
pub mod registry;
pub mod source;

pub use assets::{AssetFetcher, AssetTransport, HttpTransport};
pub use converter::NotionToMarkdown;
pub use error::{AssetError, ConvertError, SourceError};
pub use model::{Block, BlockKind, BlockNode, ChildPageRef, MarkdownDocument, MdBlock};
pub use options::{AssetWriteMode, ConvertOptions};
pub use registry::{BlockTransformer, TransformerRegistry};
pub use source::{BlockPage, BlockSource, SnapshotSource};
