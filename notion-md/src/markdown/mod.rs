//! Markdown rendering
//!
//! Everything that turns blocks and spans into Markdown text. Nothing here performs I/O
//! except image handling, which is delegated to [`crate::assets::AssetFetcher`].
//!
//! # Block Mapping Table
//!
//! | Block type            | Markdown                                  | Notes                                   |
//! |-----------------------|-------------------------------------------|-----------------------------------------|
//! | paragraph             | inline text                               |                                         |
//! | heading_1/2/3         | `#`, `##`, `###`                          |                                         |
//! | bulleted_list_item    | `- item`                                  | text trimmed                            |
//! | numbered_list_item    | `n. item`                                 | n counts a run of consecutive items     |
//! | to_do                 | `- [x]` / `- [ ]`                         |                                         |
//! | quote                 | `> text`                                  | line breaks stay inside the quote       |
//! | callout               | `> 💡 text`                               | only emoji icons are rendered           |
//! | code                  | fenced block                              | `plain text` is written as `text`       |
//! | equation              | `$$` block                                |                                         |
//! | divider               | `---`                                     |                                         |
//! | toggle                | `<details>` / `<summary>`                 | children folded in; no summary → children |
//! | table                 | pipe table                                | first row is the header                 |
//! | image                 | `![alt](ref)`                             | downloaded or inlined as base64         |
//! | video / file / pdf    | `[name](url)`                             |                                         |
//! | bookmark / embed / link_preview | `[caption](url)`                |                                         |
//! | link_to_page          | `[link_to_page](https://www.notion.so/…)` |                                         |
//! | child_page            | `# title`                                 | content inlined unless pages are separated |
//! | column_list / column / synced_block | children only               | no indentation added                    |
//! | anything else         | nothing                                   | logged at debug level                   |
//!
//! # Inline Mapping
//!
//! | Annotation    | Markup                         |
//! |---------------|--------------------------------|
//! | code          | `` `x` ``                      |
//! | bold          | `**x**`                        |
//! | italic        | `_x_`                          |
//! | strikethrough | `~~x~~`                        |
//! | underline     | `<u>x</u>`                     |
//! | color         | `<span style="…">x</span>`     |
//!
//! Markup is applied in that order, innermost first. Equation spans render as inline code.
//!
//! # Lossy Conversions
//!
//! - Colors are dropped unless `render_colors` is set
//! - Callout icons other than emoji are dropped
//! - Table header flags are ignored; the first row is always the header
//! - Column layout is flattened into sequential blocks

pub mod annotate;
pub mod blocks;
pub mod rich_text;
pub mod serializer;
pub mod table;

pub use blocks::{BlockContext, BlockFormatter};
pub use rich_text::RichTextRenderer;
pub use serializer::{to_markdown_string, Serializer};
