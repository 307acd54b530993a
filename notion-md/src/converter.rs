//! Conversion entry point
//!
//! [`NotionToMarkdown`] ties the pieces together: it assembles the block tree from a
//! [`BlockSource`], renders it with the built-in formatters (or registered custom
//! transformers), and serializes the result.
//!
//! ```ignore
//! let source = SnapshotSource::from_path("page.json")?;
//! let converter = NotionToMarkdown::new(source);
//! let blocks = converter.page_to_markdown("page-id")?;
//! println!("{}", converter.to_markdown_string(&blocks));
//! ```

use crate::assets::{AssetFetcher, AssetTransport};
use crate::common::assemble::TreeAssembler;
use crate::common::child_pages::collect_child_pages;
use crate::error::ConvertError;
use crate::markdown::{self, BlockFormatter, RichTextRenderer, Serializer};
use crate::model::{Block, BlockKind, BlockNode, MarkdownDocument, MdBlock};
use crate::options::ConvertOptions;
use crate::registry::{BlockTransformer, TransformerRegistry};
use crate::source::BlockSource;
use std::sync::Arc;

/// Block tree → Markdown converter over a block source.
#[derive(Debug)]
pub struct NotionToMarkdown<S: BlockSource> {
    source: S,
    options: ConvertOptions,
    transformers: TransformerRegistry,
    assets: AssetFetcher,
}

impl<S: BlockSource> NotionToMarkdown<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ConvertOptions::default())
    }

    pub fn with_options(source: S, options: ConvertOptions) -> Self {
        let assets = AssetFetcher::new(&options);
        NotionToMarkdown {
            source,
            options,
            transformers: TransformerRegistry::new(),
            assets,
        }
    }

    /// Replace the transport used to download images.
    pub fn with_asset_transport(mut self, transport: Arc<dyn AssetTransport>) -> Self {
        self.assets = self.assets.with_transport(transport);
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn transformers(&self) -> &TransformerRegistry {
        &self.transformers
    }

    /// Override the Markdown produced for one block type.
    ///
    /// The transformer runs before the built-in rule; `None` or an empty string falls back
    /// to it. Children of the block are still rendered below the custom output.
    pub fn set_custom_transformer<T>(
        &mut self,
        block_type: impl Into<String>,
        transformer: T,
    ) -> &mut Self
    where
        T: BlockTransformer + 'static,
    {
        self.transformers.register(block_type, transformer);
        self
    }

    /// Fetch and render every block of a page.
    pub fn page_to_markdown(&self, page_id: &str) -> Result<Vec<MdBlock>, ConvertError> {
        let tree = self.assembler().assemble(page_id)?;
        Ok(self.serializer().render(&tree))
    }

    /// Render caller-supplied top-level blocks. Their children are still fetched.
    pub fn blocks_to_markdown(&self, blocks: Vec<Block>) -> Result<Vec<MdBlock>, ConvertError> {
        let tree = self.assembler().assemble_blocks(blocks)?;
        Ok(self.serializer().render(&tree))
    }

    /// Markdown for a single block on its own, children not included.
    ///
    /// Table rows are the table's content rather than nested blocks, so they are fetched.
    pub fn block_to_markdown(&self, block: &Block) -> Result<String, ConvertError> {
        let node = match block.kind {
            BlockKind::Table(_) if block.has_children => {
                let rows = self.assembler().fetch_children(&block.id)?;
                BlockNode::with_children(
                    block.clone(),
                    rows.into_iter().map(BlockNode::leaf).collect(),
                )
            }
            _ => BlockNode::leaf(block.clone()),
        };
        Ok(self.serializer().render_block(&node))
    }

    pub fn to_markdown_string(&self, blocks: &[MdBlock]) -> String {
        markdown::to_markdown_string(blocks, &self.options.indent)
    }

    /// Convert a whole page and report the child pages left for separate conversion.
    pub fn to_markdown_document(&self, page_id: &str) -> Result<MarkdownDocument, ConvertError> {
        let tree = self.assembler().assemble(page_id)?;
        let blocks = self.serializer().render(&tree);
        let child_pages = if self.options.separate_child_page {
            collect_child_pages(&tree)
        } else {
            Vec::new()
        };
        log::debug!(
            "converted page '{page_id}': {} top-level blocks, {} separate child pages",
            blocks.len(),
            child_pages.len()
        );

        Ok(MarkdownDocument {
            markdown: self.to_markdown_string(&blocks),
            child_pages,
        })
    }

    /// Wait for image writes still running in [`AssetWriteMode::Detached`] mode.
    ///
    /// [`AssetWriteMode::Detached`]: crate::options::AssetWriteMode::Detached
    pub fn wait_for_assets(&self) {
        self.assets.wait_pending();
    }

    fn assembler(&self) -> TreeAssembler<'_, S> {
        TreeAssembler::new(&self.source, &self.options)
    }

    fn serializer(&self) -> Serializer<'_> {
        let formatter =
            BlockFormatter::new(RichTextRenderer::new(self.options.render_colors), &self.assets);
        Serializer::new(formatter, &self.transformers, &self.options.indent)
    }
}
