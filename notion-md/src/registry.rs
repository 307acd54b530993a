//! Custom block transformers
//!
//! Callers can override the Markdown produced for any block type by registering a
//! [`BlockTransformer`] under the type tag. Transformers are consulted before the built-in
//! formatters; returning `None` (or an empty string) falls through to the default rule.
//!
//! # Examples
//!
//! ```ignore
//! let mut registry = TransformerRegistry::new();
//! registry.register("embed", |block: &Block| {
//!     Some(format!("<iframe src=\"{}\"></iframe>", block.payload()["url"].as_str()?))
//! });
//! ```

use crate::model::Block;
use std::collections::HashMap;

/// Overrides the rendering of one block type.
pub trait BlockTransformer: Send + Sync {
    fn transform(&self, block: &Block) -> Option<String>;
}

impl<F> BlockTransformer for F
where
    F: Fn(&Block) -> Option<String> + Send + Sync,
{
    fn transform(&self, block: &Block) -> Option<String> {
        self(block)
    }
}

/// Registry of transformers keyed by block type tag.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Box<dyn BlockTransformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        TransformerRegistry {
            transformers: HashMap::new(),
        }
    }

    /// Register a transformer. A previous transformer for the same tag is replaced.
    pub fn register<T>(&mut self, tag: impl Into<String>, transformer: T)
    where
        T: BlockTransformer + 'static,
    {
        self.transformers.insert(tag.into(), Box::new(transformer));
    }

    pub fn get(&self, tag: &str) -> Option<&dyn BlockTransformer> {
        self.transformers.get(tag).map(|t| t.as_ref())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.transformers.contains_key(tag)
    }

    /// Registered tags (sorted)
    pub fn list_types(&self) -> Vec<String> {
        let mut tags: Vec<_> = self.transformers.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Run the transformer registered for the block's type, if any.
    ///
    /// Empty output counts as no output.
    pub fn apply(&self, block: &Block) -> Option<String> {
        let transformer = self.get(&block.block_type)?;
        log::trace!(
            "custom transformer for '{}' (block '{}')",
            block.block_type,
            block.id
        );
        transformer
            .transform(block)
            .filter(|markdown| !markdown.is_empty())
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("types", &self.list_types())
            .finish()
    }
}
