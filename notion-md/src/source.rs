//! Block sources
//!
//! The conversion never talks to the network API itself. It asks a [`BlockSource`] for one
//! page of a block's children at a time, following `next_cursor` until `has_more` is false.
//! An API client implements the trait; [`SnapshotSource`] replays a recorded transcript and
//! is what the CLI and the tests use.
//!
//! Snapshot layout:
//!
//! ```json
//! {
//!   "root": "page-id",
//!   "children": {
//!     "page-id": [ { "results": [ … ], "next_cursor": "c1", "has_more": true },
//!                  { "results": [ … ], "next_cursor": null, "has_more": false } ],
//!     "toggle-id": [ { "results": [ … ] } ]
//!   }
//! }
//! ```

use crate::error::SourceError;
use crate::model::Block;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One page of a block-children listing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BlockPage {
    #[serde(default)]
    pub results: Vec<Block>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl BlockPage {
    /// A final page holding `results`.
    pub fn last(results: Vec<Block>) -> Self {
        BlockPage {
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page followed by another one at `cursor`.
    pub fn continued(results: Vec<Block>, cursor: impl Into<String>) -> Self {
        BlockPage {
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Paginated access to block children.
pub trait BlockSource {
    /// Fetch one page of `block_id`'s children, starting at `cursor` (first page if `None`).
    fn list_children(&self, block_id: &str, cursor: Option<&str>)
        -> Result<BlockPage, SourceError>;
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<BlockPage, SourceError> {
        (**self).list_children(block_id, cursor)
    }
}

/// A recorded transcript of block-children pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotSource {
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    children: HashMap<String, Vec<BlockPage>>,
}

impl SnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The page the snapshot was recorded for, if it names one.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Record every page of `block_id`'s children, in order.
    pub fn insert_pages(&mut self, block_id: impl Into<String>, pages: Vec<BlockPage>) {
        self.children.insert(block_id.into(), pages);
    }

    /// Record `block_id`'s children as a single page.
    pub fn insert_children(&mut self, block_id: impl Into<String>, blocks: Vec<Block>) {
        self.insert_pages(block_id, vec![BlockPage::last(blocks)]);
    }
}

impl BlockSource for SnapshotSource {
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<BlockPage, SourceError> {
        let pages = self
            .children
            .get(block_id)
            .ok_or_else(|| SourceError::NotFound {
                block_id: block_id.to_string(),
            })?;

        let index = match cursor {
            None => 0,
            Some(cursor) => pages
                .iter()
                .position(|page| page.next_cursor.as_deref() == Some(cursor))
                .map(|previous| previous + 1)
                .filter(|&index| index < pages.len())
                .ok_or_else(|| SourceError::UnknownCursor {
                    block_id: block_id.to_string(),
                    cursor: cursor.to_string(),
                })?,
        };

        Ok(pages.get(index).cloned().unwrap_or_default())
    }
}
