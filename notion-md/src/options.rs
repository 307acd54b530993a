//! Conversion options
//!
//! Every knob that changes rendered output or asset side effects lives here. The options
//! never change the shape of the assembled tree, except [`ConvertOptions::separate_child_page`],
//! which stops recursion at child pages.

use serde::Deserialize;
use std::path::PathBuf;

/// How image files are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetWriteMode {
    /// The file is written (or the failure logged) before the reference is returned.
    #[default]
    Blocking,
    /// The write runs on its own thread and the reference is returned immediately.
    Detached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Stop at child pages instead of inlining their content.
    pub separate_child_page: bool,
    /// Inline images as base64 data URIs instead of writing files.
    pub convert_images_to_base64: bool,
    /// Emit `<span style=…>` markup for colored text.
    pub render_colors: bool,
    /// Indentation unit applied once per nesting level.
    pub indent: String,
    /// Directory image files are written to.
    pub image_dir: PathBuf,
    pub asset_write: AssetWriteMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            separate_child_page: false,
            convert_images_to_base64: false,
            render_colors: false,
            indent: "\t".to_string(),
            image_dir: PathBuf::from("."),
            asset_write: AssetWriteMode::Blocking,
        }
    }
}
