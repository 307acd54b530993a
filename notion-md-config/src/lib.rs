//! Shared configuration loader for notion-md.
//!
//! `defaults/notion-md.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`NotionMdConfig`],
//! which converts into the library's [`ConvertOptions`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use notion_md::{AssetWriteMode, ConvertOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/notion-md.default.toml");

/// Conventional name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "notion-md.toml";

/// Top-level configuration consumed by notion-md applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionMdConfig {
    pub convert: ConvertConfig,
    pub assets: AssetsConfig,
}

/// Rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub separate_child_page: bool,
    pub convert_images_to_base64: bool,
    pub render_colors: bool,
    pub indent: String,
}

/// Where and how image files are written.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    pub directory: PathBuf,
    pub write_mode: AssetWriteMode,
}

impl From<&NotionMdConfig> for ConvertOptions {
    fn from(config: &NotionMdConfig) -> Self {
        ConvertOptions {
            separate_child_page: config.convert.separate_child_page,
            convert_images_to_base64: config.convert.convert_images_to_base64,
            render_colors: config.convert.render_colors,
            indent: config.convert.indent.clone(),
            image_dir: config.assets.directory.clone(),
            asset_write: config.assets.write_mode,
        }
    }
}

impl From<NotionMdConfig> for ConvertOptions {
    fn from(config: NotionMdConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<NotionMdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NotionMdConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.convert.separate_child_page);
        assert!(!config.convert.convert_images_to_base64);
        assert_eq!(config.convert.indent, "\t");
        assert_eq!(config.assets.write_mode, AssetWriteMode::Blocking);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(ConvertOptions::from(&config), ConvertOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("assets.write_mode", "detached")
            .expect("override to apply")
            .set_override("convert.render_colors", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.assets.write_mode, AssetWriteMode::Detached);
        assert!(config.convert.render_colors);
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[convert]\nindent = \"  \"\n\n[assets]\ndirectory = \"images\"")
            .expect("write config");

        let options: ConvertOptions = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build")
            .into();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.image_dir, PathBuf::from("images"));
        assert!(!options.separate_child_page);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/notion-md.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/notion-md.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.assets.directory, PathBuf::from("."));
    }
}
