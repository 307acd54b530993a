//! Image asset resolution.
//!
//! Image blocks point either at a remote URL or at an inline `data:` URI. The fetcher turns
//! that reference into something the Markdown output can point at:
//!
//! - **File mode** (default): the image is written to the configured directory under a
//!   generated name (`<15 hex chars>.<ext>`) and the bare file name is returned.
//! - **Base64 mode**: no file is written; remote images are downloaded and inlined as a data
//!   URI, data URIs pass through unchanged.
//!
//! Failures never reach the caller. They are logged and the reference is returned anyway, so
//! the Markdown may point at a file that never materialized. Files are staged next to their
//! target and only renamed into place once complete, so a failed download leaves nothing
//! behind.
//!
//! With [`AssetWriteMode::Detached`] the write happens on a background thread and the
//! reference is returned before the file exists. The threads are tracked; call
//! [`AssetFetcher::wait_pending`] before the process exits or the writes may be cut short.
//! There is no cancellation and no timeout at this layer.

use crate::error::AssetError;
use crate::options::{AssetWriteMode, ConvertOptions};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;
use url::Url;
use uuid::Uuid;

const DEFAULT_EXTENSION: &str = "png";
const ID_LENGTH: usize = 15;

/// Standard alphabet with optional padding. URL-safe payloads are mapped onto it first.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Downloads remote assets.
pub trait AssetTransport: Send + Sync {
    /// Stream `url` into `sink`, returning the response's content type if known.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<Option<String>, AssetError>;
}

/// Blocking HTTP(S) transport backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl AssetTransport for HttpTransport {
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<Option<String>, AssetError> {
        let response = ureq::get(url).call()?;
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let mut reader = response.into_body().into_reader();
        io::copy(&mut reader, sink)?;
        Ok(content_type)
    }
}

/// Resolves image references to local files or inline data URIs.
#[derive(Clone)]
pub struct AssetFetcher {
    dir: PathBuf,
    mode: AssetWriteMode,
    inline_base64: bool,
    transport: Arc<dyn AssetTransport>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl std::fmt::Debug for AssetFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetFetcher")
            .field("dir", &self.dir)
            .field("mode", &self.mode)
            .field("inline_base64", &self.inline_base64)
            .finish()
    }
}

impl AssetFetcher {
    pub fn new(options: &ConvertOptions) -> Self {
        AssetFetcher {
            dir: options.image_dir.clone(),
            mode: options.asset_write,
            inline_base64: options.convert_images_to_base64,
            transport: Arc::new(HttpTransport),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn AssetTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve `href` according to the configured mode.
    pub fn resolve(&self, href: &str) -> String {
        if self.inline_base64 {
            self.inline(href)
        } else {
            self.save(href)
        }
    }

    /// Write the asset to the target directory and return its generated file name.
    pub fn save(&self, href: &str) -> String {
        let file_name = asset_file_name(href);
        let target = self.dir.join(&file_name);

        match self.mode {
            AssetWriteMode::Blocking => {
                if let Err(err) = write_asset(&target, href, self.transport.as_ref()) {
                    log::warn!("failed to save image {}: {err}", target.display());
                }
            }
            AssetWriteMode::Detached => {
                let href = href.to_string();
                let transport = Arc::clone(&self.transport);
                let handle = thread::spawn(move || {
                    if let Err(err) = write_asset(&target, &href, transport.as_ref()) {
                        log::warn!("failed to save image {}: {err}", target.display());
                    }
                });
                let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
                pending.retain(|handle| !handle.is_finished());
                pending.push(handle);
            }
        }

        file_name
    }

    /// Block until every detached write started so far has finished.
    pub fn wait_pending(&self) {
        let handles = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if !handles.is_empty() {
            log::debug!("waiting for {} detached image write(s)", handles.len());
        }
        for handle in handles {
            if handle.join().is_err() {
                log::warn!("a detached image write panicked");
            }
        }
    }

    /// Return `href` as a data URI, downloading remote images.
    pub fn inline(&self, href: &str) -> String {
        if href.starts_with("data:") {
            return href.to_string();
        }

        let mut bytes = Vec::new();
        match self.transport.download(href, &mut bytes) {
            Ok(content_type) => {
                let mime = content_type
                    .as_deref()
                    .and_then(|value| value.split(';').next())
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| mime_for_extension(&extension_for(href)))
                    .to_string();
                format!("data:{mime};base64,{}", STANDARD.encode(bytes))
            }
            Err(err) => {
                log::warn!("failed to inline image {href}: {err}");
                href.to_string()
            }
        }
    }
}

fn write_asset(target: &Path, href: &str, transport: &dyn AssetTransport) -> Result<(), AssetError> {
    let dir = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    if href.starts_with("data:") {
        staged.write_all(&decode_data_uri(href)?)?;
    } else {
        let mut writer = BufWriter::new(staged.as_file_mut());
        transport.download(href, &mut writer)?;
        writer.flush()?;
    }
    staged.persist(target).map_err(|err| err.error)?;

    log::debug!("saved image to {}", target.display());
    Ok(())
}

/// Generated file name for an asset: a short random id plus the best-known extension.
pub fn asset_file_name(href: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}.{}", &id[..ID_LENGTH], extension_for(href))
}

/// File extension for an asset reference, `png` when it cannot be derived.
pub fn extension_for(href: &str) -> String {
    let derived = match parse_data_uri(href) {
        Some(data) => data
            .mime
            .split('/')
            .nth(1)
            .map(|subtype| subtype.split('+').next().unwrap_or(subtype).to_string()),
        None => url_file_name(href).and_then(|name| {
            name.rsplit_once('.')
                .map(|(_, extension)| extension.to_string())
        }),
    };

    derived
        .map(|extension| extension.to_ascii_lowercase())
        .filter(|extension| {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Last path segment of a URL, without query or fragment.
pub fn url_file_name(href: &str) -> Option<String> {
    let last = match Url::parse(href) {
        Ok(url) => url.path_segments()?.last()?.to_string(),
        Err(_) => {
            let path = href.split(['?', '#']).next().unwrap_or(href);
            path.rsplit('/').next()?.to_string()
        }
    };
    Some(last).filter(|name| !name.is_empty())
}

/// MIME type for an image extension.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

struct DataUri<'a> {
    mime: &'a str,
    base64: bool,
    data: &'a str,
}

fn parse_data_uri(href: &str) -> Option<DataUri<'_>> {
    let rest = href.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default();
    let base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));
    Some(DataUri { mime, base64, data })
}

fn decode_data_uri(href: &str) -> Result<Vec<u8>, AssetError> {
    let data = parse_data_uri(href).ok_or(AssetError::InvalidDataUri)?;
    if data.base64 {
        let payload: String = data
            .data
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                other => other,
            })
            .collect();
        Ok(LENIENT_BASE64.decode(payload)?)
    } else {
        Ok(urlencoding::decode_binary(data.data.as_bytes()).into_owned())
    }
}
