use notion_md::model::{MediaBlock, RichText};
use notion_md::{
    AssetError, AssetTransport, AssetWriteMode, Block, BlockKind, ConvertOptions,
    NotionToMarkdown, SnapshotSource,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::tempdir;

const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Serves the same bytes for every URL.
struct FakeCdn;

impl AssetTransport for FakeCdn {
    fn download(&self, _url: &str, sink: &mut dyn Write) -> Result<Option<String>, AssetError> {
        sink.write_all(b"GIF89a")?;
        Ok(Some("image/gif".to_string()))
    }
}

fn image_page(url: &str, caption: &str) -> SnapshotSource {
    let mut media = MediaBlock::external(url);
    if !caption.is_empty() {
        media.caption = vec![RichText::text(caption)];
    }
    let mut source = SnapshotSource::new();
    source.insert_children("page", vec![Block::new("img", BlockKind::Image(media))]);
    source
}

/// `(alt, reference)` from `![alt](reference)`.
fn split_image(markdown: &str) -> (String, String) {
    let rest = markdown.strip_prefix("![").expect("image markdown");
    let (alt, rest) = rest.split_once("](").expect("image markdown");
    let reference = rest.strip_suffix(')').expect("image markdown");
    (alt.to_string(), reference.to_string())
}

#[test]
fn test_data_uri_image_is_written_as_png() {
    let dir = tempdir().unwrap();
    let options = ConvertOptions {
        image_dir: dir.path().to_path_buf(),
        ..ConvertOptions::default()
    };
    let converter = NotionToMarkdown::with_options(image_page(PIXEL, ""), options);

    let markdown = converter.to_markdown_document("page").unwrap().markdown;
    let (alt, reference) = split_image(&markdown);
    assert_eq!(alt, "image");
    assert!(reference.ends_with(".png"));
    assert_eq!(reference.len(), 15 + ".png".len());

    let written = std::fs::read(dir.path().join(&reference)).unwrap();
    assert!(written.starts_with(b"\x89PNG"));
}

#[test]
fn test_remote_image_uses_transport_and_url_extension() {
    let dir = tempdir().unwrap();
    let options = ConvertOptions {
        image_dir: dir.path().join("assets"),
        ..ConvertOptions::default()
    };
    let converter = NotionToMarkdown::with_options(
        image_page("https://cdn.test/images/cat.gif?v=2", "A cat"),
        options,
    )
    .with_asset_transport(Arc::new(FakeCdn));

    let markdown = converter.to_markdown_document("page").unwrap().markdown;
    let (alt, reference) = split_image(&markdown);
    assert_eq!(alt, "A cat");
    assert!(reference.ends_with(".gif"));

    let written = std::fs::read(dir.path().join("assets").join(&reference)).unwrap();
    assert_eq!(written, b"GIF89a");
}

#[test]
fn test_detached_writes_complete_after_waiting() {
    let dir = tempdir().unwrap();
    let options = ConvertOptions {
        image_dir: dir.path().to_path_buf(),
        asset_write: AssetWriteMode::Detached,
        ..ConvertOptions::default()
    };
    let converter = NotionToMarkdown::with_options(
        image_page("https://cdn.test/images/cat.gif", ""),
        options,
    )
    .with_asset_transport(Arc::new(FakeCdn));

    let markdown = converter.to_markdown_document("page").unwrap().markdown;
    converter.wait_for_assets();
    drop(converter);

    let (_, reference) = split_image(&markdown);
    let written = std::fs::read(dir.path().join(&reference)).unwrap();
    assert_eq!(written, b"GIF89a");
}

#[test]
fn test_base64_mode_inlines_remote_images() {
    let options = ConvertOptions {
        convert_images_to_base64: true,
        ..ConvertOptions::default()
    };
    let converter = NotionToMarkdown::with_options(
        image_page("https://cdn.test/cat.gif", "cat"),
        options,
    )
    .with_asset_transport(Arc::new(FakeCdn));

    let markdown = converter.to_markdown_document("page").unwrap().markdown;
    assert_eq!(markdown, "![cat](data:image/gif;base64,R0lGODlh)");
}

#[test]
fn test_base64_mode_passes_data_uris_through() {
    let options = ConvertOptions {
        convert_images_to_base64: true,
        ..ConvertOptions::default()
    };
    let converter = NotionToMarkdown::with_options(image_page(PIXEL, ""), options);

    let markdown = converter.to_markdown_document("page").unwrap().markdown;
    assert_eq!(markdown, format!("![image]({PIXEL})"));
}
