use crate::common::load_snapshot;
use notion_md::{Block, BlockTransformer, NotionToMarkdown};

/// Renders bookmarks as HTML anchors, reading the raw payload.
struct AnchorBookmarks;

impl BlockTransformer for AnchorBookmarks {
    fn transform(&self, block: &Block) -> Option<String> {
        let url = block.payload()["url"].as_str()?;
        Some(format!("<a href=\"{url}\">{url}</a>"))
    }
}

#[test]
fn test_transformer_replaces_builtin_output() {
    let mut converter = NotionToMarkdown::new(load_snapshot("kitchensink.json"));
    converter.set_custom_transformer("bookmark", AnchorBookmarks);

    let markdown = converter.to_markdown_document("page-1").unwrap().markdown;
    assert!(markdown.contains("<a href=\"https://www.rust-lang.org\">https://www.rust-lang.org</a>"));
    assert!(!markdown.contains("[bookmark]("));
}

#[test]
fn test_transformer_can_render_unsupported_types() {
    let mut converter = NotionToMarkdown::new(load_snapshot("kitchensink.json"));
    converter.set_custom_transformer("breadcrumb", |_: &Block| {
        Some("Home / Kitchen Sink".to_string())
    });

    let markdown = converter.to_markdown_document("page-1").unwrap().markdown;
    assert!(markdown.contains("[bookmark](https://www.rust-lang.org)\n\nHome / Kitchen Sink\n\nLeft"));
}

#[test]
fn test_declining_transformer_keeps_default() {
    let mut converter = NotionToMarkdown::new(load_snapshot("kitchensink.json"));
    converter
        .set_custom_transformer("divider", |_: &Block| None::<String>)
        .set_custom_transformer("heading_1", |_: &Block| Some(String::new()));

    let markdown = converter.to_markdown_document("page-1").unwrap().markdown;
    assert!(markdown.starts_with("# Kitchen Sink\n\n"));
    assert!(markdown.contains("\n\n---\n\n"));
    assert_eq!(
        converter.transformers().list_types(),
        vec!["divider", "heading_1"]
    );
}

#[test]
fn test_transformer_output_keeps_children() {
    let mut converter = NotionToMarkdown::new(load_snapshot("kitchensink.json"));
    converter.set_custom_transformer("bulleted_list_item", |block: &Block| {
        let text = block.payload()["rich_text"][0]["plain_text"].as_str()?;
        Some(format!("* {text}"))
    });

    let markdown = converter.to_markdown_document("page-1").unwrap().markdown;
    assert!(markdown.contains("* First bullet\n\t* Nested bullet\n\n* Second bullet"));
}
