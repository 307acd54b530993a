use crate::common::{load_expected, load_snapshot};
use insta::assert_snapshot;
use notion_md::{Block, BlockKind, ConvertOptions, NotionToMarkdown, SnapshotSource};
use serde_json::json;

#[test]
fn test_kitchensink_matches_expected_markdown() {
    let source = load_snapshot("kitchensink.json");
    let root = source.root().map(str::to_string).expect("fixture names its root");
    let converter = NotionToMarkdown::new(source);

    let document = converter.to_markdown_document(&root).unwrap();
    assert_eq!(document.markdown, load_expected("kitchensink.md"));
    assert!(document.child_pages.is_empty());
}

#[test]
fn test_kitchensink_rendered_tree_shape() {
    let source = load_snapshot("kitchensink.json");
    let converter = NotionToMarkdown::new(source);
    let blocks = converter.page_to_markdown("page-1").unwrap();

    // Both pages of the root listing, in order.
    assert_eq!(blocks.len(), 18);
    assert_eq!(blocks[0].block_id, "b-h1");
    assert_eq!(blocks[17].block_id, "b-cols");

    let bullet = &blocks[2];
    assert_eq!(bullet.parent, "- First bullet");
    assert_eq!(bullet.children.len(), 1);
    assert_eq!(bullet.children[0].parent, "- Nested bullet");

    let toggle = blocks
        .iter()
        .find(|block| block.block_type.as_deref() == Some("toggle"))
        .unwrap();
    assert!(toggle.children.is_empty());

    let unsupported = blocks
        .iter()
        .find(|block| block.block_type.as_deref() == Some("breadcrumb"))
        .unwrap();
    assert_eq!(unsupported.parent, "");
}

#[test]
fn test_nested_lists_with_space_indent() {
    let item = |id: &str, tag: &str, text: &str, has_children: bool| {
        Block::from_value(json!({
            "id": id,
            "type": tag,
            "has_children": has_children,
            tag: { "rich_text": [{ "type": "text", "text": { "content": text }, "plain_text": text }] }
        }))
    };

    let mut source = SnapshotSource::new();
    source.insert_children(
        "page",
        vec![
            item("h", "heading_2", "Steps", false),
            item("n1", "numbered_list_item", "Prepare", true),
            item("n2", "numbered_list_item", "Cook", false),
            item("p", "paragraph", "Enjoy.", false),
        ],
    );
    source.insert_children(
        "n1",
        vec![
            item("n1a", "bulleted_list_item", "Wash", false),
            item("n1b", "bulleted_list_item", "Chop", false),
        ],
    );

    let options = ConvertOptions {
        indent: "   ".to_string(),
        ..ConvertOptions::default()
    };
    let document = NotionToMarkdown::with_options(source, options)
        .to_markdown_document("page")
        .unwrap();

    assert_snapshot!(document.markdown, @r"
## Steps

1. Prepare
   - Wash

   - Chop

2. Cook

Enjoy.
");
}

#[test]
fn test_malformed_payload_degrades_to_unsupported() {
    let block = Block::from_value(json!({
        "id": "bad",
        "type": "heading_1",
        "has_children": false,
        "heading_1": { "rich_text": "not a list" }
    }));
    assert_eq!(block.kind, BlockKind::Unsupported("heading_1".to_string()));

    let converter = NotionToMarkdown::new(SnapshotSource::new());
    assert_eq!(converter.block_to_markdown(&block).unwrap(), "");
}
