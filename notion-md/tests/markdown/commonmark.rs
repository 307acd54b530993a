use crate::common::load_snapshot;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use notion_md::model::{RichText, TableRowBlock};
use notion_md::{Block, BlockKind, NotionToMarkdown, SnapshotSource};

fn gfm_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
}

fn count<'a>(root: &'a AstNode<'a>, matches: impl Fn(&NodeValue) -> bool) -> usize {
    root.descendants()
        .filter(|node| matches(&node.data.borrow().value))
        .count()
}

fn kitchensink_markdown() -> String {
    NotionToMarkdown::new(load_snapshot("kitchensink.json"))
        .to_markdown_document("page-1")
        .unwrap()
        .markdown
}

#[test]
fn test_kitchensink_parses_into_expected_structure() {
    let markdown = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &gfm_options());

    assert_eq!(count(root, |value| matches!(value, NodeValue::Table(_))), 1);
    assert_eq!(count(root, |value| matches!(value, NodeValue::TableRow(_))), 2);
    assert_eq!(
        count(root, |value| matches!(value, NodeValue::Heading(h) if h.level == 1)),
        1
    );
    assert_eq!(count(root, |value| matches!(value, NodeValue::BlockQuote)), 2);
    assert_eq!(count(root, |value| matches!(value, NodeValue::ThematicBreak)), 1);
    assert_eq!(
        count(root, |value| matches!(value, NodeValue::CodeBlock(code) if code.info == "python")),
        1
    );
    assert_eq!(count(root, |value| matches!(value, NodeValue::Strong)), 1);
    assert_eq!(count(root, |value| matches!(value, NodeValue::Emph)), 1);
    assert_eq!(count(root, |value| matches!(value, NodeValue::Link(_))), 2);
}

#[test]
fn test_generated_table_with_escaped_cells_is_a_table() {
    let row = |id: &str, cells: &[&str]| {
        Block::new(
            id,
            BlockKind::TableRow(TableRowBlock {
                cells: cells.iter().map(|c| vec![RichText::text(*c)]).collect(),
            }),
        )
    };
    let mut source = SnapshotSource::new();
    source.insert_children(
        "page",
        vec![Block::new("t", BlockKind::Table(Default::default())).with_children_flag(true)],
    );
    source.insert_children(
        "t",
        vec![
            row("r1", &["Expr", "Meaning"]),
            row("r2", &["a|b", "either\nor"]),
            row("r3", &["x"]),
        ],
    );

    let markdown = NotionToMarkdown::new(source)
        .to_markdown_document("page")
        .unwrap()
        .markdown;
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &gfm_options());

    assert_eq!(count(root, |value| matches!(value, NodeValue::Table(_))), 1);
    assert_eq!(count(root, |value| matches!(value, NodeValue::TableRow(_))), 3);
    assert_eq!(count(root, |value| matches!(value, NodeValue::TableCell)), 6);
}
