use notion_md::model::{RichText, TextBlock};
use notion_md::{
    Block, BlockKind, BlockPage, BlockSource, ConvertError, NotionToMarkdown, SnapshotSource,
    SourceError,
};
use std::sync::Mutex;

fn paragraph(id: &str) -> Block {
    Block::new(
        id,
        BlockKind::Paragraph(TextBlock::new(vec![RichText::text(id)])),
    )
}

/// Serves fixed pages and records every request.
struct ScriptedSource {
    pages: Vec<BlockPage>,
    requests: Mutex<Vec<Option<String>>>,
}

impl BlockSource for ScriptedSource {
    fn list_children(
        &self,
        _block_id: &str,
        cursor: Option<&str>,
    ) -> Result<BlockPage, SourceError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(cursor.map(str::to_string));
        self.pages
            .get(requests.len() - 1)
            .cloned()
            .ok_or_else(|| SourceError::Transport("no more scripted pages".into()))
    }
}

#[test]
fn test_cursor_is_followed_until_has_more_is_false() {
    let source = ScriptedSource {
        pages: vec![
            BlockPage::continued(vec![paragraph("one")], "after-one"),
            BlockPage::continued(vec![paragraph("two")], "after-two"),
            BlockPage::last(vec![paragraph("three")]),
        ],
        requests: Mutex::new(Vec::new()),
    };

    let converter = NotionToMarkdown::new(&source);
    let document = converter.to_markdown_document("page").unwrap();

    assert_eq!(document.markdown, "one\n\ntwo\n\nthree");
    assert_eq!(
        *source.requests.lock().unwrap(),
        vec![
            None,
            Some("after-one".to_string()),
            Some("after-two".to_string())
        ]
    );
}

#[test]
fn test_has_more_without_cursor_stops() {
    let mut truncated = BlockPage::last(vec![paragraph("only")]);
    truncated.has_more = true;
    let source = ScriptedSource {
        pages: vec![truncated],
        requests: Mutex::new(Vec::new()),
    };

    let document = NotionToMarkdown::new(&source)
        .to_markdown_document("page")
        .unwrap();
    assert_eq!(document.markdown, "only");
    assert_eq!(source.requests.lock().unwrap().len(), 1);
}

#[test]
fn test_transport_failure_aborts_conversion() {
    let source = ScriptedSource {
        pages: vec![BlockPage::continued(vec![paragraph("one")], "next")],
        requests: Mutex::new(Vec::new()),
    };

    let err = NotionToMarkdown::new(&source)
        .page_to_markdown("page")
        .unwrap_err();
    let ConvertError::Fetch { block_id, source } = err;
    assert_eq!(block_id, "page");
    assert!(matches!(source, SourceError::Transport(_)));
}

#[test]
fn test_snapshot_with_unknown_cursor_is_an_error() {
    let source = SnapshotSource::from_json(
        r#"{
            "children": {
                "page": [
                    { "results": [], "next_cursor": "c1", "has_more": true }
                ]
            }
        }"#,
    )
    .unwrap();

    let err = NotionToMarkdown::new(source)
        .page_to_markdown("page")
        .unwrap_err();
    assert!(err.to_string().contains("page"));
    let ConvertError::Fetch { source, .. } = err;
    assert!(matches!(source, SourceError::UnknownCursor { .. }));
}
