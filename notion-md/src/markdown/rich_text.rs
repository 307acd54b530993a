//! Renders span sequences to inline Markdown.

use super::annotate::{compose, inline_code, link};
use crate::model::{RichText, SpanKind};

/// Inline renderer. Pure: no I/O, no state beyond its settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextRenderer {
    pub render_colors: bool,
}

impl RichTextRenderer {
    pub fn new(render_colors: bool) -> Self {
        RichTextRenderer { render_colors }
    }

    /// Render every span in order, with no separators.
    pub fn render(&self, spans: &[RichText]) -> String {
        spans.iter().map(|span| self.render_span(span)).collect()
    }

    pub fn render_span(&self, span: &RichText) -> String {
        let text = match &span.kind {
            SpanKind::Equation { expression } => return inline_code(expression),
            SpanKind::Unknown(_) => return span.plain_text.clone(),
            SpanKind::Text { content, .. } => content.as_str(),
            SpanKind::Mention => span.plain_text.as_str(),
        };

        let styled = compose(text, &span.annotations, self.render_colors);
        match span.link() {
            Some(href) => link(&styled, href),
            None => styled,
        }
    }
}
