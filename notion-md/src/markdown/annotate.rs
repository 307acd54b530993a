//! Inline markup primitives and the annotation composer.
//!
//! Wrapping order, innermost first: code, bold, italic, strikethrough, underline, color.
//! The order is fixed so identical annotation sets always produce identical markup.

use crate::model::{Annotations, Color};

/// Code span. The fence is one backtick longer than the longest run inside `text`, and is
/// padded with a space when `text` starts or ends with a backtick.
pub fn inline_code(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

pub fn italic(text: &str) -> String {
    format!("_{text}_")
}

pub fn strikethrough(text: &str) -> String {
    format!("~~{text}~~")
}

pub fn underline(text: &str) -> String {
    format!("<u>{text}</u>")
}

pub fn link(text: &str, href: &str) -> String {
    format!("[{text}]({href})")
}

pub fn color(text: &str, color: Color) -> String {
    match color.css() {
        Some(style) => format!("<span style=\"{style}\">{text}</span>"),
        None => text.to_string(),
    }
}

/// Wrap `text` in the markup for every active annotation.
///
/// Surrounding whitespace stays outside the markup; whitespace-only text is returned as is.
/// Color is only emitted when `render_colors` is set.
pub fn compose(text: &str, annotations: &Annotations, render_colors: bool) -> String {
    let core = text.trim();
    if core.is_empty() || annotations.is_plain() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];

    let mut marked = core.to_string();
    if annotations.code {
        marked = inline_code(&marked);
    }
    if annotations.bold {
        marked = bold(&marked);
    }
    if annotations.italic {
        marked = italic(&marked);
    }
    if annotations.strikethrough {
        marked = strikethrough(&marked);
    }
    if annotations.underline {
        marked = underline(&marked);
    }
    if render_colors {
        marked = color(&marked, annotations.color);
    }

    format!("{leading}{marked}{trailing}")
}
