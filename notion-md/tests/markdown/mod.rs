//! Checks that generated Markdown is read back as intended by a CommonMark parser.

mod commonmark;
