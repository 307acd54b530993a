//! Inline rich text spans and their style annotations.
//!
//! Spans are parsed leniently: a span whose structured payload cannot be read still keeps
//! its `plain_text`, and the renderer falls back to it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text color applied to a span. Unknown colors degrade to [`Color::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
    #[default]
    #[serde(other)]
    Default,
}

impl Color {
    /// CSS declaration for this color, or `None` for the default color.
    pub fn css(self) -> Option<String> {
        let (property, name) = match self {
            Color::Default => return None,
            Color::Gray => ("color", "gray"),
            Color::Brown => ("color", "brown"),
            Color::Orange => ("color", "orange"),
            Color::Yellow => ("color", "yellow"),
            Color::Green => ("color", "green"),
            Color::Blue => ("color", "blue"),
            Color::Purple => ("color", "purple"),
            Color::Pink => ("color", "pink"),
            Color::Red => ("color", "red"),
            Color::GrayBackground => ("background-color", "gray"),
            Color::BrownBackground => ("background-color", "brown"),
            Color::OrangeBackground => ("background-color", "orange"),
            Color::YellowBackground => ("background-color", "yellow"),
            Color::GreenBackground => ("background-color", "green"),
            Color::BlueBackground => ("background-color", "blue"),
            Color::PurpleBackground => ("background-color", "purple"),
            Color::PinkBackground => ("background-color", "pink"),
            Color::RedBackground => ("background-color", "red"),
        };
        Some(format!("{property}: {name}"))
    }
}

/// Style flags carried by every span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn is_plain(&self) -> bool {
        *self == Annotations::default()
    }
}

/// The kind-specific part of a span.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanKind {
    Text { content: String, link: Option<String> },
    Equation { expression: String },
    Mention,
    /// A span kind this crate does not know, or one whose payload was malformed.
    Unknown(String),
}

/// One inline run of rich text.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub kind: SpanKind,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichText {
    /// Unstyled text span.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        RichText {
            plain_text: content.clone(),
            kind: SpanKind::Text {
                content,
                link: None,
            },
            annotations: Annotations::default(),
            href: None,
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        RichText {
            plain_text: expression.clone(),
            kind: SpanKind::Equation { expression },
            annotations: Annotations::default(),
            href: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        if !matches!(self.kind, SpanKind::Equation { .. }) {
            self.annotations = annotations;
        }
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// The hyperlink for this span: `href` first, then the text payload's own link.
    pub fn link(&self) -> Option<&str> {
        self.href.as_deref().or(match &self.kind {
            SpanKind::Text { link, .. } => link.as_deref(),
            _ => None,
        })
    }

    fn from_value(value: &Value) -> Self {
        let span_type = value.get("type").and_then(Value::as_str).unwrap_or("");
        let plain_text = value
            .get("plain_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let href = value
            .get("href")
            .and_then(Value::as_str)
            .map(str::to_string);
        let annotations = value
            .get("annotations")
            .and_then(|raw| Annotations::deserialize(raw).ok())
            .unwrap_or_default();

        let kind = match span_type {
            "text" => value
                .get("text")
                .and_then(|raw| TextPayload::deserialize(raw).ok())
                .map(|payload| SpanKind::Text {
                    content: payload.content,
                    link: payload.link.map(|link| link.url),
                }),
            "equation" => value
                .get("equation")
                .and_then(|raw| EquationPayload::deserialize(raw).ok())
                .map(|payload| SpanKind::Equation {
                    expression: payload.expression,
                }),
            "mention" => Some(SpanKind::Mention),
            _ => None,
        }
        .unwrap_or_else(|| SpanKind::Unknown(span_type.to_string()));

        let annotations = match kind {
            SpanKind::Equation { .. } => Annotations::default(),
            _ => annotations,
        };

        RichText {
            kind,
            annotations,
            plain_text,
            href,
        }
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RichText::from_value(&value))
    }
}

#[derive(Deserialize)]
struct TextPayload {
    content: String,
    #[serde(default)]
    link: Option<LinkPayload>,
}

#[derive(Deserialize)]
struct LinkPayload {
    url: String,
}

#[derive(Deserialize)]
struct EquationPayload {
    expression: String,
}

/// Concatenate the raw plain text of a span sequence.
pub fn plain_text_of(spans: &[RichText]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}
