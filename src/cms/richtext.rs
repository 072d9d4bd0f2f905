//! Structured rich text: the CMS body format
//!
//! Bodies arrive as a flat list of typed blocks with formatting spans.
//! They flatten to plain text for word counting and render to HTML for
//! display.

use serde::Deserialize;

/// One block of a rich-text body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image blocks carry a URL instead of text
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A formatting span over a block's text, in character offsets
#[derive(Debug, Clone, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
}

/// Flatten rich text to plain text
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render rich text to HTML
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&str> = None;

    for block in blocks {
        // Consecutive list items share one list element
        let list_tag = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != list_tag {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        let body = format_spans(&block.text, &block.spans);
        match block.kind.as_str() {
            "paragraph" => html.push_str(&format!("<p>{}</p>", body)),
            "heading1" => html.push_str(&format!("<h1>{}</h1>", body)),
            "heading2" => html.push_str(&format!("<h2>{}</h2>", body)),
            "heading3" => html.push_str(&format!("<h3>{}</h3>", body)),
            "heading4" => html.push_str(&format!("<h4>{}</h4>", body)),
            "heading5" => html.push_str(&format!("<h5>{}</h5>", body)),
            "heading6" => html.push_str(&format!("<h6>{}</h6>", body)),
            "preformatted" => html.push_str(&format!("<pre>{}</pre>", body)),
            "list-item" | "o-list-item" => html.push_str(&format!("<li>{}</li>", body)),
            "image" => {
                if let Some(url) = &block.url {
                    html.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\" />",
                        escape(url),
                        escape(block.alt.as_deref().unwrap_or(""))
                    ));
                }
            }
            _ => html.push_str(&format!("<p>{}</p>", body)),
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

/// Apply formatting spans to a block's text
fn format_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut sorted: Vec<&Span> = spans.iter().collect();
    sorted.sort_by_key(|s| (s.start, std::cmp::Reverse(s.end)));

    let mut out = String::new();
    let mut pos = 0;
    for span in sorted {
        // Overlapping or out-of-range spans are dropped
        if span.start < pos || span.end > chars.len() || span.end < span.start {
            continue;
        }
        out.push_str(&escape_chars(&chars[pos..span.start]));
        let inner = escape_chars(&chars[span.start..span.end]);
        match span.kind.as_str() {
            "strong" => out.push_str(&format!("<strong>{}</strong>", inner)),
            "em" => out.push_str(&format!("<em>{}</em>", inner)),
            "hyperlink" => {
                let url = span
                    .data
                    .as_ref()
                    .and_then(|d| d.url.as_deref())
                    .unwrap_or("");
                out.push_str(&format!("<a href=\"{}\">{}</a>", escape(url), inner));
            }
            _ => out.push_str(&inner),
        }
        pos = span.end;
    }
    out.push_str(&escape_chars(&chars[pos..]));

    out
}

fn escape_chars(chars: &[char]) -> String {
    escape(&chars.iter().collect::<String>())
}

/// Escape HTML special characters
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: &str, text: &str) -> RichTextBlock {
        RichTextBlock {
            kind: kind.to_string(),
            text: text.to_string(),
            ..RichTextBlock::default()
        }
    }

    #[test]
    fn test_as_text_joins_blocks() {
        let blocks = vec![block("paragraph", "First block."), block("paragraph", "Second block.")];
        assert_eq!(as_text(&blocks), "First block. Second block.");
    }

    #[test]
    fn test_as_text_empty() {
        assert_eq!(as_text(&[]), "");
    }

    #[test]
    fn test_as_html_paragraphs_and_headings() {
        let blocks = vec![block("heading2", "Section"), block("paragraph", "Body text.")];
        assert_eq!(as_html(&blocks), "<h2>Section</h2><p>Body text.</p>");
    }

    #[test]
    fn test_as_html_groups_list_items() {
        let blocks = vec![
            block("list-item", "one"),
            block("list-item", "two"),
            block("paragraph", "after"),
        ];
        assert_eq!(
            as_html(&blocks),
            "<ul><li>one</li><li>two</li></ul><p>after</p>"
        );
    }

    #[test]
    fn test_as_html_escapes_text() {
        let blocks = vec![block("paragraph", "a < b & c")];
        assert_eq!(as_html(&blocks), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_format_spans() {
        let mut b = block("paragraph", "bold and linked");
        b.spans = vec![
            Span {
                start: 0,
                end: 4,
                kind: "strong".to_string(),
                data: None,
            },
            Span {
                start: 9,
                end: 15,
                kind: "hyperlink".to_string(),
                data: Some(SpanData {
                    url: Some("https://example.com".to_string()),
                }),
            },
        ];
        assert_eq!(
            as_html(&[b]),
            "<p><strong>bold</strong> and <a href=\"https://example.com\">linked</a></p>"
        );
    }

    #[test]
    fn test_image_block() {
        let b = RichTextBlock {
            kind: "image".to_string(),
            url: Some("https://images.example.com/banner.png".to_string()),
            alt: Some("banner".to_string()),
            ..RichTextBlock::default()
        };
        assert_eq!(
            as_html(&[b]),
            "<img src=\"https://images.example.com/banner.png\" alt=\"banner\" />"
        );
    }
}
