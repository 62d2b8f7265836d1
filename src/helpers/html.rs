//! Rich-text to HTML rendering
//!
//! The repository stores post bodies as structured blocks. Rendering is
//! block-level: paragraphs, headings, lists and preformatted text. Inline
//! spans are not interpreted; block text is always escaped.

use crate::cms::RichTextBlock;

/// Escape text for safe interpolation into HTML.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a sequence of rich-text blocks to HTML.
///
/// Consecutive list items are grouped under a single `<ul>` or `<ol>`.
/// Unknown block types render as paragraphs so no text is lost.
pub fn render_rich_text(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list_tag = match block.block_type.as_str() {
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

        let text = html_escape(&block.text);
        match block.block_type.as_str() {
            "heading1" => html.push_str(&format!("<h1>{}</h1>", text)),
            "heading2" => html.push_str(&format!("<h2>{}</h2>", text)),
            "heading3" => html.push_str(&format!("<h3>{}</h3>", text)),
            "heading4" => html.push_str(&format!("<h4>{}</h4>", text)),
            "heading5" => html.push_str(&format!("<h5>{}</h5>", text)),
            "heading6" => html.push_str(&format!("<h6>{}</h6>", text)),
            "preformatted" => html.push_str(&format!("<pre>{}</pre>", text)),
            "list-item" | "o-list-item" => html.push_str(&format!("<li>{}</li>", text)),
            _ => html.push_str(&format!("<p>{}</p>", text)),
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: &str, text: &str) -> RichTextBlock {
        RichTextBlock {
            block_type: block_type.to_string(),
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"ol&á"</b>"#),
            "&lt;b&gt;&quot;ol&amp;á&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_paragraphs_and_headings() {
        let blocks = vec![
            block("heading2", "Primeiro tempo"),
            block("paragraph", "O jogo começou cedo."),
        ];
        assert_eq!(
            render_rich_text(&blocks),
            "<h2>Primeiro tempo</h2><p>O jogo começou cedo.</p>"
        );
    }

    #[test]
    fn test_render_groups_list_items() {
        let blocks = vec![
            block("paragraph", "Destaques:"),
            block("list-item", "um"),
            block("list-item", "dois"),
            block("paragraph", "fim"),
        ];
        assert_eq!(
            render_rich_text(&blocks),
            "<p>Destaques:</p><ul><li>um</li><li>dois</li></ul><p>fim</p>"
        );
    }

    #[test]
    fn test_render_escapes_markup_in_text() {
        let blocks = vec![block("paragraph", "<script>alert(1)</script>")];
        assert_eq!(
            render_rich_text(&blocks),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_unknown_block_type_renders_as_paragraph() {
        let blocks = vec![block("embed", "conteúdo")];
        assert_eq!(render_rich_text(&blocks), "<p>conteúdo</p>");
    }
}
