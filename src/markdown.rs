//! Metadata extraction from Markdown bodies.
//!
//! Nothing here renders HTML. The body is walked as a pulldown-cmark event
//! stream to pull out the first heading (a title fallback) and a plain-text
//! excerpt for post listings.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Default excerpt length in characters, before the ellipsis.
pub const EXCERPT_LENGTH: usize = 140;

/// Text of the first heading of any level, if there is one.
pub fn first_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                let title = text.trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
                in_heading = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }
    None
}

/// Plain text of the body, whitespace-collapsed and cut at a word boundary
/// after at most `max_chars` characters. Truncated excerpts end in `…`.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new(body) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak | Event::HardBreak => plain.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => plain.push(' '),
            _ => {}
        }
    }

    let words: Vec<&str> = plain.split_whitespace().collect();
    let mut out = String::new();
    for word in &words {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > max_chars {
            if out.is_empty() {
                out = word.chars().take(max_chars).collect();
            }
            out.push('…');
            return out;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
