//! Article text preparation.
//!
//! Entries arrive as HTML fragments; the session's article view wants plain
//! scrollable text. Articles are rendered once at a fixed width rather than
//! re-flowed on every resize.

use crate::domain::Entry;

/// Column width articles are wrapped at.
pub const RENDER_WIDTH: usize = 78;

/// Build the full displayable text for an entry: title, metadata header,
/// separator, then the HTML-stripped body wrapped to [`RENDER_WIDTH`].
pub fn article_text(entry: &Entry) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(entry.display_title().to_string());
    lines.push(String::new());

    if let Some(author) = &entry.author {
        lines.push(format!("By: {}", author));
    }
    if let Some(date) = entry.published_at {
        lines.push(format!("Date: {}", date.format("%Y-%m-%d %H:%M")));
    }
    if let Some(link) = &entry.link {
        lines.push(format!("Link: {}", link));
    }
    lines.push(String::new());
    lines.push("─".repeat(RENDER_WIDTH));
    lines.push(String::new());

    let body = strip_html(entry.display_content());
    lines.extend(wrap(&body, RENDER_WIDTH));

    lines.join("\n")
}

/// Drop tags and collapse whitespace runs into single spaces.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    result.trim().to_string()
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
