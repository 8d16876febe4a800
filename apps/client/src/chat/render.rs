//! Plain-terminal rendering of formatted replies.

use std::fmt::Write;

use crate::chat::formatter::{Block, Inline, RichText};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders blocks as terminal text. With `ansi` off, emphasis is dropped
/// rather than shown as markers.
pub fn render_blocks(blocks: &[Block], ansi: bool) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let rule = if *level == 1 { '=' } else { '-' };
                let line = render_inline(text, ansi);
                let width = text.plain().chars().count();
                let _ = writeln!(out, "{line}");
                let _ = writeln!(out, "{}", rule.to_string().repeat(width));
            }
            Block::Paragraph { text } => {
                let _ = writeln!(out, "{}", render_inline(text, ansi));
            }
            Block::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", i + 1)
                    } else {
                        "•".to_string()
                    };
                    let _ = writeln!(out, "  {marker} {}", render_inline(item, ansi));
                }
            }
        }
    }
    out
}

fn render_inline(text: &RichText, ansi: bool) -> String {
    text.spans()
        .iter()
        .map(|span| match span {
            Inline::Text(t) => t.clone(),
            Inline::Emphasis(t) if ansi => format!("{BOLD}{t}{RESET}"),
            Inline::Emphasis(t) => t.clone(),
        })
        .collect()
}
