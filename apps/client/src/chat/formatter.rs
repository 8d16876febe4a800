//! Chat reply formatter. Turns an assistant's plain-text reply into
//! display blocks.
//!
//! Supported subset, one line at a time:
//! - `#`, `##`, `###` followed by whitespace → heading of that level
//! - `-`, `*`, `•` followed by whitespace → unordered list item
//! - digits, `.`, whitespace → ordered list item
//! - blank line → ends a running list
//! - anything else → paragraph
//!
//! `**text**` inside any line becomes an emphasis span. Nothing here can
//! fail; unrecognised input degrades to paragraphs.

use serde::Serialize;

/// A run of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Emphasis(String),
}

/// Inline content of one heading, paragraph or list item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Inline>);

impl RichText {
    /// Text with emphasis markers removed.
    pub fn plain(&self) -> String {
        self.0
            .iter()
            .map(|span| match span {
                Inline::Text(t) | Inline::Emphasis(t) => t.as_str(),
            })
            .collect()
    }

    pub fn spans(&self) -> &[Inline] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: RichText },
    Paragraph { text: RichText },
    List { ordered: bool, items: Vec<RichText> },
}

struct ListRun {
    ordered: bool,
    items: Vec<RichText>,
}

enum Line<'a> {
    Heading(u8, &'a str),
    Item { ordered: bool, text: &'a str },
    Blank,
    Text(&'a str),
}

/// Formats a reply into blocks, in input order. Empty input gives no blocks.
pub fn format_reply(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut list: Option<ListRun> = None;

    for raw in content.lines() {
        match classify(raw.trim()) {
            Line::Heading(level, text) => {
                flush(&mut list, &mut blocks);
                blocks.push(Block::Heading {
                    level,
                    text: parse_inline(text),
                });
            }
            Line::Item { ordered, text } => {
                // the first item fixes the list kind for the whole run
                list.get_or_insert_with(|| ListRun {
                    ordered,
                    items: Vec::new(),
                })
                .items
                .push(parse_inline(text));
            }
            Line::Blank => flush(&mut list, &mut blocks),
            Line::Text(text) => {
                flush(&mut list, &mut blocks);
                blocks.push(Block::Paragraph {
                    text: parse_inline(text),
                });
            }
        }
    }

    flush(&mut list, &mut blocks);
    blocks
}

fn flush(list: &mut Option<ListRun>, blocks: &mut Vec<Block>) {
    if let Some(run) = list.take() {
        if !run.items.is_empty() {
            blocks.push(Block::List {
                ordered: run.ordered,
                items: run.items,
            });
        }
    }
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some((level, text)) = heading(line) {
        return Line::Heading(level, text);
    }
    if let Some(text) = bullet(line) {
        return Line::Item {
            ordered: false,
            text,
        };
    }
    if let Some(text) = numbered(line) {
        return Line::Item {
            ordered: true,
            text,
        };
    }
    Line::Text(line)
}

/// Returns the rest of `s` if it starts with whitespace, with that whitespace removed.
fn after_space(s: &str) -> Option<&str> {
    s.starts_with(char::is_whitespace).then(|| s.trim_start())
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    after_space(&line[hashes..]).map(|text| (hashes as u8, text))
}

fn bullet(line: &str) -> Option<&str> {
    let marker = line.chars().next()?;
    if !matches!(marker, '-' | '*' | '•') {
        return None;
    }
    after_space(&line[marker.len_utf8()..])
}

fn numbered(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    after_space(line[digits..].strip_prefix('.')?)
}

/// Splits `**...**` pairs into emphasis spans. An unpaired `**` stays literal.
fn parse_inline(text: &str) -> RichText {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("**") else {
            break;
        };
        push_text(&mut spans, &rest[..open]);
        if close > 0 {
            spans.push(Inline::Emphasis(inner[..close].to_string()));
        }
        rest = &inner[close + 2..];
    }
    push_text(&mut spans, rest);

    RichText(spans)
}

fn push_text(spans: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = spans.last_mut() {
        last.push_str(text);
    } else {
        spans.push(Inline::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> RichText {
        RichText(vec![Inline::Text(s.to_string())])
    }

    fn items(list: &[&str]) -> Vec<RichText> {
        list.iter().map(|s| plain(s)).collect()
    }

    #[test]
    fn test_heading_then_paragraph() {
        assert_eq!(
            format_reply("# Title\nHello"),
            vec![
                Block::Heading {
                    level: 1,
                    text: plain("Title")
                },
                Block::Paragraph {
                    text: plain("Hello")
                },
            ]
        );
    }

    #[test]
    fn test_bullets_closed_by_blank_line() {
        assert_eq!(
            format_reply("- a\n- b\n\nc"),
            vec![
                Block::List {
                    ordered: false,
                    items: items(&["a", "b"])
                },
                Block::Paragraph { text: plain("c") },
            ]
        );
    }

    #[test]
    fn test_bold_prefix() {
        assert_eq!(
            format_reply("**bold** text"),
            vec![Block::Paragraph {
                text: RichText(vec![
                    Inline::Emphasis("bold".into()),
                    Inline::Text(" text".into()),
                ])
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(format_reply("").is_empty());
        assert!(format_reply("\n  \n").is_empty());
    }

    #[test]
    fn test_numbered_list() {
        assert_eq!(
            format_reply("1. first\n2. second"),
            vec![Block::List {
                ordered: true,
                items: items(&["first", "second"])
            }]
        );
    }

    #[test]
    fn test_heading_levels_and_four_hashes() {
        let blocks = format_reply("## Two\n### Three\n#### Four\n#NoSpace");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: plain("Two")
                },
                Block::Heading {
                    level: 3,
                    text: plain("Three")
                },
                Block::Paragraph {
                    text: plain("#### Four")
                },
                Block::Paragraph {
                    text: plain("#NoSpace")
                },
            ]
        );
    }

    #[test]
    fn test_heading_flushes_running_list() {
        let blocks = format_reply("* one\n# Next\n* two");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: items(&["one"])
                },
                Block::Heading {
                    level: 1,
                    text: plain("Next")
                },
                Block::List {
                    ordered: false,
                    items: items(&["two"])
                },
            ]
        );
    }

    #[test]
    fn test_paragraph_flushes_list_and_order_is_kept() {
        let blocks = format_reply("intro\n• x\nmiddle\n3. y");
        let kinds: Vec<&str> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { .. } => "h",
                Block::Paragraph { .. } => "p",
                Block::List { .. } => "l",
            })
            .collect();
        assert_eq!(kinds, vec!["p", "l", "p", "l"]);
    }

    #[test]
    fn test_mixed_markers_merge_under_first_kind() {
        assert_eq!(
            format_reply("- a\n1. b\n* c"),
            vec![Block::List {
                ordered: false,
                items: items(&["a", "b", "c"])
            }]
        );
        assert_eq!(
            format_reply("1. a\n- b"),
            vec![Block::List {
                ordered: true,
                items: items(&["a", "b"])
            }]
        );
    }

    #[test]
    fn test_indented_and_crlf_lines_are_trimmed() {
        assert_eq!(
            format_reply("  - a\r\n  - b\r\n"),
            vec![Block::List {
                ordered: false,
                items: items(&["a", "b"])
            }]
        );
    }

    #[test]
    fn test_emphasis_in_items_and_headings() {
        let blocks = format_reply("### **Top** picks\n- **Rust** and **Go**");
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 3,
                text: RichText(vec![
                    Inline::Emphasis("Top".into()),
                    Inline::Text(" picks".into()),
                ])
            }
        );
        assert_eq!(
            blocks[1],
            Block::List {
                ordered: false,
                items: vec![RichText(vec![
                    Inline::Emphasis("Rust".into()),
                    Inline::Text(" and ".into()),
                    Inline::Emphasis("Go".into()),
                ])]
            }
        );
    }

    #[test]
    fn test_unpaired_emphasis_stays_literal() {
        let text = parse_inline("a **b** c **d");
        assert_eq!(
            text,
            RichText(vec![
                Inline::Text("a ".into()),
                Inline::Emphasis("b".into()),
                Inline::Text(" c **d".into()),
            ])
        );
        assert_eq!(text.plain(), "a b c **d");
    }

    #[test]
    fn test_lone_markers_are_paragraphs() {
        assert_eq!(format_reply("-"), vec![Block::Paragraph { text: plain("-") }]);
        assert_eq!(format_reply("12."), vec![Block::Paragraph { text: plain("12.") }]);
    }
}
