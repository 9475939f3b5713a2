//! Inline-level parsing.
//!
//! Three cascaded splitting passes over one block's worth of text:
//! links, then emphasis, then code spans. The order is the tie-break
//! rule: link URLs and labels may contain emphasis or code markup, but
//! emphasis markers are never read as link delimiters.

mod split;

pub use split::{SplitBracketed, SplitPairs, split_bracketed, split_pairs};

use crate::event::{EventSink, Node};

/// Parse plain-text lines with possible inline markup.
///
/// Strips each line and joins them with newlines before parsing.
pub fn parse_lines<S: EventSink>(sink: &mut S, lines: &[&str]) {
    let text = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    parse_text(sink, &text);
}

/// Parse a continuous text block with possible inline markup.
///
/// Emits an `inline` node wrapping the parsed content.
pub fn parse_text<S: EventSink>(sink: &mut S, text: &str) {
    let mut inline = sink.scope(Node::Inline);
    parse_links(&mut *inline, text);
}

/// Link pass: `[url]` or `[url label...]`.
///
/// Bracket content is split on its first whitespace run; a single token
/// serves as both URL and visible text. `[` and `]` cannot appear
/// literally inside bracket content.
fn parse_links<S: EventSink>(sink: &mut S, text: &str) {
    for (outside, inside) in split_bracketed(text, b'[', b']') {
        if !outside.is_empty() {
            parse_emphasis(sink, outside);
        }
        if inside.is_empty() {
            continue;
        }
        let content = inside.trim_start();
        if content.is_empty() {
            // Whitespace-only bracket content: nothing to link.
            continue;
        }
        let (url, label) = match content.find(char::is_whitespace) {
            None => (content, content),
            Some(pos) => {
                let rest = content[pos..].trim_start();
                if rest.is_empty() {
                    (&content[..pos], &content[..pos])
                } else {
                    (&content[..pos], rest)
                }
            }
        };
        let mut link = sink.scope(Node::Link {
            url: url.to_string(),
        });
        parse_emphasis(&mut *link, label);
    }
}

/// Emphasis pass: `*...*` pairs.
fn parse_emphasis<S: EventSink>(sink: &mut S, text: &str) {
    for (plain, emphasized) in split_pairs(text, b'*') {
        if !plain.is_empty() {
            parse_code(sink, plain);
        }
        if !emphasized.is_empty() {
            let mut emphasis = sink.scope(Node::InlineEmphasis);
            parse_code(&mut *emphasis, emphasized);
        }
    }
}

/// Code pass: `` `...` `` pairs. Code content is not parsed further.
fn parse_code<S: EventSink>(sink: &mut S, text: &str) {
    for (plain, code) in split_pairs(text, b'`') {
        if !plain.is_empty() {
            sink.leaf(Node::InlineText {
                text: plain.to_string(),
            });
        }
        if !code.is_empty() {
            sink.leaf(Node::InlineCode {
                text: code.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NodeKind;
    use crate::tree::Tree;

    fn parse(text: &str) -> Tree {
        let mut tree = Tree::new();
        parse_text(&mut tree, text);
        tree
    }

    #[test]
    fn plain_text_single_leaf() {
        let tree = parse("just words");
        assert_eq!(
            tree.dump(),
            "inline\n  inline_text(\"just words\")"
        );
    }

    #[test]
    fn emphasis_wraps_pair_content() {
        let tree = parse("an *emphatic* word");
        assert_eq!(tree.find(NodeKind::InlineEmphasis).count(), 1);
        assert_eq!(tree.find(NodeKind::InlineText).count(), 3);
    }

    #[test]
    fn lone_asterisk_is_plain_text() {
        let tree = parse("a * b");
        assert_eq!(tree.find(NodeKind::InlineEmphasis).count(), 0);
        let text = tree.find(NodeKind::InlineText).next().unwrap();
        assert_eq!(
            text.node(),
            &Node::InlineText {
                text: "a * b".into()
            }
        );
    }

    #[test]
    fn code_span_is_leaf() {
        let tree = parse("use `foo()` here");
        let code = tree.find(NodeKind::InlineCode).next().unwrap();
        assert_eq!(
            code.node(),
            &Node::InlineCode {
                text: "foo()".into()
            }
        );
        assert!(code.children().is_empty());
    }

    #[test]
    fn code_inside_emphasis() {
        let tree = parse("*a `b`*");
        let emphasis = tree.find(NodeKind::InlineEmphasis).next().unwrap();
        let kinds: Vec<_> = emphasis.children().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, [NodeKind::InlineText, NodeKind::InlineCode]);
    }

    #[test]
    fn single_token_link_is_url_and_text() {
        let tree = parse("[https://example.com]");
        let link = tree.find(NodeKind::Link).next().unwrap();
        assert_eq!(
            link.node(),
            &Node::Link {
                url: "https://example.com".into()
            }
        );
        assert_eq!(
            link.children()[0].node(),
            &Node::InlineText {
                text: "https://example.com".into()
            }
        );
    }

    #[test]
    fn two_token_link_splits_url_from_label() {
        let tree = parse("[https://example.com the site]");
        let link = tree.find(NodeKind::Link).next().unwrap();
        assert_eq!(
            link.node(),
            &Node::Link {
                url: "https://example.com".into()
            }
        );
        assert_eq!(
            link.children()[0].node(),
            &Node::InlineText {
                text: "the site".into()
            }
        );
    }

    #[test]
    fn link_label_is_emphasis_parsed() {
        let tree = parse("[url *hot* text]");
        let link = tree.find(NodeKind::Link).next().unwrap();
        let kinds: Vec<_> = link.children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            [
                NodeKind::InlineEmphasis,
                NodeKind::InlineText,
            ]
        );
    }

    #[test]
    fn link_splitting_precedes_emphasis() {
        let tree = parse("[* not emphasis *]");
        let link = tree.find(NodeKind::Link).next().unwrap();
        assert_eq!(link.node(), &Node::Link { url: "*".into() });
        assert_eq!(tree.find(NodeKind::InlineEmphasis).count(), 0);
        assert_eq!(
            link.children()[0].node(),
            &Node::InlineText {
                text: "not emphasis *".into()
            }
        );
    }

    #[test]
    fn unmatched_bracket_stays_plain() {
        let tree = parse("a [b");
        assert_eq!(tree.find(NodeKind::Link).count(), 0);
        let text = tree.find(NodeKind::InlineText).next().unwrap();
        assert_eq!(
            text.node(),
            &Node::InlineText {
                text: "a [b".into()
            }
        );
    }

    #[test]
    fn whitespace_only_brackets_produce_nothing() {
        let tree = parse("a [ ] b");
        assert_eq!(tree.find(NodeKind::Link).count(), 0);
        // The surrounding text still comes through.
        assert_eq!(tree.find(NodeKind::InlineText).count(), 2);
    }

    #[test]
    fn lines_are_stripped_and_joined() {
        let mut tree = Tree::new();
        parse_lines(&mut tree, &["  first  ", "\tsecond"]);
        let text = tree.find(NodeKind::InlineText).next().unwrap();
        assert_eq!(
            text.node(),
            &Node::InlineText {
                text: "first\nsecond".into()
            }
        );
    }
}
