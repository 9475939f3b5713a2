//! Block parser implementation.

use smallvec::SmallVec;

use crate::event::{EventSink, Node};
use crate::inline;

/// Kind of list a frame tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
    Definition,
}

impl ListKind {
    fn list_node(self) -> Node {
        match self {
            ListKind::Ordered => Node::OrderedList,
            ListKind::Unordered => Node::UnorderedList,
            ListKind::Definition => Node::DefinitionList,
        }
    }

    fn item_node(self) -> Node {
        match self {
            ListKind::Ordered => Node::OrderedListItem,
            ListKind::Unordered => Node::UnorderedListItem,
            ListKind::Definition => Node::DefinitionListItem,
        }
    }

    /// Does `line` start an item of this list kind?
    fn is_item(self, line: &str) -> bool {
        match self {
            ListKind::Ordered => is_ordered_item(line),
            ListKind::Unordered => is_unordered_item(line),
            // Definition items span two lines; their buffers never split.
            ListKind::Definition => false,
        }
    }
}

/// One currently open list.
#[derive(Debug)]
struct ListFrame {
    kind: ListKind,
    indent: usize,
}

/// The block-level parser.
///
/// Drives an [`EventSink`] from raw text. The only session state is the
/// stack of open list frames, reset at the start of every parse; one
/// instance must not be shared across concurrent parses.
///
/// # Example
/// ```
/// use minimark::{HtmlRenderer, Parser};
///
/// let mut renderer = HtmlRenderer::new();
/// Parser::new().parse("= Title\n\nBody text.", &mut renderer);
/// assert_eq!(renderer.html(), "<h3>Title</h3>\n<p>Body text.</p>\n");
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    lists: SmallVec<[ListFrame; 4]>,
}

impl Parser {
    /// Create a parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`, emitting events to `sink`.
    pub fn parse<S: EventSink>(&mut self, text: &str, sink: &mut S) {
        self.parse_lines(text.lines(), sink);
    }

    /// Parse line by line; the lines may be produced lazily.
    ///
    /// Every `open` emitted to the sink is matched by a `close` before
    /// this returns.
    pub fn parse_lines<'a, I, S>(&mut self, lines: I, sink: &mut S)
    where
        I: IntoIterator<Item = &'a str>,
        S: EventSink,
    {
        self.lists.clear();
        let mut lines = lines.into_iter();
        let mut para: Vec<&'a str> = Vec::new();
        while let Some(line) = lines.next() {
            if is_fence(line) {
                if !para.is_empty() {
                    self.parse_paragraph(&para, sink);
                    para.clear();
                }
                let indent = indent_of(line);
                let specifier = line.trim_start_matches(['`', ' ']).trim_end();
                let language = (!specifier.is_empty()).then(|| specifier.to_string());
                // Consume verbatim content from the same iterator until a
                // closing fence or end of input.
                let mut code: Vec<&'a str> = Vec::new();
                for line in lines.by_ref() {
                    if is_fence(line) {
                        break;
                    }
                    code.push(line);
                }
                self.handle_lists(indent, None, sink);
                sink.leaf(Node::Code {
                    text: code.join("\n"),
                    language,
                });
            } else if line.trim().is_empty() {
                if !para.is_empty() {
                    self.parse_paragraph(&para, sink);
                    para.clear();
                }
            } else {
                para.push(line);
            }
        }
        if !para.is_empty() {
            self.parse_paragraph(&para, sink);
        }
        // Nothing follows that could close remaining frames, so close
        // them here; the stream must end balanced.
        while self.lists.pop().is_some() {
            sink.close();
        }
    }

    /// Dispatch one group of lines with no blank lines in between.
    fn parse_paragraph<S: EventSink>(&mut self, lines: &[&str], sink: &mut S) {
        let indent = indent_of(lines[0]);
        if lines[0].trim_start().starts_with('=') {
            self.handle_lists(indent, None, sink);
            self.parse_heading(lines, sink);
        } else if is_unordered_item(lines[0]) {
            self.handle_lists(indent, Some(ListKind::Unordered), sink);
            self.parse_list(lines, ListKind::Unordered, sink);
        } else if is_ordered_item(lines[0]) {
            self.handle_lists(indent, Some(ListKind::Ordered), sink);
            self.parse_list(lines, ListKind::Ordered, sink);
        } else if is_definition_item(lines) {
            self.handle_lists(indent, Some(ListKind::Definition), sink);
            self.parse_definition(lines, sink);
        } else {
            self.handle_lists(indent, None, sink);
            let mut para = sink.scope(Node::Paragraph);
            inline::parse_lines(&mut *para, lines);
        }
    }

    fn parse_heading<S: EventSink>(&mut self, lines: &[&str], sink: &mut S) {
        // Level from the leading run of '='/space characters: one '=' is
        // the smallest heading (h3), three or more the largest (h1).
        let stripped = lines[0].trim_start_matches(['=', ' ']);
        let prefix = &lines[0][..lines[0].len() - stripped.len()];
        let level = (4 - prefix.matches('=').count().min(3)) as u8;

        let mut content: Vec<&str> = Vec::with_capacity(lines.len());
        content.push(lines[0].trim_matches(['=', ' ']));
        content.extend_from_slice(&lines[1..]);

        let mut heading = sink.scope(Node::Heading { level });
        inline::parse_lines(&mut *heading, &content);
    }

    /// Parse an ordered or unordered list buffer.
    ///
    /// The buffer splits into items at prefixed lines that do not exceed
    /// the list's own indent; deeper prefixed lines become a nested list
    /// inside the item they follow.
    fn parse_list<S: EventSink>(&mut self, lines: &[&str], kind: ListKind, sink: &mut S) {
        let base = indent_of(lines[0]);

        let mut items: Vec<Vec<&str>> = Vec::new();
        let mut item: Vec<&str> = Vec::new();
        for &line in lines {
            if kind.is_item(line) && indent_of(line) <= base {
                if !item.is_empty() {
                    items.push(std::mem::take(&mut item));
                }
                item.push(item_content(line));
            } else {
                item.push(line);
            }
        }
        if !item.is_empty() {
            items.push(item);
        }

        // A lone item gets an inner paragraph; separate items are a tight
        // list with inline content directly in each item.
        let paragraph_item = items.len() == 1;
        for item in &items {
            let nested_at = item.iter().position(|line| {
                (is_unordered_item(line) || is_ordered_item(line)) && indent_of(line) > base
            });
            let (content, nested) = match nested_at {
                Some(at) => (&item[..at], Some(&item[at..])),
                None => (&item[..], None),
            };

            let mut scope = sink.scope(kind.item_node());
            if paragraph_item {
                let mut para = scope.scope(Node::Paragraph);
                inline::parse_lines(&mut *para, content);
            } else {
                inline::parse_lines(&mut *scope, content);
            }
            if let Some(nested) = nested {
                self.parse_paragraph(nested, &mut *scope);
                self.close_deeper_than(base, &mut *scope);
            }
        }
    }

    fn parse_definition<S: EventSink>(&mut self, lines: &[&str], sink: &mut S) {
        let term = lines[0];
        // Everything through the first colon is the marker.
        let first = lines[1].split_once(':').map_or("", |(_, rest)| rest);
        let mut definition: Vec<&str> = Vec::with_capacity(lines.len() - 1);
        definition.push(first);
        definition.extend_from_slice(&lines[2..]);

        let mut item = sink.scope(Node::DefinitionListItem);
        {
            let mut term_scope = item.scope(Node::DefinitionListTerm);
            inline::parse_lines(&mut *term_scope, &[term]);
        }
        let mut def_scope = item.scope(Node::DefinitionListDefinition);
        inline::parse_lines(&mut *def_scope, &definition);
    }

    /// Close ongoing lists or start new lists as needed.
    ///
    /// With a wanted kind and everything open shallower than `indent`, a
    /// new frame is pushed (a nested list). Otherwise frames deeper than
    /// `indent` are closed, and a frame at exactly `indent` whose kind
    /// differs is replaced (or just closed when no kind is wanted).
    fn handle_lists<S: EventSink>(
        &mut self,
        indent: usize,
        wanted: Option<ListKind>,
        sink: &mut S,
    ) {
        if let Some(kind) = wanted {
            if self.lists.last().is_none_or(|frame| frame.indent < indent) {
                self.lists.push(ListFrame { kind, indent });
                sink.open(kind.list_node());
                return;
            }
        }
        while let Some(frame) = self.lists.last() {
            if frame.indent > indent {
                self.lists.pop();
                sink.close();
                continue;
            }
            if frame.indent == indent && wanted != Some(frame.kind) {
                self.lists.pop();
                sink.close();
                if let Some(kind) = wanted {
                    self.lists.push(ListFrame { kind, indent });
                    sink.open(kind.list_node());
                }
            }
            break;
        }
    }

    /// Close every frame opened deeper than `indent`.
    fn close_deeper_than<S: EventSink>(&mut self, indent: usize, sink: &mut S) {
        while self.lists.last().is_some_and(|frame| frame.indent > indent) {
            self.lists.pop();
            sink.close();
        }
    }
}

/// Count of leading whitespace characters.
fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Split a line into its first whitespace-delimited token and the rest,
/// requiring non-empty content after the token.
fn split_prefix(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let end = trimmed.find(char::is_whitespace)?;
    let rest = trimmed[end..].trim_start();
    if rest.is_empty() {
        None
    } else {
        Some((&trimmed[..end], rest))
    }
}

fn is_unordered_item(line: &str) -> bool {
    split_prefix(line).is_some_and(|(prefix, _)| prefix == "*")
}

fn is_ordered_item(line: &str) -> bool {
    split_prefix(line).is_some_and(|(prefix, _)| {
        prefix
            .strip_suffix('.')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    })
}

fn is_definition_item(lines: &[&str]) -> bool {
    lines.len() > 1 && lines[1].trim_start().starts_with(": ")
}

fn item_content(line: &str) -> &str {
    split_prefix(line).map_or("", |(_, rest)| rest)
}
