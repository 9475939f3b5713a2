//! Event vocabulary and the sink capability.
//!
//! The parser communicates with its consumers through a flat stream of
//! open/close/leaf events over a closed node vocabulary. Sinks decide what
//! the stream means: [`crate::Tree`] materializes it, [`crate::HtmlRenderer`]
//! linearizes it into markup.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// A node in the event stream, carrying its positional arguments as
/// typed fields.
///
/// The vocabulary is closed: parser and sinks agree on exactly these
/// variants, so a sink can match exhaustively and the compiler checks
/// coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A heading with its level (`=` → 3, `==` → 2, `===` and more → 1).
    Heading {
        /// Heading level.
        level: u8,
    },
    /// A plain paragraph.
    Paragraph,
    /// An ordered (numbered) list.
    OrderedList,
    /// One item of an ordered list.
    OrderedListItem,
    /// An unordered (bulleted) list.
    UnorderedList,
    /// One item of an unordered list.
    UnorderedListItem,
    /// A definition list.
    DefinitionList,
    /// One term/definition pair of a definition list.
    DefinitionListItem,
    /// The term of a definition-list item.
    DefinitionListTerm,
    /// The definition of a definition-list item.
    DefinitionListDefinition,
    /// A fenced code block: verbatim text plus the optional language
    /// specifier from the opening fence.
    Code {
        /// Verbatim block content, lines joined with newlines.
        text: String,
        /// Language specifier, if the fence line carried one.
        language: Option<String>,
    },
    /// Wrapper around one block's worth of inline content.
    Inline,
    /// A run of plain text.
    InlineText {
        /// The text, unescaped.
        text: String,
    },
    /// A code span.
    InlineCode {
        /// The span content, not further parsed.
        text: String,
    },
    /// Emphasized inline content.
    InlineEmphasis,
    /// A link wrapping its visible inline content.
    Link {
        /// The link target.
        url: String,
    },
}

/// The fieldless counterpart of [`Node`], used for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading,
    Paragraph,
    OrderedList,
    OrderedListItem,
    UnorderedList,
    UnorderedListItem,
    DefinitionList,
    DefinitionListItem,
    DefinitionListTerm,
    DefinitionListDefinition,
    Code,
    Inline,
    InlineText,
    InlineCode,
    InlineEmphasis,
    Link,
}

impl Node {
    /// The kind of this node.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph => NodeKind::Paragraph,
            Node::OrderedList => NodeKind::OrderedList,
            Node::OrderedListItem => NodeKind::OrderedListItem,
            Node::UnorderedList => NodeKind::UnorderedList,
            Node::UnorderedListItem => NodeKind::UnorderedListItem,
            Node::DefinitionList => NodeKind::DefinitionList,
            Node::DefinitionListItem => NodeKind::DefinitionListItem,
            Node::DefinitionListTerm => NodeKind::DefinitionListTerm,
            Node::DefinitionListDefinition => NodeKind::DefinitionListDefinition,
            Node::Code { .. } => NodeKind::Code,
            Node::Inline => NodeKind::Inline,
            Node::InlineText { .. } => NodeKind::InlineText,
            Node::InlineCode { .. } => NodeKind::InlineCode,
            Node::InlineEmphasis => NodeKind::InlineEmphasis,
            Node::Link { .. } => NodeKind::Link,
        }
    }

    /// Canonical name of this node's kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl NodeKind {
    /// Canonical snake_case name, as used in tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::OrderedList => "orderedlist",
            NodeKind::OrderedListItem => "orderedlist_item",
            NodeKind::UnorderedList => "unorderedlist",
            NodeKind::UnorderedListItem => "unorderedlist_item",
            NodeKind::DefinitionList => "definitionlist",
            NodeKind::DefinitionListItem => "definitionlist_item",
            NodeKind::DefinitionListTerm => "definitionlist_item_term",
            NodeKind::DefinitionListDefinition => "definitionlist_item_definition",
            NodeKind::Code => "code",
            NodeKind::Inline => "inline",
            NodeKind::InlineText => "inline_text",
            NodeKind::InlineCode => "inline_code",
            NodeKind::InlineEmphasis => "inline_emphasis",
            NodeKind::Link => "link",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Node {
    /// Name plus arguments, e.g. `heading(3)` or `inline_text("word")`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Heading { level } => write!(f, "heading({level})"),
            Node::Code {
                text,
                language: Some(language),
            } => write!(f, "code({text:?}, {language:?})"),
            Node::Code {
                text,
                language: None,
            } => write!(f, "code({text:?})"),
            Node::InlineText { text } => write!(f, "inline_text({text:?})"),
            Node::InlineCode { text } => write!(f, "inline_code({text:?})"),
            Node::Link { url } => write!(f, "link({url:?})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Receiver of the parser's event stream.
///
/// Implementations must treat the stream as well-formed nesting: every
/// `open` is matched by exactly one `close`, last-in-first-out. The parser
/// upholds this; sinks may assert it.
pub trait EventSink {
    /// Begin a new node. Subsequent events belong to it until the
    /// matching [`close`](EventSink::close).
    fn open(&mut self, node: Node);

    /// End the most recently opened node.
    fn close(&mut self);

    /// Append a childless node: `open` immediately followed by `close`.
    #[inline]
    fn leaf(&mut self, node: Node) {
        self.open(node);
        self.close();
    }

    /// Open a node and return a guard that closes it on drop.
    ///
    /// This keeps open/close balanced no matter how the enclosing block
    /// exits.
    ///
    /// # Example
    /// ```
    /// use minimark::{EventSink, Node, Tree};
    ///
    /// let mut tree = Tree::new();
    /// {
    ///     let mut para = tree.scope(Node::Paragraph);
    ///     para.leaf(Node::InlineText { text: "hi".into() });
    /// } // paragraph closed here
    /// assert_eq!(tree.dump(), "paragraph\n  inline_text(\"hi\")");
    /// ```
    #[inline]
    fn scope(&mut self, node: Node) -> NodeScope<'_, Self>
    where
        Self: Sized,
    {
        self.open(node);
        NodeScope { sink: self }
    }
}

/// Guard for an open node; closes it when dropped.
///
/// Dereferences to the underlying sink, so nested scopes chain naturally:
/// `item.scope(Node::Paragraph)`.
pub struct NodeScope<'a, S: EventSink> {
    sink: &'a mut S,
}

impl<S: EventSink> Deref for NodeScope<'_, S> {
    type Target = S;

    #[inline]
    fn deref(&self) -> &S {
        self.sink
    }
}

impl<S: EventSink> DerefMut for NodeScope<'_, S> {
    #[inline]
    fn deref_mut(&mut self) -> &mut S {
        self.sink
    }
}

impl<S: EventSink> Drop for NodeScope<'_, S> {
    #[inline]
    fn drop(&mut self) {
        self.sink.close();
    }
}
