//! minimark: a lightweight markdown-like text parser.
//!
//! Parsing is decoupled from output: the parser turns text into a stream
//! of open/close/leaf events over a closed node vocabulary, and any
//! [`EventSink`] can consume the stream. Two sinks ship with the crate —
//! [`Tree`] materializes the events into a queryable tree, and
//! [`HtmlRenderer`] linearizes them into an HTML fragment. A tree can be
//! replayed into any other sink.
//!
//! # Grammar
//!
//! Block level:
//!
//! ````text
//! === heading 1
//! == heading 2
//! = heading 3
//!
//! plain text paragraph
//!
//! * unordered list
//!
//! 1. ordered list
//!
//!   * nested lists by indentation
//!
//! term of definition list
//! : definition text
//!
//! ```language
//! verbatim code
//! ```
//! ````
//!
//! Inline level: `*emphasis*`, `` `code` ``, `[url]`, `[url link text]`.
//!
//! Block quotes and tables are not supported, and HTML escaping covers
//! only `&`, `<`, `>` and `"` in attributes.
//!
//! # Example
//! ```
//! let html = minimark::to_html("= Hello\n\nSome *emphatic* text.");
//! assert_eq!(html, "<h3>Hello</h3>\n<p>Some <em>emphatic</em> text.</p>\n");
//! ```

pub mod block;
pub mod escape;
pub mod event;
pub mod inline;
pub mod render;
pub mod tree;

// Re-export primary types
pub use block::Parser;
pub use event::{EventSink, Node, NodeKind, NodeScope};
pub use render::HtmlRenderer;
pub use tree::{Descendants, Tree, TreeNode};

/// Convert markdown-like text to an HTML fragment.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = minimark::to_html("= Hello\n\nWorld");
/// assert!(html.contains("<h3>Hello</h3>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn to_html(input: &str) -> String {
    let mut renderer = HtmlRenderer::with_capacity_for(input.len());
    Parser::new().parse(input, &mut renderer);
    renderer.into_string()
}

/// Parse markdown-like text into a queryable [`Tree`].
///
/// # Example
/// ```
/// use minimark::NodeKind;
///
/// let tree = minimark::to_tree("* a\n* b");
/// assert_eq!(tree.find(NodeKind::UnorderedListItem).count(), 2);
/// ```
pub fn to_tree(input: &str) -> Tree {
    let mut tree = Tree::new();
    Parser::new().parse(input, &mut tree);
    tree
}
