//! HTML rendering sink.
//!
//! Maps every open/close event pair onto matching start/end tags and
//! linearizes them into a string buffer. Block-level end tags are
//! newline-terminated for readable output; inline tags are not. The
//! produced markup is a fragment, not a full document.

use smallvec::SmallVec;

use crate::escape;
use crate::event::{EventSink, Node};

/// An [`EventSink`] that renders the event stream to an HTML fragment.
///
/// Open events remember their node on an internal stack so the matching
/// close can emit the right end tag.
///
/// # Example
/// ```
/// use minimark::{EventSink, HtmlRenderer, Node};
///
/// let mut renderer = HtmlRenderer::new();
/// {
///     let mut para = renderer.scope(Node::Paragraph);
///     para.leaf(Node::InlineText { text: "1 < 2".into() });
/// }
/// assert_eq!(renderer.html(), "<p>1 &lt; 2</p>\n");
/// ```
#[derive(Default)]
pub struct HtmlRenderer {
    out: String,
    stack: SmallVec<[Node; 8]>,
}

impl HtmlRenderer {
    /// Create a renderer with a small default buffer.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a renderer pre-sized for an expected input length.
    ///
    /// Typical output is ~1.25x input size.
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self::with_capacity(input_len + input_len / 4)
    }

    /// Create a renderer with an explicit buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            stack: SmallVec::new(),
        }
    }

    /// The rendered fragment so far.
    #[inline]
    pub fn html(&self) -> &str {
        &self.out
    }

    /// Consume the renderer and take the rendered fragment.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Clear the output for reuse (keeps capacity).
    ///
    /// Also resets the open-node stack.
    pub fn clear(&mut self) {
        self.out.clear();
        self.stack.clear();
    }

    #[inline]
    fn tag(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
    }

    #[inline]
    fn end_tag(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    #[inline]
    fn nl(&mut self) {
        self.out.push('\n');
    }

    #[inline]
    fn text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text);
    }

    fn heading_tag(&mut self, level: u8, end: bool) {
        debug_assert!((1..=6).contains(&level));
        self.out.push_str(if end { "</h" } else { "<h" });
        self.out.push((b'0' + level) as char);
        self.out.push('>');
    }

    fn start(&mut self, node: &Node) {
        match node {
            Node::Heading { level } => self.heading_tag(*level, false),
            Node::Paragraph => self.tag("p"),
            Node::OrderedList => {
                self.tag("ol");
                self.nl();
            }
            Node::OrderedListItem | Node::UnorderedListItem => self.tag("li"),
            Node::UnorderedList => {
                self.tag("ul");
                self.nl();
            }
            Node::DefinitionList => {
                self.tag("dl");
                self.nl();
            }
            Node::DefinitionListItem => {}
            Node::DefinitionListTerm => self.tag("dt"),
            Node::DefinitionListDefinition => self.tag("dd"),
            Node::Code { text, .. } => {
                // The language specifier travels on the event but is not
                // rendered.
                self.tag("code");
                self.tag("pre");
                self.text(text);
            }
            Node::Inline => {}
            Node::InlineText { text } => self.text(text),
            Node::InlineCode { text } => {
                self.tag("code");
                self.text(text);
            }
            Node::InlineEmphasis => self.tag("em"),
            Node::Link { url } => {
                self.out.push_str("<a href=\"");
                escape::escape_attr_into(&mut self.out, url);
                self.out.push_str("\">");
            }
        }
    }

    fn end(&mut self, node: &Node) {
        match node {
            Node::Heading { level } => {
                self.heading_tag(*level, true);
                self.nl();
            }
            Node::Paragraph => {
                self.end_tag("p");
                self.nl();
            }
            Node::OrderedList => {
                self.end_tag("ol");
                self.nl();
            }
            Node::OrderedListItem | Node::UnorderedListItem => {
                self.end_tag("li");
                self.nl();
            }
            Node::UnorderedList => {
                self.end_tag("ul");
                self.nl();
            }
            Node::DefinitionList => {
                self.end_tag("dl");
                self.nl();
            }
            Node::DefinitionListItem => {}
            Node::DefinitionListTerm => {
                self.end_tag("dt");
                self.nl();
            }
            Node::DefinitionListDefinition => {
                self.end_tag("dd");
                self.nl();
            }
            Node::Code { .. } => {
                self.end_tag("pre");
                self.end_tag("code");
                self.nl();
            }
            Node::Inline | Node::InlineText { .. } => {}
            Node::InlineCode { .. } => self.end_tag("code"),
            Node::InlineEmphasis => self.end_tag("em"),
            Node::Link { .. } => self.end_tag("a"),
        }
    }
}

impl EventSink for HtmlRenderer {
    fn open(&mut self, node: Node) {
        self.start(&node);
        self.stack.push(node);
    }

    fn close(&mut self) {
        let node = self
            .stack
            .pop()
            .expect("HtmlRenderer::close without a matching open");
        self.end(&node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph() {
        let mut r = HtmlRenderer::new();
        let mut p = r.scope(Node::Paragraph);
        p.leaf(Node::InlineText {
            text: "Hello".into(),
        });
        drop(p);
        assert_eq!(r.html(), "<p>Hello</p>\n");
    }

    #[test]
    fn heading_levels() {
        for level in 1..=3u8 {
            let mut r = HtmlRenderer::new();
            r.leaf(Node::Heading { level });
            assert_eq!(r.html(), format!("<h{level}></h{level}>\n"));
        }
    }

    #[test]
    fn code_block_tags() {
        let mut r = HtmlRenderer::new();
        r.leaf(Node::Code {
            text: "x = 1".into(),
            language: Some("python".into()),
        });
        // code wraps pre, and the specifier stays out of the markup
        assert_eq!(r.html(), "<code><pre>x = 1</pre></code>\n");
    }

    #[test]
    fn code_block_escapes_content() {
        let mut r = HtmlRenderer::new();
        r.leaf(Node::Code {
            text: "<script>".into(),
            language: None,
        });
        assert_eq!(r.html(), "<code><pre>&lt;script&gt;</pre></code>\n");
    }

    #[test]
    fn link_escapes_url_attribute() {
        let mut r = HtmlRenderer::new();
        let mut link = r.scope(Node::Link {
            url: "https://example.com?a=1&b=\"2\"".into(),
        });
        link.leaf(Node::InlineText {
            text: "here".into(),
        });
        drop(link);
        assert_eq!(
            r.html(),
            "<a href=\"https://example.com?a=1&amp;b=&quot;2&quot;\">here</a>"
        );
    }

    #[test]
    fn inline_nodes_emit_no_newlines() {
        let mut r = HtmlRenderer::new();
        let mut em = r.scope(Node::InlineEmphasis);
        em.leaf(Node::InlineCode {
            text: "f()".into(),
        });
        drop(em);
        assert_eq!(r.html(), "<em><code>f()</code></em>");
    }

    #[test]
    fn definition_list_markup() {
        let mut r = HtmlRenderer::new();
        {
            let mut dl = r.scope(Node::DefinitionList);
            let mut item = dl.scope(Node::DefinitionListItem);
            {
                let mut term = item.scope(Node::DefinitionListTerm);
                term.leaf(Node::InlineText {
                    text: "term".into(),
                });
            }
            let mut def = item.scope(Node::DefinitionListDefinition);
            def.leaf(Node::InlineText {
                text: "definition".into(),
            });
        }
        assert_eq!(
            r.html(),
            "<dl>\n<dt>term</dt>\n<dd>definition</dd>\n</dl>\n"
        );
    }

    #[test]
    fn clear_resets_for_reuse() {
        let mut r = HtmlRenderer::new();
        r.leaf(Node::Paragraph);
        r.clear();
        assert_eq!(r.html(), "");
        r.leaf(Node::Paragraph);
        assert_eq!(r.html(), "<p></p>\n");
    }

    #[test]
    #[should_panic(expected = "without a matching open")]
    fn close_without_open_panics() {
        let mut r = HtmlRenderer::new();
        r.close();
    }
}
