//! Tree materialization of the event stream.
//!
//! [`Tree`] is an [`EventSink`] that builds an ordered tree of owned
//! nodes, plus the query side: pre-order traversal, find-by-kind, path
//! walking, replay onto another sink, and a printable dump for tests.

use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::event::{EventSink, Node, NodeKind};
use crate::render::HtmlRenderer;

/// One node of a materialized tree: the event payload plus owned,
/// ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    node: Node,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// The event payload of this node.
    #[inline]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// The kind of this node.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// This node's children, in document order.
    #[inline]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }
}

/// An [`EventSink`] that materializes the event stream into a tree.
///
/// The root is synthetic: top-level nodes are reachable through
/// [`nodes`](Tree::nodes), and a `close` that would ascend past the root
/// is a no-op, so the root stays addressable no matter what a misbehaving
/// producer sends.
///
/// # Example
/// ```
/// use minimark::{to_tree, NodeKind};
///
/// let tree = to_tree("* one\n* two");
/// assert_eq!(tree.find(NodeKind::UnorderedListItem).count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    root: Vec<TreeNode>,
    // Child indices from the root down to the currently open node; empty
    // means the root itself is current.
    path: SmallVec<[usize; 8]>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level nodes (children of the synthetic root).
    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.root
    }

    /// Depth-first pre-order traversal over every node in the tree.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&TreeNode> = self.root.iter().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// All nodes of the given kind, at any depth, in pre-order.
    pub fn find(&self, kind: NodeKind) -> impl Iterator<Item = &TreeNode> {
        self.descendants().filter(move |n| n.kind() == kind)
    }

    /// Every node paired with its path from the root.
    ///
    /// The path runs from the top-level ancestor down to the node itself,
    /// inclusive.
    pub fn walk(&self) -> impl Iterator<Item = (Vec<&TreeNode>, &TreeNode)> {
        fn collect<'a>(
            nodes: &'a [TreeNode],
            trail: &mut Vec<&'a TreeNode>,
            out: &mut Vec<(Vec<&'a TreeNode>, &'a TreeNode)>,
        ) {
            for node in nodes {
                trail.push(node);
                out.push((trail.clone(), node));
                collect(&node.children, trail, out);
                trail.pop();
            }
        }

        let mut out = Vec::new();
        collect(&self.root, &mut Vec::new(), &mut out);
        out.into_iter()
    }

    /// Replay the whole tree onto another sink, preserving structure
    /// exactly.
    pub fn copy<S: EventSink>(&self, sink: &mut S) {
        for node in &self.root {
            Self::copy_node(node, sink);
        }
    }

    /// Replay the subtree rooted at `node` onto a sink.
    pub fn copy_node<S: EventSink>(node: &TreeNode, sink: &mut S) {
        let mut scope = sink.scope(node.node.clone());
        for child in &node.children {
            Self::copy_node(child, &mut *scope);
        }
    }

    /// Render the tree to an HTML fragment.
    pub fn html(&self) -> String {
        let mut renderer = HtmlRenderer::new();
        self.copy(&mut renderer);
        renderer.into_string()
    }

    /// Indented text representation, for debugging and tests.
    ///
    /// One node per line, two spaces per depth level.
    pub fn dump(&self) -> String {
        fn write(nodes: &[TreeNode], depth: usize, out: &mut String) {
            for node in nodes {
                if !out.is_empty() {
                    out.push('\n');
                }
                for _ in 0..depth {
                    out.push_str("  ");
                }
                let _ = write!(out, "{}", node.node);
                write(&node.children, depth + 1, out);
            }
        }

        let mut out = String::new();
        write(&self.root, 0, &mut out);
        out
    }

    fn current_children(&mut self) -> &mut Vec<TreeNode> {
        let mut children = &mut self.root;
        for &idx in &self.path {
            children = &mut children[idx].children;
        }
        children
    }
}

impl EventSink for Tree {
    fn open(&mut self, node: Node) {
        let children = self.current_children();
        children.push(TreeNode::new(node));
        let idx = children.len() - 1;
        self.path.push(idx);
    }

    fn close(&mut self) {
        // No-op at the root: the root can never be popped.
        self.path.pop();
    }
}

/// Lazy depth-first pre-order iterator over a [`Tree`].
pub struct Descendants<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<&'a TreeNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
