//! Owned syntax tree consumed by selectors and rules.
//!
//! Parsers convert their native trees into a [`SyntaxTree`] through
//! [`TreeBuilder`]. The tree is immutable once built. Nodes are stored in
//! preorder, so arena order is document order and the descendants of a node
//! occupy one contiguous index range.

use std::fmt;
use std::ops::Range;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span. `end` is clamped so that it never precedes `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Zero-length span at `offset`, used for insertions.
    #[must_use]
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-length spans.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Byte range usable for slicing the source.
    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Line/column pair, both 1-indexed. Columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Preorder index of the node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: &'static str,
    field: Option<&'static str>,
    named: bool,
    extra: bool,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// One past the last descendant's index.
    subtree_end: usize,
}

/// An immutable syntax tree together with the source it was parsed from.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
    line_starts: Vec<usize>,
}

impl SyntaxTree {
    /// Source text the tree spans.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, anonymous tokens included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Converts a byte offset into a 1-indexed line/column.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        Position {
            line: line.max(1),
            column: offset.saturating_sub(line_start) + 1,
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A borrowed handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn at(&self, id: NodeId) -> NodeRef<'t> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }

    /// Id of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    /// Grammar kind, e.g. `class_declaration` or `(` for tokens.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.data().kind
    }

    /// Field name this node occupies in its parent, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&'static str> {
        self.data().field
    }

    /// Named nodes are grammar rules; anonymous nodes are literal tokens.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.data().named
    }

    /// Extras (comments) may appear anywhere and carry no structure.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.data().extra
    }

    /// Byte span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.data().span
    }

    /// Line/column of the first byte.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.tree.position(self.span().start)
    }

    /// Source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.tree.source.get(self.span().range()).unwrap_or("")
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Direct children, tokens and extras included.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Named children that are not extras.
    pub fn named_children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        self.children().filter(|c| c.is_named() && !c.is_extra())
    }

    /// The `index`-th named, non-extra child.
    #[must_use]
    pub fn named_child(&self, index: usize) -> Option<NodeRef<'t>> {
        self.named_children().nth(index)
    }

    /// Number of named, non-extra children.
    #[must_use]
    pub fn named_child_count(&self) -> usize {
        self.named_children().count()
    }

    /// First child stored under `field`.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.field_name() == Some(field))
    }

    /// First direct child of the given kind, tokens included.
    #[must_use]
    pub fn child_of_kind(&self, kind: &str) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// Proper descendants in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        (self.id.0 + 1..self.data().subtree_end).map(move |i| NodeRef {
            tree,
            id: NodeId(i),
        })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{}@{}..{}", self.kind(), span.start, span.end)
    }
}

/// Errors raised while assembling a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A node span does not fit in the source.
    #[error("span {start}..{end} is outside the source ({len} bytes)")]
    SpanOutOfBounds {
        /// Span start.
        start: usize,
        /// Span end.
        end: usize,
        /// Source length.
        len: usize,
    },
    /// A second top-level node was opened.
    #[error("a syntax tree has exactly one root node")]
    MultipleRoots,
    /// `close()` was called with no open node.
    #[error("close() without a matching open()")]
    UnbalancedClose,
    /// `finish()` was called with nodes still open.
    #[error("{0} node(s) left open")]
    Unclosed(usize),
    /// No node was added.
    #[error("syntax tree has no nodes")]
    Empty,
}

/// Description of one node handed to [`TreeBuilder::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    kind: &'static str,
    field: Option<&'static str>,
    named: bool,
    extra: bool,
    span: Span,
}

impl NodeSpec {
    /// A named (grammar rule) node.
    #[must_use]
    pub fn named(kind: &'static str, span: Span) -> Self {
        Self {
            kind,
            field: None,
            named: true,
            extra: false,
            span,
        }
    }

    /// An anonymous token such as `(` or `,`.
    #[must_use]
    pub fn token(kind: &'static str, span: Span) -> Self {
        Self {
            named: false,
            ..Self::named(kind, span)
        }
    }

    /// Sets the field name the node occupies in its parent.
    #[must_use]
    pub fn field(mut self, name: &'static str) -> Self {
        self.field = Some(name);
        self
    }

    /// Marks the node as an extra (e.g. a comment).
    #[must_use]
    pub fn extra(mut self, extra: bool) -> Self {
        self.extra = extra;
        self
    }
}

/// Incremental preorder builder for [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Starts a tree over `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Opens a node as the last child of the currently open node.
    ///
    /// # Errors
    ///
    /// Fails if the span lies outside the source or a second root is opened.
    pub fn open(&mut self, spec: NodeSpec) -> Result<NodeId, TreeError> {
        let len = self.source.len();
        if spec.span.start > spec.span.end || spec.span.end > len {
            return Err(TreeError::SpanOutOfBounds {
                start: spec.span.start,
                end: spec.span.end,
                len,
            });
        }

        let parent = self.stack.last().copied();
        if parent.is_none() && !self.nodes.is_empty() {
            return Err(TreeError::MultipleRoots);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: spec.kind,
            field: spec.field,
            named: spec.named,
            extra: spec.extra,
            span: spec.span,
            parent,
            children: Vec::new(),
            subtree_end: id.0 + 1,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        self.stack.push(id);
        Ok(id)
    }

    /// Closes the most recently opened node.
    ///
    /// # Errors
    ///
    /// Fails if no node is open.
    pub fn close(&mut self) -> Result<(), TreeError> {
        let id = self.stack.pop().ok_or(TreeError::UnbalancedClose)?;
        self.nodes[id.0].subtree_end = self.nodes.len();
        Ok(())
    }

    /// Opens and immediately closes a childless node.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::open`].
    pub fn leaf(&mut self, spec: NodeSpec) -> Result<NodeId, TreeError> {
        let id = self.open(spec)?;
        self.close()?;
        Ok(id)
    }

    /// Finalizes the tree.
    ///
    /// # Errors
    ///
    /// Fails if nodes are still open or nothing was added.
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if !self.stack.is_empty() {
            return Err(TreeError::Unclosed(self.stack.len()));
        }
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        let line_starts = std::iter::once(0)
            .chain(self.source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Ok(SyntaxTree {
            source: self.source,
            nodes: self.nodes,
            line_starts,
        })
    }
}
