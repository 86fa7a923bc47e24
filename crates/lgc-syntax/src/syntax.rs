//! Public syntax tree API built on immutable, index-linked arena storage.

use std::fmt;

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// Sentinel parent index of the root node.
pub(crate) const NIL: u32 = u32::MAX;

pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: u32,
    pub(crate) index_in_parent: u32,
    pub(crate) range: TextRange,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    pub(crate) first_token: u32,
    pub(crate) token_len: u32,
}

pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) parent: u32,
    pub(crate) index_in_parent: u32,
}

/// Owned syntax tree for a single source text.
///
/// Nodes and tokens live in flat arenas; handles borrow the tree and are
/// plain `(tree, index)` pairs. Parent links are lookup-only indices, so a
/// subtree can never keep another subtree alive. The tree is immutable after
/// construction and safe to read from any number of threads.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Box<[NodeData]>,
    pub(crate) tokens: Box<[TokenData]>,
    pub(crate) children: Box<[NodeOrToken<u32, u32>]>,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub(crate) fn node(&self, index: u32) -> &NodeData {
        &self.nodes[index as usize]
    }

    #[inline]
    pub(crate) fn token(&self, index: u32) -> &TokenData {
        &self.tokens[index as usize]
    }

    #[inline]
    pub(crate) fn child_slice(&self, node: &NodeData) -> &[NodeOrToken<u32, u32>] {
        let start = node.children_start as usize;
        &self.children[start..start + node.children_len as usize]
    }

    #[inline]
    pub(crate) fn token_window(&self, node: &NodeData) -> &[TokenData] {
        let start = node.first_token as usize;
        &self.tokens[start..start + node.token_len as usize]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text.len()).finish_non_exhaustive()
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> &'a TokenData {
        self.tree.token(self.index)
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the exact text range of this token.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    /// Returns the source text of this token.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.data().range]
    }

    /// Returns the previous token in document order, crossing node
    /// boundaries.
    #[inline]
    pub fn prev_token(self) -> Option<Self> {
        let index = self.index.checked_sub(1)?;
        Some(Self { tree: self.tree, index })
    }

    /// Returns the next token in document order, crossing node boundaries.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        let index = self.index + 1;
        (index < self.tree.tokens.len() as u32).then_some(Self { tree: self.tree, index })
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.data().parent }
    }

    /// Returns an iterator of parent nodes, starting from the immediate parent.
    #[inline]
    pub fn parent_ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.parent().ancestors()
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl fmt::Display for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn data(self) -> &'a NodeData {
        self.tree.node(self.index)
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the text range covered by this node.
    ///
    /// The range equals the gapless concatenation of the children's ranges;
    /// nodes standing in for missing content may be empty.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    /// Returns the source text covered by this node, byte for byte.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.data().range]
    }

    /// Returns the first token spanned by this node, if it spans any.
    #[inline]
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        let data = self.data();
        (data.token_len > 0).then_some(SyntaxToken { tree: self.tree, index: data.first_token })
    }

    /// Returns the last token spanned by this node, if it spans any.
    #[inline]
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        let data = self.data();
        (data.token_len > 0)
            .then(|| SyntaxToken { tree: self.tree, index: data.first_token + data.token_len - 1 })
    }

    /// Returns the parent node, or `None` for the root.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        let parent = self.data().parent;
        (parent != NIL).then_some(Self { tree: self.tree, index: parent })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates direct children, including tokens.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        ChildrenWithTokens { tree: self.tree, children: self.tree.child_slice(self.data()).iter() }
    }

    /// Iterates direct child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> Children<'a> {
        Children { inner: self.children_with_tokens() }
    }

    /// Returns the next sibling node, skipping sibling tokens.
    pub fn next_sibling(self) -> Option<Self> {
        self.siblings_after().find_map(SyntaxElement::into_node)
    }

    /// Returns the previous sibling node, skipping sibling tokens.
    pub fn prev_sibling(self) -> Option<Self> {
        self.siblings_before().rev().find_map(SyntaxElement::into_node)
    }

    /// Returns the element immediately after this node in its parent.
    pub fn next_sibling_or_token(self) -> Option<SyntaxElement<'a>> {
        self.siblings_after().next()
    }

    /// Returns the element immediately before this node in its parent.
    pub fn prev_sibling_or_token(self) -> Option<SyntaxElement<'a>> {
        self.siblings_before().next_back()
    }

    fn siblings_after(self) -> ChildrenWithTokens<'a> {
        let data = self.data();
        match self.parent() {
            Some(parent) => {
                let children = self.tree.child_slice(parent.data());
                let next = data.index_in_parent as usize + 1;
                ChildrenWithTokens { tree: self.tree, children: children[next..].iter() }
            }
            None => ChildrenWithTokens { tree: self.tree, children: [].iter() },
        }
    }

    fn siblings_before(self) -> ChildrenWithTokens<'a> {
        let data = self.data();
        match self.parent() {
            Some(parent) => {
                let children = self.tree.child_slice(parent.data());
                let upto = data.index_in_parent as usize;
                ChildrenWithTokens { tree: self.tree, children: children[..upto].iter() }
            }
            None => ChildrenWithTokens { tree: self.tree, children: [].iter() },
        }
    }

    /// Returns the token at the given offset, if any.
    ///
    /// An offset on the boundary of two tokens yields both.
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a>> {
        let range = self.text_range();
        if offset < range.start() || range.end() < offset {
            return TokenAtOffset::None;
        }

        let data = self.data();
        let window = self.tree.token_window(data);
        let base = data.first_token;
        let token = |index: u32| SyntaxToken { tree: self.tree, index: base + index };

        let index = window.partition_point(|it| it.range.end() <= offset);
        match window.get(index) {
            None => match window.len() {
                0 => TokenAtOffset::None,
                len => TokenAtOffset::Single(token(len as u32 - 1)),
            },
            Some(it) if it.range.start() == offset && index > 0 => {
                TokenAtOffset::Between(token(index as u32 - 1), token(index as u32))
            }
            Some(_) => TokenAtOffset::Single(token(index as u32)),
        }
    }

    /// Returns the smallest element within this node that fully covers
    /// `range`.
    pub fn covering_element(self, range: TextRange) -> SyntaxElement<'a> {
        let Some(token) = self.token_at_offset(range.start()).right_biased() else {
            return SyntaxElement::Node(self);
        };

        if token.text_range().contains_range(range) {
            return SyntaxElement::Token(token);
        }

        token
            .parent_ancestors()
            .find(|node| node.text_range().contains_range(range))
            .map_or(SyntaxElement::Node(self), SyntaxElement::Node)
    }

    /// Returns a preorder iterator over the nodes of this subtree.
    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder { inner: self.preorder_with_tokens() }
    }

    /// Returns a preorder iterator over the nodes and tokens of this subtree.
    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens { stack: Vec::with_capacity(8), root: Some(self) }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

/// Iterator over a node's direct children, tokens included.
pub struct ChildrenWithTokens<'a> {
    tree: &'a SyntaxTree,
    children: std::slice::Iter<'a, NodeOrToken<u32, u32>>,
}

impl<'a> ChildrenWithTokens<'a> {
    #[inline]
    fn map_child(&self, child: Option<&NodeOrToken<u32, u32>>) -> Option<SyntaxElement<'a>> {
        let tree = self.tree;
        child.map(|child| match *child {
            NodeOrToken::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
            NodeOrToken::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
        })
    }
}

impl Clone for ChildrenWithTokens<'_> {
    #[inline]
    fn clone(&self) -> Self {
        Self { tree: self.tree, children: self.children.clone() }
    }
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next();
        self.map_child(child)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for ChildrenWithTokens<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let child = self.children.next_back();
        self.map_child(child)
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Iterator over a node's direct child nodes.
#[derive(Clone)]
pub struct Children<'a> {
    inner: ChildrenWithTokens<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(SyntaxElement::into_node)
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl Preorder<'_> {
    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|event| match event {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Copy)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

/// Preorder traversal over nodes and tokens, left to right in source order.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl PreorderWithTokens<'_> {
    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        }

        let (_, children) = self.stack.last_mut()?;
        match children.next() {
            Some(SyntaxElement::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(SyntaxElement::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited, _) = self.stack.pop().expect("should have an exited-from node");
                Some(WalkEventWithTokens::LeaveNode(exited))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Stable identifier for a node by kind and text range, valid across
/// reparses of identical text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNodePtr {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl SyntaxNodePtr {
    /// Builds a pointer from a concrete node.
    pub fn new(node: &SyntaxNode<'_>) -> Self {
        Self { kind: node.kind(), range: node.text_range() }
    }

    /// Attempts to resolve this pointer within `root`.
    pub fn try_to_node<'a>(&self, root: &SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        if root.parent().is_some() {
            return None;
        }

        let start_node = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent(),
        };

        start_node
            .ancestors()
            .find(|node| node.kind() == self.kind && node.text_range() == self.range)
    }

    #[track_caller]
    pub fn to_node<'a>(&self, root: &SyntaxNode<'a>) -> SyntaxNode<'a> {
        self.try_to_node(root)
            .unwrap_or_else(|| panic!("no {:?} node at {:?}", self.kind, self.range))
    }
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    /// Maps tokens to a different type.
    pub fn map<F: Fn(T) -> U, U>(self, f: F) -> TokenAtOffset<U> {
        match self {
            TokenAtOffset::None => TokenAtOffset::None,
            TokenAtOffset::Single(it) => TokenAtOffset::Single(f(it)),
            TokenAtOffset::Between(left, right) => TokenAtOffset::Between(f(left), f(right)),
        }
    }

    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(left, _) => Some(left),
        }
    }
}

impl<T> Iterator for TokenAtOffset<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::None) {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(left, right) => {
                *self = Self::Single(right);
                Some(left)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::None => (0, Some(0)),
            Self::Single(_) => (1, Some(1)),
            Self::Between(_, _) => (2, Some(2)),
        }
    }
}

impl<T> ExactSizeIterator for TokenAtOffset<T> {}
