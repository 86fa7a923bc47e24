use text_size::{TextRange, TextSize};

use crate::SyntaxKind;
use crate::syntax::{NIL, NodeData, NodeOrToken, SyntaxTree, TokenData};

struct OpenNode {
    index: u32,
    start_offset: TextSize,
    children: Vec<NodeOrToken<u32, u32>>,
}

/// Builds a [`SyntaxTree`] from nested `start_node`/`token`/`finish_node`
/// calls issued in source order.
///
/// Tokens must tile the text exactly: each pushed token starts where the
/// previous one ended, and `finish` checks that the root reached the end of
/// the text. Nodes may be empty.
pub struct Builder<'text> {
    text: &'text str,
    covered: TextSize,
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    children: Vec<NodeOrToken<u32, u32>>,
    opened: Vec<OpenNode>,
    children_pool: Vec<Vec<NodeOrToken<u32, u32>>>,
    roots: usize,
}

impl<'text> Builder<'text> {
    pub fn new(text: &'text str) -> Self {
        Self {
            text,
            covered: 0.into(),
            nodes: Vec::new(),
            tokens: Vec::new(),
            children: Vec::new(),
            opened: Vec::new(),
            children_pool: Vec::new(),
            roots: 0,
        }
    }

    /// Opens a node. Children pushed until the matching [`Self::finish_node`]
    /// belong to it.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let index = self.nodes.len() as u32;
        self.nodes.push(NodeData {
            kind,
            parent: NIL,
            index_in_parent: 0,
            range: TextRange::empty(self.covered),
            children_start: 0,
            children_len: 0,
            first_token: self.tokens.len() as u32,
            token_len: 0,
        });
        let children = self.children_pool.pop().unwrap_or_default();
        self.opened.push(OpenNode { index, start_offset: self.covered, children });
    }

    /// Pushes a token with the given range of the source text.
    pub fn token(&mut self, kind: SyntaxKind, range: TextRange) {
        let parent = self.opened.last_mut().expect("token pushed outside of any node");
        assert_eq!(range.start(), self.covered, "token ranges must tile the text");
        assert!(
            self.text.is_char_boundary(range.end().into()),
            "token must end on a char boundary"
        );

        let index = self.tokens.len() as u32;
        self.tokens.push(TokenData { kind, range, parent: NIL, index_in_parent: 0 });
        parent.children.push(NodeOrToken::Token(index));
        self.covered = range.end();
    }

    /// Closes the most recently opened node.
    pub fn finish_node(&mut self) {
        let OpenNode { index, start_offset, mut children } =
            self.opened.pop().expect("unbalanced `finish_node`");

        let children_start = self.children.len() as u32;
        let children_len = children.len() as u32;
        for (position, &child) in children.iter().enumerate() {
            match child {
                NodeOrToken::Node(child) => {
                    let data = &mut self.nodes[child as usize];
                    data.parent = index;
                    data.index_in_parent = position as u32;
                }
                NodeOrToken::Token(child) => {
                    let data = &mut self.tokens[child as usize];
                    data.parent = index;
                    data.index_in_parent = position as u32;
                }
            }
        }
        self.children.extend_from_slice(&children);
        children.clear();
        self.children_pool.push(children);

        let data = &mut self.nodes[index as usize];
        data.range = TextRange::new(start_offset, self.covered);
        data.children_start = children_start;
        data.children_len = children_len;
        data.token_len = self.tokens.len() as u32 - data.first_token;

        match self.opened.last_mut() {
            Some(parent) => parent.children.push(NodeOrToken::Node(index)),
            None => self.roots += 1,
        }
    }

    /// Finalizes the tree.
    pub fn finish(self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes at end of build");
        assert_eq!(self.roots, 1, "tree must have exactly one root");
        assert_eq!(
            self.covered,
            TextSize::of(self.text),
            "tokens must cover the entire text"
        );

        SyntaxTree {
            text: self.text.into(),
            nodes: self.nodes.into_boxed_slice(),
            tokens: self.tokens.into_boxed_slice(),
            children: self.children.into_boxed_slice(),
        }
    }
}
