//! Event based parser producing a lossless, error tolerant syntax tree.
//!
//! Parsing never fails: malformed input becomes `ERROR` nodes plus
//! diagnostics, and every byte of the input lands in exactly one token of
//! the finished tree. The same text always yields the same tree and the
//! same diagnostics.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lgc_errors::Diagnostic;
use lgc_inputs::File;
use lgc_syntax::{SyntaxNode, SyntaxTree, WalkEventWithTokens};
use salsa::Database;

mod grammar;
mod parser;

/// Parses `text` into a syntax tree covering every input byte.
pub fn parse(text: &str) -> Parse {
    parse_with(text, None).expect("a parse without a cancel token runs to completion")
}

/// Like [`parse`], but checks `cancel` once per top level rule and returns
/// `None` if the host cancelled. A cancelled parse leaves nothing behind.
pub fn parse_cancellable(text: &str, cancel: &CancelToken) -> Option<Parse> {
    parse_with(text, Some(cancel))
}

fn parse_with(text: &str, cancel: Option<&CancelToken>) -> Option<Parse> {
    let mut parser = parser::Parser::new(text, cancel);
    grammar::file(&mut parser).then(|| {
        let (tree, diagnostics) = parser.build_tree();
        Parse { tree, diagnostics }
    })
}

/// Shareable flag for abandoning an in-flight parse, for example when an
/// edit supersedes the text being parsed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The immutable product of one parse invocation: the tree plus the
/// diagnostics recorded while building it, in source order.
#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Returns the root node of the tree.
    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    /// Diagnostics for every error node in the tree.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Renders the tree with one line per node or token, indented by depth.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;

        for event in self.root().preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let _ = writeln!(out, "{:indent$}{node:?}", "", indent = depth * 2);
                    depth += 1;
                }
                WalkEventWithTokens::Token(token) => {
                    let _ = writeln!(out, "{:indent$}{token:?}", "", indent = depth * 2);
                }
                WalkEventWithTokens::LeaveNode(_) => depth -= 1,
            }
        }

        out
    }
}

// Parsing is deterministic, so equal text implies an equal tree and equal
// diagnostics.
unsafe impl salsa::Update for Parse {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if old_value.tree.text() == new_value.tree.text() {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

/// Memoized parse of a [`File`]: recomputed only when the file's text
/// revision changes, otherwise every caller shares one tree.
pub trait FileParse {
    fn parse(self, db: &dyn Database) -> &Parse;
}

#[salsa::tracked]
impl FileParse for File {
    #[salsa::tracked(returns(ref), no_eq)]
    fn parse(self, db: &dyn Database) -> Parse {
        parse(self.text(db))
    }
}
