//! Lossless, immutable syntax tree with parent links and trivia kept as
//! ordinary tokens.
//!
//! The tree is built once and then navigated by index-based, lifetime-guided
//! handles without allocation or refcounting. A finished tree is safe to
//! share across threads.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod syntax;
mod syntax_kind;
mod syntax_set;
/// Depth first traversal with one hook per node kind.
pub mod visitor;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Primary syntax tree API types and adapters.
pub use syntax::{
    Children, ChildrenWithTokens, NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement,
    SyntaxNode, SyntaxNodePtr, SyntaxToken, SyntaxTree, TokenAtOffset, WalkEvent,
    WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
