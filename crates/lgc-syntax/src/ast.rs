//! Typed views over the raw syntax tree.
//!
//! Every struct here is a thin wrapper around a [`SyntaxNode`] of one
//! particular kind. Accessors for mandatory structure never return `Option`:
//! where the source was malformed, the tree contains an `ERROR` node in the
//! mandatory position and the accessor yields that instead. An accessor
//! panics only when handed a tree that violates the grammar's construction
//! contract.

use crate::SyntaxKind;
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken};

/// A typed wrapper around a syntax node of a known kind.
pub trait Node<'tree>: Copy + Sized {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self>;
    fn syntax(self) -> SyntaxNode<'tree>;
}

fn child_token<'tree>(node: SyntaxNode<'tree>, kind: SyntaxKind) -> Option<SyntaxToken<'tree>> {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|token| token.kind() == kind)
}

/// The root node of a parsed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct File<'tree>(SyntaxNode<'tree>);

impl<'tree> File<'tree> {
    /// Iterates the attribute rules of the file, in source order.
    pub fn rules(self) -> impl Iterator<Item = AttributeRule<'tree>> {
        self.0.children().filter_map(AttributeRule::cast)
    }

    /// Iterates top level error nodes, in source order.
    pub fn errors(self) -> impl Iterator<Item = ErrorNode<'tree>> {
        self.0.children().filter_map(ErrorNode::cast)
    }
}

impl<'tree> Node<'tree> for File<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::FILE).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// A single `name = value` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule<'tree>(SyntaxNode<'tree>);

impl<'tree> AttributeRule<'tree> {
    /// The attribute name. A rule only ever starts at an identifier, so the
    /// token is always present.
    pub fn name(self) -> SyntaxToken<'tree> {
        child_token(self.0, SyntaxKind::IDENTIFIER)
            .expect("attribute rule starts with an identifier")
    }

    /// The `=` token, or the error node standing where `=` should be.
    pub fn equals(self) -> SyntaxElement<'tree> {
        if let Some(token) = child_token(self.0, SyntaxKind::EQUALS) {
            return SyntaxElement::Token(token);
        }
        self.0
            .children()
            .find_map(ErrorNode::cast)
            .map(|error| SyntaxElement::Node(error.syntax()))
            .expect("attribute rule without `=` carries an error node")
    }

    /// The attribute value, or the error node standing in its position.
    pub fn value(self) -> ValueOrError<'tree> {
        if let Some(value) = self.0.children().find_map(AttributeValue::cast) {
            return ValueOrError::Value(value);
        }
        self.0
            .children()
            .filter_map(ErrorNode::cast)
            .last()
            .map(ValueOrError::Error)
            .expect("attribute rule without a value carries an error node")
    }
}

impl<'tree> Node<'tree> for AttributeRule<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::ATTRIBUTE_RULE).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// Result of [`AttributeRule::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrError<'tree> {
    Value(AttributeValue<'tree>),
    Error(ErrorNode<'tree>),
}

/// The right hand side of a rule. Wraps exactly one value form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeValue<'tree>(SyntaxNode<'tree>);

impl<'tree> AttributeValue<'tree> {
    /// Classifies the wrapped value form.
    pub fn shape(self) -> ValueShape<'tree> {
        for child in self.0.children_with_tokens() {
            match child {
                SyntaxElement::Token(token) => match token.kind() {
                    SyntaxKind::NUMBER => return ValueShape::Number(token),
                    SyntaxKind::IDENTIFIER => return ValueShape::Word(token),
                    _ => {}
                },
                SyntaxElement::Node(node) => {
                    if let Some(it) = MessageRef::cast(node) {
                        return ValueShape::MessageRef(it);
                    }
                    if let Some(it) = BracedLiteral::cast(node) {
                        return ValueShape::Literal(it);
                    }
                }
            }
        }
        unreachable!("attribute value wraps exactly one value form")
    }
}

impl<'tree> Node<'tree> for AttributeValue<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::ATTRIBUTE_VALUE).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// The concrete form held by an [`AttributeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape<'tree> {
    Number(SyntaxToken<'tree>),
    Word(SyntaxToken<'tree>),
    MessageRef(MessageRef<'tree>),
    Literal(BracedLiteral<'tree>),
}

/// A `{ ... }` literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracedLiteral<'tree>(SyntaxNode<'tree>);

impl<'tree> BracedLiteral<'tree> {
    /// The opening `{`. A literal only ever starts at one.
    pub fn open_brace(self) -> SyntaxToken<'tree> {
        child_token(self.0, SyntaxKind::OPEN_BRACE).expect("braced literal starts with `{`")
    }

    /// The closing `}`, or the error node standing where it should be.
    pub fn close_brace(self) -> SyntaxElement<'tree> {
        if let Some(token) = child_token(self.0, SyntaxKind::CLOSE_BRACE) {
            return SyntaxElement::Token(token);
        }
        self.0
            .children()
            .filter_map(ErrorNode::cast)
            .last()
            .map(|error| SyntaxElement::Node(error.syntax()))
            .expect("unterminated literal carries an error node")
    }

    /// Iterates the body of the literal, in source order.
    pub fn parts(self) -> impl Iterator<Item = LiteralPart<'tree>> {
        self.0.children_with_tokens().filter_map(|child| match child {
            SyntaxElement::Token(token) => match token.kind() {
                SyntaxKind::LITERAL_CHUNK => Some(LiteralPart::Chunk(token)),
                SyntaxKind::ESCAPE => Some(LiteralPart::Escape(token)),
                _ => None,
            },
            SyntaxElement::Node(node) => {
                if let Some(it) = ArgRef::cast(node) {
                    return Some(LiteralPart::ArgRef(it));
                }
                MessageRef::cast(node).map(LiteralPart::MessageRef)
            }
        })
    }
}

impl<'tree> Node<'tree> for BracedLiteral<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::BRACED_LITERAL).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// One piece of a braced literal's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralPart<'tree> {
    Chunk(SyntaxToken<'tree>),
    Escape(SyntaxToken<'tree>),
    ArgRef(ArgRef<'tree>),
    MessageRef(MessageRef<'tree>),
}

/// A reference to another message, `#name` or `#{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef<'tree>(SyntaxNode<'tree>);

impl<'tree> MessageRef<'tree> {
    /// The referenced name, or the error node standing where it should be.
    pub fn name(self) -> SyntaxElement<'tree> {
        name_or_error(self.0)
    }
}

impl<'tree> Node<'tree> for MessageRef<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::MESSAGE_REF).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// A reference to an argument, `${name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgRef<'tree>(SyntaxNode<'tree>);

impl<'tree> ArgRef<'tree> {
    /// The referenced name, or the error node standing where it should be.
    pub fn name(self) -> SyntaxElement<'tree> {
        name_or_error(self.0)
    }
}

impl<'tree> Node<'tree> for ArgRef<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::ARG_REF).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

fn name_or_error(node: SyntaxNode<'_>) -> SyntaxElement<'_> {
    if let Some(token) = child_token(node, SyntaxKind::IDENTIFIER) {
        return SyntaxElement::Token(token);
    }
    node.children()
        .find_map(ErrorNode::cast)
        .map(|error| SyntaxElement::Node(error.syntax()))
        .expect("reference without a name carries an error node")
}

/// A region the parser could not interpret, or a zero width placeholder for
/// missing mandatory structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorNode<'tree>(SyntaxNode<'tree>);

impl<'tree> Node<'tree> for ErrorNode<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        (syntax.kind() == SyntaxKind::ERROR).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        self.0
    }
}

/// Any typed node, for dispatch by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyNode<'tree> {
    File(File<'tree>),
    AttributeRule(AttributeRule<'tree>),
    AttributeValue(AttributeValue<'tree>),
    BracedLiteral(BracedLiteral<'tree>),
    MessageRef(MessageRef<'tree>),
    ArgRef(ArgRef<'tree>),
    Error(ErrorNode<'tree>),
}

impl<'tree> Node<'tree> for AnyNode<'tree> {
    fn cast(syntax: SyntaxNode<'tree>) -> Option<Self> {
        let node = match syntax.kind() {
            SyntaxKind::FILE => Self::File(File(syntax)),
            SyntaxKind::ATTRIBUTE_RULE => Self::AttributeRule(AttributeRule(syntax)),
            SyntaxKind::ATTRIBUTE_VALUE => Self::AttributeValue(AttributeValue(syntax)),
            SyntaxKind::BRACED_LITERAL => Self::BracedLiteral(BracedLiteral(syntax)),
            SyntaxKind::MESSAGE_REF => Self::MessageRef(MessageRef(syntax)),
            SyntaxKind::ARG_REF => Self::ArgRef(ArgRef(syntax)),
            SyntaxKind::ERROR => Self::Error(ErrorNode(syntax)),
            _ => return None,
        };
        Some(node)
    }

    fn syntax(self) -> SyntaxNode<'tree> {
        match self {
            Self::File(it) => it.syntax(),
            Self::AttributeRule(it) => it.syntax(),
            Self::AttributeValue(it) => it.syntax(),
            Self::BracedLiteral(it) => it.syntax(),
            Self::MessageRef(it) => it.syntax(),
            Self::ArgRef(it) => it.syntax(),
            Self::Error(it) => it.syntax(),
        }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::builder::Builder;
    use crate::syntax::SyntaxTree;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    // name = #greeting, with the trailing newline kept at file level.
    fn ref_value_file() -> SyntaxTree {
        let text = "name = #greeting\n";
        let mut builder = Builder::new(text);
        builder.start_node(SyntaxKind::FILE);
        builder.start_node(SyntaxKind::ATTRIBUTE_RULE);
        builder.token(SyntaxKind::IDENTIFIER, range(0, 4));
        builder.token(SyntaxKind::WHITESPACE, range(4, 5));
        builder.token(SyntaxKind::EQUALS, range(5, 6));
        builder.token(SyntaxKind::WHITESPACE, range(6, 7));
        builder.start_node(SyntaxKind::ATTRIBUTE_VALUE);
        builder.start_node(SyntaxKind::MESSAGE_REF);
        builder.token(SyntaxKind::HASH, range(7, 8));
        builder.token(SyntaxKind::IDENTIFIER, range(8, 16));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.token(SyntaxKind::NEWLINE, range(16, 17));
        builder.finish_node();
        builder.finish()
    }

    // key, with the missing `=` and missing value each marked by an empty
    // error node.
    fn broken_rule_file() -> SyntaxTree {
        let text = "key";
        let mut builder = Builder::new(text);
        builder.start_node(SyntaxKind::FILE);
        builder.start_node(SyntaxKind::ATTRIBUTE_RULE);
        builder.token(SyntaxKind::IDENTIFIER, range(0, 3));
        builder.start_node(SyntaxKind::ERROR);
        builder.finish_node();
        builder.start_node(SyntaxKind::ERROR);
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn well_formed_accessors() {
        let tree = ref_value_file();
        let file = File::cast(tree.root()).unwrap();

        let rule = file.rules().next().unwrap();
        assert_eq!(rule.name().text(), "name");
        assert_eq!(rule.equals().kind(), SyntaxKind::EQUALS);

        let ValueOrError::Value(value) = rule.value() else {
            panic!("expected a value");
        };
        let ValueShape::MessageRef(message_ref) = value.shape() else {
            panic!("expected a message ref");
        };
        assert_eq!(message_ref.name().kind(), SyntaxKind::IDENTIFIER);
        assert_eq!(message_ref.syntax().text(), "#greeting");
    }

    #[test]
    fn missing_structure_yields_error_nodes() {
        let tree = broken_rule_file();
        let file = File::cast(tree.root()).unwrap();

        let rule = file.rules().next().unwrap();
        assert_eq!(rule.name().text(), "key");

        let equals = rule.equals();
        assert_eq!(equals.kind(), SyntaxKind::ERROR);
        assert!(equals.text_range().is_empty());

        let ValueOrError::Error(error) = rule.value() else {
            panic!("expected an error placeholder");
        };
        assert_eq!(error.syntax().kind(), SyntaxKind::ERROR);
        assert!(error.syntax().text_range().is_empty());
    }

    #[test]
    fn literal_parts() {
        // greeting = {Hi ${user}\!}
        let text = "greeting = {Hi ${user}\\!}";
        let mut builder = Builder::new(text);
        builder.start_node(SyntaxKind::FILE);
        builder.start_node(SyntaxKind::ATTRIBUTE_RULE);
        builder.token(SyntaxKind::IDENTIFIER, range(0, 8));
        builder.token(SyntaxKind::WHITESPACE, range(8, 9));
        builder.token(SyntaxKind::EQUALS, range(9, 10));
        builder.token(SyntaxKind::WHITESPACE, range(10, 11));
        builder.start_node(SyntaxKind::ATTRIBUTE_VALUE);
        builder.start_node(SyntaxKind::BRACED_LITERAL);
        builder.token(SyntaxKind::OPEN_BRACE, range(11, 12));
        builder.token(SyntaxKind::LITERAL_CHUNK, range(12, 15));
        builder.start_node(SyntaxKind::ARG_REF);
        builder.token(SyntaxKind::ARG_REF_START, range(15, 17));
        builder.token(SyntaxKind::IDENTIFIER, range(17, 21));
        builder.token(SyntaxKind::CLOSE_BRACE, range(21, 22));
        builder.finish_node();
        builder.token(SyntaxKind::ESCAPE, range(22, 24));
        builder.token(SyntaxKind::CLOSE_BRACE, range(24, 25));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let file = File::cast(tree.root()).unwrap();
        let ValueOrError::Value(value) = file.rules().next().unwrap().value() else {
            panic!("expected a value");
        };
        let ValueShape::Literal(literal) = value.shape() else {
            panic!("expected a literal");
        };

        assert_eq!(literal.open_brace().text(), "{");
        assert_eq!(literal.close_brace().kind(), SyntaxKind::CLOSE_BRACE);

        let parts: Vec<_> = literal.parts().collect();
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], LiteralPart::Chunk(token) if token.text() == "Hi "));
        let LiteralPart::ArgRef(arg_ref) = parts[1] else {
            panic!("expected an arg ref");
        };
        assert_eq!(arg_ref.name().kind(), SyntaxKind::IDENTIFIER);
        assert!(matches!(parts[2], LiteralPart::Escape(token) if token.text() == "\\!"));
    }
}
