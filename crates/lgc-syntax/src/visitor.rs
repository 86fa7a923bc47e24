//! Depth first traversal over typed nodes.
//!
//! [`Visitor`] has one method per node kind. Every default method recurses
//! into the children, so an implementation only overrides the kinds it cares
//! about; an override that still wants the children calls [`walk`] itself.
//! Traversal is preorder and left to right, and reaches every node and token
//! of the subtree exactly once, error nodes included.

use crate::ast::{
    AnyNode, ArgRef, AttributeRule, AttributeValue, BracedLiteral, ErrorNode, File, MessageRef,
    Node,
};
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken};

pub trait Visitor<'tree> {
    fn visit_file(&mut self, file: File<'tree>) {
        walk(self, file.syntax());
    }

    fn visit_attribute_rule(&mut self, rule: AttributeRule<'tree>) {
        walk(self, rule.syntax());
    }

    fn visit_attribute_value(&mut self, value: AttributeValue<'tree>) {
        walk(self, value.syntax());
    }

    fn visit_braced_literal(&mut self, literal: BracedLiteral<'tree>) {
        walk(self, literal.syntax());
    }

    fn visit_message_ref(&mut self, message_ref: MessageRef<'tree>) {
        walk(self, message_ref.syntax());
    }

    fn visit_arg_ref(&mut self, arg_ref: ArgRef<'tree>) {
        walk(self, arg_ref.syntax());
    }

    fn visit_error(&mut self, error: ErrorNode<'tree>) {
        walk(self, error.syntax());
    }

    fn visit_token(&mut self, _token: SyntaxToken<'tree>) {}
}

/// Visits the direct children of `node`, dispatching each by kind.
pub fn walk<'tree, V: Visitor<'tree> + ?Sized>(visitor: &mut V, node: SyntaxNode<'tree>) {
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(node) => node.accept(visitor),
            SyntaxElement::Token(token) => visitor.visit_token(token),
        }
    }
}

impl<'tree> SyntaxNode<'tree> {
    /// Dispatches to the visitor method for this node's kind.
    pub fn accept<V: Visitor<'tree> + ?Sized>(self, visitor: &mut V) {
        match AnyNode::cast(self) {
            Some(AnyNode::File(it)) => visitor.visit_file(it),
            Some(AnyNode::AttributeRule(it)) => visitor.visit_attribute_rule(it),
            Some(AnyNode::AttributeValue(it)) => visitor.visit_attribute_value(it),
            Some(AnyNode::BracedLiteral(it)) => visitor.visit_braced_literal(it),
            Some(AnyNode::MessageRef(it)) => visitor.visit_message_ref(it),
            Some(AnyNode::ArgRef(it)) => visitor.visit_arg_ref(it),
            Some(AnyNode::Error(it)) => visitor.visit_error(it),
            None => walk(visitor, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::builder::Builder;
    use crate::syntax::WalkEvent;
    use crate::{SyntaxKind, SyntaxTree};

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    // a = #b, then a line holding one piece of junk.
    fn fixture() -> SyntaxTree {
        let text = "a = #b\n!\n";
        let mut builder = Builder::new(text);
        builder.start_node(SyntaxKind::FILE);
        builder.start_node(SyntaxKind::ATTRIBUTE_RULE);
        builder.token(SyntaxKind::IDENTIFIER, range(0, 1));
        builder.token(SyntaxKind::WHITESPACE, range(1, 2));
        builder.token(SyntaxKind::EQUALS, range(2, 3));
        builder.token(SyntaxKind::WHITESPACE, range(3, 4));
        builder.start_node(SyntaxKind::ATTRIBUTE_VALUE);
        builder.start_node(SyntaxKind::MESSAGE_REF);
        builder.token(SyntaxKind::HASH, range(4, 5));
        builder.token(SyntaxKind::IDENTIFIER, range(5, 6));
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.token(SyntaxKind::NEWLINE, range(6, 7));
        builder.start_node(SyntaxKind::ERROR);
        builder.token(SyntaxKind::BAD_CHARACTER, range(7, 8));
        builder.finish_node();
        builder.token(SyntaxKind::NEWLINE, range(8, 9));
        builder.finish_node();
        builder.finish()
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl<'tree> Visitor<'tree> for Recorder {
        fn visit_file(&mut self, file: File<'tree>) {
            self.events.push("file".into());
            walk(self, file.syntax());
        }

        fn visit_attribute_rule(&mut self, rule: AttributeRule<'tree>) {
            self.events.push("rule".into());
            walk(self, rule.syntax());
        }

        fn visit_attribute_value(&mut self, value: AttributeValue<'tree>) {
            self.events.push("value".into());
            walk(self, value.syntax());
        }

        fn visit_message_ref(&mut self, message_ref: MessageRef<'tree>) {
            self.events.push("message_ref".into());
            walk(self, message_ref.syntax());
        }

        fn visit_error(&mut self, error: ErrorNode<'tree>) {
            self.events.push("error".into());
            walk(self, error.syntax());
        }

        fn visit_token(&mut self, token: SyntaxToken<'tree>) {
            self.events.push(format!("token {:?}", token.kind()));
        }
    }

    #[test]
    fn preorder_left_to_right() {
        let tree = fixture();
        let mut recorder = Recorder::default();
        tree.root().accept(&mut recorder);

        assert_eq!(recorder.events, [
            "file",
            "rule",
            "token IDENTIFIER",
            "token WHITESPACE",
            "token EQUALS",
            "token WHITESPACE",
            "value",
            "message_ref",
            "token HASH",
            "token IDENTIFIER",
            "token NEWLINE",
            "error",
            "token BAD_CHARACTER",
            "token NEWLINE",
        ]);
    }

    #[test]
    fn override_controls_recursion() {
        struct RuleCounter {
            rules: usize,
            values: usize,
        }

        impl Visitor<'_> for RuleCounter {
            fn visit_attribute_rule(&mut self, _rule: AttributeRule<'_>) {
                self.rules += 1;
            }

            fn visit_attribute_value(&mut self, _value: AttributeValue<'_>) {
                self.values += 1;
            }
        }

        let tree = fixture();
        let mut counter = RuleCounter { rules: 0, values: 0 };
        tree.root().accept(&mut counter);

        assert_eq!(counter.rules, 1);
        assert_eq!(counter.values, 0);
    }

    #[test]
    fn every_node_visited_once() {
        #[derive(Default)]
        struct NodeCounter {
            nodes: usize,
            tokens: usize,
        }

        impl Visitor<'_> for NodeCounter {
            fn visit_file(&mut self, file: File<'_>) {
                self.nodes += 1;
                walk(self, file.syntax());
            }

            fn visit_attribute_rule(&mut self, rule: AttributeRule<'_>) {
                self.nodes += 1;
                walk(self, rule.syntax());
            }

            fn visit_attribute_value(&mut self, value: AttributeValue<'_>) {
                self.nodes += 1;
                walk(self, value.syntax());
            }

            fn visit_braced_literal(&mut self, literal: BracedLiteral<'_>) {
                self.nodes += 1;
                walk(self, literal.syntax());
            }

            fn visit_message_ref(&mut self, message_ref: MessageRef<'_>) {
                self.nodes += 1;
                walk(self, message_ref.syntax());
            }

            fn visit_arg_ref(&mut self, arg_ref: ArgRef<'_>) {
                self.nodes += 1;
                walk(self, arg_ref.syntax());
            }

            fn visit_error(&mut self, error: ErrorNode<'_>) {
                self.nodes += 1;
                walk(self, error.syntax());
            }

            fn visit_token(&mut self, _token: SyntaxToken<'_>) {
                self.tokens += 1;
            }
        }

        let tree = fixture();
        let mut counter = NodeCounter::default();
        tree.root().accept(&mut counter);

        let expected_nodes =
            tree.root().preorder().filter(|event| matches!(event, WalkEvent::Enter(_)));
        assert_eq!(counter.nodes, expected_nodes.count());
        assert_eq!(counter.tokens, 9);
    }
}
