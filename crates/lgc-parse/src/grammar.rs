//! Grammar rules for the attribute language.
//!
//! One token of lookahead per entry point. Rules are line bounded: every
//! recovery set contains `NEWLINE`, so one malformed rule never damages the
//! lines after it.

use lgc_syntax::SyntaxKind::{self, *};
use lgc_syntax::SyntaxSet;

use crate::parser::Parser;

const LINE_END: SyntaxSet = SyntaxSet::new([NEWLINE, EOF]);
const REF_END: SyntaxSet = SyntaxSet::new([CLOSE_BRACE, NEWLINE, EOF]);
const LITERAL_CONTINUE: SyntaxSet = SyntaxSet::new([
    LITERAL_CHUNK,
    ESCAPE,
    ARG_REF_START,
    MESSAGE_REF_START,
    CLOSE_BRACE,
    NEWLINE,
    EOF,
]);

/// Parses a whole file: attribute rules and newlines until end of input.
/// Returns `false` if the host cancelled the parse midway.
pub(crate) fn file(p: &mut Parser) -> bool {
    let m = p.start();

    loop {
        if p.cancelled() {
            m.abandon(p);
            return false;
        }

        match p.peek_kind() {
            EOF => break,
            NEWLINE => p.advance(),
            IDENTIFIER => attribute_rule(p),
            _ => p.error_recover("expected attribute name", LINE_END),
        }
    }

    // The peek that saw EOF buffered any trailing trivia. It belongs to the
    // file node, not past it.
    p.flush_trivia();
    m.complete(p, FILE);
    true
}

/// `name = value`, terminated by the end of the line. The newline itself
/// stays at file level.
fn attribute_rule(p: &mut Parser) {
    let m = p.start();
    p.advance();

    p.expect(EQUALS, "expected '=' after attribute name");
    attribute_value(p);

    if !p.at_any(LINE_END) {
        p.error_recover("expected end of line after attribute value", LINE_END);
    }

    m.complete(p, ATTRIBUTE_RULE);
}

fn attribute_value(p: &mut Parser) {
    match p.peek_kind() {
        NUMBER | IDENTIFIER => {
            let m = p.start();
            p.advance();
            m.complete(p, ATTRIBUTE_VALUE);
        }
        HASH => {
            let m = p.start();
            message_ref(p);
            m.complete(p, ATTRIBUTE_VALUE);
        }
        OPEN_BRACE => {
            let m = p.start();
            braced_literal(p);
            m.complete(p, ATTRIBUTE_VALUE);
        }
        _ => p.error_recover("expected attribute value", LINE_END),
    }
}

/// `#name`, the bare message reference allowed in value position.
fn message_ref(p: &mut Parser) {
    let m = p.start();
    p.advance();
    p.expect(IDENTIFIER, "expected message name");
    m.complete(p, MESSAGE_REF);
}

/// `{ ... }` with text chunks, escapes and references inside. A newline
/// before the closing brace ends the literal with an error placeholder;
/// the line after it parses normally.
fn braced_literal(p: &mut Parser) {
    let m = p.start();
    p.advance();

    loop {
        match p.peek_kind() {
            LITERAL_CHUNK | ESCAPE => p.advance(),
            ARG_REF_START => literal_ref(p, ARG_REF, "expected argument name"),
            MESSAGE_REF_START => literal_ref(p, MESSAGE_REF, "expected message name"),
            CLOSE_BRACE => {
                p.advance();
                break;
            }
            NEWLINE | EOF => {
                p.error_missing("unterminated literal");
                break;
            }
            _ => p.error_recover("stray character in literal", LITERAL_CONTINUE),
        }
    }

    m.complete(p, BRACED_LITERAL);
}

/// `${name}` or `#{name}` inside a literal.
fn literal_ref(p: &mut Parser, kind: SyntaxKind, missing_name: &str) {
    let m = p.start();
    p.advance();

    p.expect(IDENTIFIER, missing_name);
    match p.peek_kind() {
        CLOSE_BRACE => p.advance(),
        NEWLINE | EOF => p.error_missing("expected '}'"),
        _ => {
            p.error_recover("expected '}'", REF_END);
            p.eat(CLOSE_BRACE);
        }
    }

    m.complete(p, kind);
}
