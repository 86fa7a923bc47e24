#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    IDENTIFIER,
    NUMBER,
    EQUALS,
    HASH,
    OPEN_BRACE,
    CLOSE_BRACE,
    ARG_REF_START,
    MESSAGE_REF_START,
    LITERAL_CHUNK,
    ESCAPE,

    NEWLINE,
    WHITESPACE,
    COMMENT,

    BAD_CHARACTER,
    EOF,

    FILE,
    ATTRIBUTE_RULE,
    ATTRIBUTE_VALUE,
    BRACED_LITERAL,
    MESSAGE_REF,
    ARG_REF,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    /// Whitespace and comments carry no grammatical meaning but stay in the
    /// tree as ordinary tokens. Newlines terminate rules and are not trivia.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }
}
