use drop_bomb::DropBomb;
use lgc_errors::Diagnostic;
use lgc_syntax::{Builder, SyntaxKind, SyntaxSet, SyntaxTree};
use lgc_tokenizer::{Token, Tokenizer};
use text_size::TextRange;

use crate::CancelToken;

/// Event-collecting parser over the token stream.
///
/// Grammar rules see only significant tokens: whitespace and comments are
/// buffered while peeking and flushed into the event stream right before the
/// next node or token, so leading trivia ends up in the enclosing node rather
/// than inside the rule that follows it.
pub(crate) struct Parser<'p> {
    text: &'p str,
    tokenizer: Tokenizer<'p>,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    pending_trivia: Vec<Token>,
    cancel: Option<&'p CancelToken>,
}

impl<'p> Parser<'p> {
    pub(crate) fn new(text: &'p str, cancel: Option<&'p CancelToken>) -> Self {
        Self {
            text,
            tokenizer: Tokenizer::new(text),
            events: Vec::new(),
            diagnostics: Vec::new(),
            pending_trivia: Vec::new(),
            cancel,
        }
    }

    /// The upcoming significant token. Trivia scanned on the way is buffered
    /// until the next [`Self::advance`] or [`Self::start`].
    pub(crate) fn peek(&mut self) -> Token {
        loop {
            let token = self.tokenizer.peek();
            if !token.kind.is_trivia() {
                return token;
            }
            let trivia = self.tokenizer.next_token();
            self.pending_trivia.push(trivia);
        }
    }

    pub(crate) fn peek_kind(&mut self) -> SyntaxKind {
        self.peek().kind
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_any(&mut self, set: SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    /// Consumes the upcoming token. Advancing at end of input emits any
    /// buffered trivia and nothing else; the zero width `EOF` token never
    /// enters the tree.
    pub(crate) fn advance(&mut self) {
        let token = self.peek();
        self.flush_trivia();

        if token.kind == SyntaxKind::EOF {
            return;
        }

        self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    /// Consumes the upcoming token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    /// Consumes `kind`, or records `message` and leaves a zero width error
    /// placeholder standing in its position.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: &str) {
        if !self.eat(kind) {
            self.error_missing(message);
        }
    }

    /// Records a diagnostic at the upcoming token.
    pub(crate) fn error(&mut self, message: &str) {
        let range = self.peek().range;
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    /// Records a diagnostic and an empty error node marking a missing
    /// mandatory element. The diagnostic points at the gap itself.
    pub(crate) fn error_missing(&mut self, message: &str) {
        let gap = TextRange::empty(self.peek().range.start());
        self.diagnostics.push(Diagnostic::error(message, gap));

        let m = self.start();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Records a diagnostic and absorbs tokens into an error node until one
    /// of `recovery` (or end of input) can resynchronize the current rule.
    /// Already being at a recovery token leaves a zero width placeholder.
    pub(crate) fn error_recover(&mut self, message: &str, recovery: SyntaxSet) {
        self.error(message);

        let m = self.start();
        while !self.at_any(recovery) && !self.at(SyntaxKind::EOF) {
            self.advance();
        }
        m.complete(self, SyntaxKind::ERROR);
    }

    /// True when the host asked to abandon this parse.
    pub(crate) fn cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    /// Opens a node. Buffered trivia is flushed first, so it lands before
    /// the node rather than inside it.
    pub(crate) fn start(&mut self) -> Marker {
        self.flush_trivia();

        let position = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(position)
    }

    /// Emits buffered trivia into the current node. Called by the file rule
    /// at end of input, where no further token would flush it.
    pub(crate) fn flush_trivia(&mut self) {
        self.events.extend(self.pending_trivia.drain(..).map(Event::Token));
    }

    /// Replays the recorded events through the tree builder.
    pub(crate) fn build_tree(self) -> (SyntaxTree, Vec<Diagnostic>) {
        let Parser { text, events, diagnostics, .. } = self;
        let mut builder = Builder::new(text);

        for event in events {
            match event {
                Event::Start(kind) => {
                    if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(kind);
                    }
                }
                Event::Token(token) => builder.token(token.kind, token.range),
                Event::Finish => builder.finish_node(),
            }
        }

        (builder.finish(), diagnostics)
    }
}

enum Event {
    Start(SyntaxKind),
    Token(Token),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start(SyntaxKind::TOMBSTONE);
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(position: u32) -> Marker {
        Marker {
            position,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    /// Closes the node opened by this marker with the given kind.
    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start(slot) => *slot = kind,
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
    }

    /// Disarms the marker without producing a node. Used when a cancel
    /// request stops the parse and the event buffer is discarded wholesale.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        if self.position as usize == p.events.len() - 1 {
            p.events.pop();
        }
    }
}
