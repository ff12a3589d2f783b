//! Table-driven shift-reduce parser for the lambda grammars.
//!
//! The parser pulls tokens from a [`Lexer`] one at a time and drives the
//! LR(1) tables of a [`Grammar`]. Reductions build interior nodes with
//! field layouts. Comments never reach the tables: they are attached as
//! leading trivia to the next token that is shifted.
//!
//! Parsing always produces a tree rooted at `source_file`. When a token has
//! no action, [`recovery`] repairs the input with missing nodes or wraps
//! the offending material in error nodes, and records a [`ParseError`].

mod builder;
mod error;
mod recovery;
mod stack;

#[cfg(test)]
mod tests;

use lambda_diagnostic::Diagnostic;
use lambda_grammar::{Action, Grammar, NonTerminal, ProductionId, StateId, Symbol};
use lambda_ir::{
    FieldMap, InteriorNode, LineIndex, Span, SyntaxKind, SyntaxNode, SyntaxTree, Token, TokenKind,
    TokenLeaf,
};
use lambda_lexer::{LexError, Lexer};
use smallvec::SmallVec;
use tracing::trace;

pub use error::{ParseError, ParseErrorKind};

use recovery::{Recovery, RecoveryGuard};
use stack::{error_node, ParseStack};

/// Result of parsing: the tree is always present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
    pub lex_errors: Vec<LexError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.lex_errors.is_empty()
    }

    /// Lexical and syntax errors as diagnostics, in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut located: Vec<(Span, Diagnostic)> = self
            .lex_errors
            .iter()
            .map(|err| (err.span, err.to_diagnostic()))
            .chain(self.errors.iter().map(|err| (err.span, err.to_diagnostic())))
            .collect();
        located.sort_by_key(|(span, _)| (span.start, span.end));
        located.into_iter().map(|(_, diag)| diag).collect()
    }
}

/// Parse `source` with `grammar`.
pub fn parse(source: &str, grammar: &Grammar) -> ParseOutput {
    Parser::new(source, grammar).parse()
}

/// A single parse in progress. Owns its stack and lookahead; only the
/// grammar is shared.
pub struct Parser<'src, 'g> {
    grammar: &'g Grammar,
    lexer: Lexer<'src, 'g>,
    stack: ParseStack,
    lookahead: Token,
    /// Symbols a repair decided to insert before `lookahead`.
    inserted: SmallVec<[Symbol; 2]>,
    /// Comments waiting for the next shifted token.
    pending_trivia: Vec<Token>,
    /// End of the last token taken from the input.
    last_end: u32,
    errors: Vec<ParseError>,
    guard: RecoveryGuard,
    /// Set by the first error of a recovery run; cleared by the next shift.
    recovering: bool,
}

impl<'src, 'g> Parser<'src, 'g> {
    pub fn new(source: &'src str, grammar: &'g Grammar) -> Self {
        let mut parser = Parser {
            grammar,
            lexer: Lexer::new(source, grammar),
            stack: ParseStack::new(grammar.start_state()),
            lookahead: Token::new(TokenKind::Eof, Span::point(0)),
            inserted: SmallVec::new(),
            pending_trivia: Vec::new(),
            last_end: 0,
            errors: Vec::new(),
            guard: RecoveryGuard::default(),
            recovering: false,
        };
        parser.advance();
        parser
    }

    /// Run the automaton to completion.
    pub fn parse(mut self) -> ParseOutput {
        loop {
            if let Some(&Symbol::NonTerminal(nonterminal)) = self.inserted.first() {
                self.inserted.remove(0);
                self.insert_missing_node(nonterminal);
                continue;
            }

            let kind = self.current_kind();
            if kind == TokenKind::Error {
                self.skip_lookahead();
                continue;
            }

            let state = self.stack.top_state();
            match self.grammar.action(state, kind) {
                Some(Action::Shift(next)) => self.shift(next),
                Some(Action::Reduce(id)) => self.reduce(id),
                Some(Action::Accept) => return self.finish(true),
                None if !self.inserted.is_empty() => {
                    // A repair that no longer applies; recover on the real token.
                    self.inserted.clear();
                }
                None => match self.recover() {
                    Recovery::Resumed => {}
                    Recovery::GaveUp => return self.finish(false),
                },
            }
        }
    }

    /// Kind the automaton sees next: a pending inserted token, or the
    /// lookahead.
    fn current_kind(&self) -> TokenKind {
        match self.inserted.first() {
            Some(&Symbol::Terminal(kind)) => kind,
            _ => self.lookahead.kind,
        }
    }

    /// Fetch the next non-comment token. Comments go to `pending_trivia`.
    fn advance(&mut self) {
        loop {
            let token = self.lexer.next_token();
            if token.kind.is_trivia() {
                self.pending_trivia.push(token);
            } else {
                self.lookahead = token;
                return;
            }
        }
    }

    fn take_lookahead(&mut self) -> TokenLeaf {
        let eof = Token::new(TokenKind::Eof, self.lookahead.span);
        let token = std::mem::replace(&mut self.lookahead, eof);
        self.last_end = token.span.end;
        let leaf = TokenLeaf::new(token, std::mem::take(&mut self.pending_trivia));
        self.advance();
        leaf
    }

    fn shift(&mut self, next: StateId) {
        if let Some(Symbol::Terminal(kind)) = self.inserted.first().copied() {
            self.inserted.remove(0);
            trace!(%next, %kind, "shift missing");
            self.stack.push(next, TokenLeaf::missing(kind, self.last_end).into());
            return;
        }
        trace!(%next, token = %self.lookahead.kind, "shift");
        self.recovering = false;
        let leaf = self.take_lookahead();
        self.stack.push(next, leaf.into());
    }

    fn reduce(&mut self, id: ProductionId) {
        let grammar = self.grammar;
        let production = grammar.production(id);
        let (children, trailing) = self.stack.pop_children(production.len());
        let node = builder::build(production, children, self.last_end);
        let top = self.stack.top_state();
        trace!(rule = %id, kind = %production.kind(), "reduce");

        if let Some(next) = grammar.goto(top, production.lhs()) {
            self.stack.push(next, node.into());
        } else {
            // Tables from `Grammar::build` define every goto a reduction
            // reaches; keep the node as debris rather than lose it.
            let debris = error_node(vec![node.into()], self.last_end);
            self.stack.push_extra(debris.into());
        }
        for extra in trailing {
            self.stack.push_extra(extra);
        }
    }

    fn insert_missing_node(&mut self, nonterminal: NonTerminal) {
        let top = self.stack.top_state();
        if let Some(next) = self.grammar.goto(top, nonterminal) {
            let name = self.grammar.nonterminal_name(nonterminal);
            trace!(%next, nonterminal = name, "insert missing");
            self.stack.push(next, InteriorNode::missing(self.last_end).into());
        } else {
            self.inserted.clear();
        }
    }

    /// Move the lookahead into an error node on top of the stack.
    fn skip_lookahead(&mut self) {
        let leaf = self.take_lookahead();
        trace!(token = %leaf.token().kind, "skip");
        if let Some(error) = self.stack.top_error_mut() {
            error.push_child(leaf.into());
        } else {
            let offset = leaf.token().span.start;
            self.stack.push_extra(error_node(vec![leaf.into()], offset).into());
        }
    }

    /// Assemble the tree. `accepted` is false when recovery gave up at the
    /// end of input; the stack is then wrapped whole in an error node.
    fn finish(self, accepted: bool) -> ParseOutput {
        let Parser {
            stack,
            mut lexer,
            errors,
            pending_trivia,
            last_end,
            ..
        } = self;

        let mut children = Vec::new();
        let mut fields = FieldMap::EMPTY;
        let mut offset = last_end;
        let entries = stack.into_entries();
        if accepted {
            // The start symbol, with any extras around it.
            for entry in entries {
                match entry.node {
                    SyntaxNode::Interior(root)
                        if !entry.extra && root.kind() == SyntaxKind::SourceFile =>
                    {
                        let base = children.len();
                        for (field, index) in root.fields().iter() {
                            fields.insert(field, base + index);
                        }
                        offset = root.span().start;
                        children.extend(root.into_children());
                    }
                    node => children.push(node),
                }
            }
        } else {
            let debris: Vec<SyntaxNode> = entries.into_iter().map(|entry| entry.node).collect();
            children.push(error_node(debris, last_end).into());
        }

        let root = InteriorNode::new(SyntaxKind::SourceFile, children, fields, offset);
        let tree = SyntaxTree::new(root.into(), pending_trivia, LineIndex::new(lexer.source()));
        ParseOutput {
            tree,
            errors,
            lex_errors: lexer.take_errors(),
        }
    }
}
