//! Lexer for the lambda grammars.
//!
//! Two automata cooperate. The structural automaton in [`dfa`] is shared by
//! every grammar and splits the input into identifier-class runs,
//! punctuation, comments and whitespace. Each identifier-class run is then
//! handed to the active grammar's [`KeywordAutomaton`], which reclassifies
//! it only when the whole run spells a keyword.
//!
//! Lexing never fails. Whitespace is skipped, comments come out as
//! [`TokenKind::Comment`] tokens, and runs of unrecognized characters come
//! out as [`TokenKind::Error`] tokens with a matching [`LexError`].

mod dfa;
mod lex_error;

use lambda_grammar::{Grammar, KeywordAutomaton};
use lambda_ir::{Span, Token, TokenKind};

use dfa::RawTag;

pub use lex_error::{LexError, LexErrorKind};

/// Result of lexing a whole source: every token through `Eof`, comments
/// included, plus the lexical errors met on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source` with the keywords of `grammar`.
pub fn lex(source: &str, grammar: &Grammar) -> LexOutput {
    let mut lexer = Lexer::new(source, grammar);
    let tokens = lexer.by_ref().collect();
    LexOutput {
        tokens,
        errors: lexer.take_errors(),
    }
}

/// Pull-based lexer over a fully buffered source.
///
/// Offsets are byte offsets and must fit in `u32`. Anything past
/// `u32::MAX` bytes is not lexed; it is reported once, when `Eof` is
/// reached.
pub struct Lexer<'src, 'g> {
    source: &'src str,
    keywords: &'g KeywordAutomaton,
    pos: u32,
    errors: Vec<LexError>,
    /// Full length of a source cut short at the offset limit.
    overflow: Option<usize>,
    finished: bool,
}

impl<'src, 'g> Lexer<'src, 'g> {
    pub fn new(source: &'src str, grammar: &'g Grammar) -> Self {
        Self::with_keywords(source, grammar.keywords())
    }

    pub fn with_keywords(source: &'src str, keywords: &'g KeywordAutomaton) -> Self {
        Self::bounded(source, keywords, u32::MAX)
    }

    /// Lex at most `limit` bytes of `source`, cut back to a character
    /// boundary.
    fn bounded(source: &'src str, keywords: &'g KeywordAutomaton, limit: u32) -> Self {
        let mut end = source.len().min(limit as usize);
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let overflow = (end < source.len()).then_some(source.len());
        Lexer {
            source: source.get(..end).unwrap_or(""),
            keywords,
            pos: 0,
            errors: Vec::new(),
            overflow,
            finished: false,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset the next call to [`Lexer::next_token`] starts from.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    fn end(&self) -> u32 {
        self.source.len() as u32
    }

    /// The token starting at or after `position`, and the offset just past it.
    ///
    /// Whitespace before the token is skipped. At end of input this yields
    /// `Eof` at the source length and returns that same length, so calling
    /// it again is idempotent. `position` must lie on a character boundary.
    pub fn token_at(&self, position: u32) -> (Token, u32) {
        let bytes = self.source.as_bytes();
        let mut start = position.min(self.end()) as usize;
        loop {
            let Some(raw) = dfa::scan(bytes, start) else {
                let end = self.end();
                return (Token::new(TokenKind::Eof, Span::point(end)), end);
            };
            let end = start + raw.len;
            let span = Span::new(start as u32, end as u32);
            let text = self.source.get(start..end).unwrap_or("");
            let token = match raw.tag {
                RawTag::Whitespace => {
                    start = end;
                    continue;
                }
                RawTag::Word => match self.keywords.classify(text) {
                    Some(keyword) => Token::new(keyword, span),
                    None => Token::with_text(TokenKind::Ident, span, text),
                },
                RawTag::Comment => Token::with_text(TokenKind::Comment, span, text),
                RawTag::Invalid => Token::with_text(TokenKind::Error, span, text),
                RawTag::LParen => Token::new(TokenKind::LParen, span),
                RawTag::RParen => Token::new(TokenKind::RParen, span),
                RawTag::Colon => Token::new(TokenKind::Colon, span),
                RawTag::Equals => Token::new(TokenKind::Eq, span),
                RawTag::Semicolon => Token::new(TokenKind::Semicolon, span),
            };
            return (token, span.end);
        }
    }

    /// Next token, advancing the lexer. Keeps returning `Eof` at the end.
    pub fn next_token(&mut self) -> Token {
        let (token, next) = self.token_at(self.pos);
        self.pos = next;
        match token.kind {
            TokenKind::Error => {
                let found = token.text().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                self.errors.push(LexError::unrecognized(token.span, found));
            }
            TokenKind::Eof => {
                if let Some(len) = self.overflow.take() {
                    self.errors.push(LexError::too_long(token.span.start, len));
                }
            }
            _ => {}
        }
        token
    }

    /// Lexical errors recorded so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }
}

/// Yields every token up to and including a single `Eof`.
impl Iterator for Lexer<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::Eof;
        Some(token)
    }
}

#[cfg(test)]
mod tests;
