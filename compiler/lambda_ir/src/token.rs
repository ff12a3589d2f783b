//! Token kinds and tokens produced by the lexer.

use std::fmt;

use crate::Span;

/// Every terminal the lexer can produce.
///
/// Keywords are listed here even when a grammar does not reserve them;
/// a grammar that omits a keyword simply never reclassifies its text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum TokenKind {
    /// `[A-Za-z0-9_]+` that is not a keyword of the active grammar.
    Ident,
    /// `#` through end of line. Trivia.
    Comment,
    LParen,
    RParen,
    Colon,
    Eq,
    Semicolon,
    True,
    False,
    Let,
    If,
    Then,
    Else,
    /// A run of characters no lexical rule accepts.
    Error,
    Eof,
}

impl TokenKind {
    pub const COUNT: usize = 15;

    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::Ident,
        TokenKind::Comment,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Colon,
        TokenKind::Eq,
        TokenKind::Semicolon,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Let,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::Else,
        TokenKind::Error,
        TokenKind::Eof,
    ];

    /// Dense index for bitsets and tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used in S-expressions and messages.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Comment => "comment",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "end of input",
            _ => match self.lexeme() {
                Some(text) => text,
                None => "",
            },
        }
    }

    /// Fixed spelling, for punctuation and keywords.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::Colon => Some(":"),
            TokenKind::Eq => Some("="),
            TokenKind::Semicolon => Some(";"),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Let => Some("let"),
            TokenKind::If => Some("if"),
            TokenKind::Then => Some("then"),
            TokenKind::Else => Some("else"),
            TokenKind::Ident | TokenKind::Comment | TokenKind::Error | TokenKind::Eof => None,
        }
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
        )
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::Colon
                | TokenKind::Eq
                | TokenKind::Semicolon
        )
    }

    /// Comments never reach the automaton.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment)
    }

    /// Named leaves show up in S-expressions; anonymous ones do not.
    #[inline]
    pub const fn is_named(self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(text) => write!(f, "`{text}`"),
            None => f.write_str(self.name()),
        }
    }
}

/// A classified lexeme.
///
/// Tokens with a fixed spelling carry no text; identifiers, comments and
/// error runs keep their source text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    text: Option<Box<str>>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            text: None,
        }
    }

    pub fn with_text(kind: TokenKind, span: Span, text: &str) -> Self {
        Token {
            kind,
            span,
            text: Some(text.into()),
        }
    }

    /// Source text of the token.
    pub fn text(&self) -> &str {
        match &self.text {
            Some(text) => text,
            None => self.kind.lexeme().unwrap_or(""),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Error => write!(f, "{} `{}`", self.kind, self.text()),
            _ => write!(f, "{}", self.kind),
        }
    }
}
