//! Syntax errors.
//!
//! Parsing never fails outright. Each problem recovery absorbed is recorded
//! as a [`ParseError`] next to the tree, and converts into a
//! [`Diagnostic`] for rendering.

use lambda_diagnostic::{Diagnostic, ErrorCode};
use lambda_grammar::TokenSet;
use lambda_ir::{Span, Token, TokenKind};

/// A syntax error at `span`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    /// A token with no action in the current state.
    #[error("unexpected {found}")]
    UnexpectedToken { found: Token, expected: TokenSet },

    /// Recovery inserted an empty node for a nonterminal.
    #[error("expected {name}")]
    MissingNode { name: &'static str },

    /// Recovery inserted the `)` for the `(` at `open`.
    #[error("unclosed delimiter `(`")]
    UnclosedDelimiter { open: Span },

    /// Recovery inserted a token.
    #[error("expected {expected}")]
    MissingToken { expected: TokenKind },
}

impl ParseErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::MissingNode { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::MissingToken { .. } => ErrorCode::E1004,
        }
    }
}

impl ParseError {
    #[cold]
    pub fn new(span: Span, kind: ParseErrorKind) -> Self {
        ParseError { span, kind }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.error_code()).with_message(self.kind.to_string());
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. } => {
                let diag = diag.with_label(self.span, "not valid here");
                match expected.count() {
                    0 => diag,
                    1 => diag.with_note(format!("expected {expected}")),
                    _ => diag.with_note(format!("expected one of {expected}")),
                }
            }
            ParseErrorKind::MissingNode { name } => diag
                .with_label(self.span, format!("{name} missing here"))
                .with_suggestion(format!("insert the missing {name}")),
            ParseErrorKind::UnclosedDelimiter { open } => diag
                .with_label(self.span, "expected `)` here")
                .with_secondary_label(*open, "unclosed delimiter")
                .with_suggestion("add a closing `)`"),
            ParseErrorKind::MissingToken { expected } => diag
                .with_label(self.span, format!("expected {expected} here"))
                .with_suggestion(format!("insert {expected}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_lists_expected() {
        let err = ParseError::new(
            Span::new(2, 3),
            ParseErrorKind::UnexpectedToken {
                found: Token::new(TokenKind::RParen, Span::new(2, 3)),
                expected: TokenSet::new().with(TokenKind::LParen).with(TokenKind::Ident),
            },
        );
        assert_eq!(err.to_string(), "unexpected `)`");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1001);
        assert_eq!(diag.notes, vec!["expected one of identifier, `(`".to_string()]);
    }

    #[test]
    fn test_unclosed_delimiter_points_at_opener() {
        let err = ParseError::new(
            Span::point(4),
            ParseErrorKind::UnclosedDelimiter {
                open: Span::new(0, 1),
            },
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1003);
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.primary_span(), Some(Span::point(4)));
        assert_eq!(diag.labels[1].span, Span::new(0, 1));
    }

    #[test]
    fn test_missing_codes() {
        let node = ParseErrorKind::MissingNode { name: "expression" };
        assert_eq!(node.to_string(), "expected expression");
        assert_eq!(node.error_code(), ErrorCode::E1002);

        let token = ParseErrorKind::MissingToken {
            expected: TokenKind::Semicolon,
        };
        assert_eq!(token.to_string(), "expected `;`");
        assert_eq!(token.error_code(), ErrorCode::E1004);
    }
}
