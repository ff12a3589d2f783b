//! Lexer error types.
//!
//! The lexer never fails: an unrecognized run becomes an `Error` token and
//! one [`LexError`] is recorded for it. A source too long for 32-bit
//! offsets is lexed up to the limit and reported once.

use lambda_diagnostic::{Diagnostic, ErrorCode};
use lambda_ir::Span;

/// A lexical error with enough context to render a diagnostic.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// One or more characters no lexical rule accepts. `found` is the first.
    #[error("unrecognized character `{found}`")]
    UnrecognizedCharacter { found: char },
    /// The source is `len` bytes; only the first `u32::MAX` are lexed.
    #[error("source of {len} bytes is too long")]
    SourceTooLong { len: usize },
}

impl LexError {
    pub fn unrecognized(span: Span, found: char) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnrecognizedCharacter { found },
        }
    }

    pub fn too_long(limit: u32, len: usize) -> Self {
        LexError {
            span: Span::point(limit),
            kind: LexErrorKind::SourceTooLong { len },
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self.kind {
            LexErrorKind::UnrecognizedCharacter { found } => {
                let label = if self.span.len() > found.len_utf8() as u32 {
                    "these characters are not part of the language"
                } else {
                    "this character is not part of the language"
                };
                Diagnostic::error(ErrorCode::E0001)
                    .with_message(format!("unrecognized character `{found}`"))
                    .with_label(self.span, label)
                    .with_note("identifiers use letters, digits and `_`; comments start with `#`")
            }
            LexErrorKind::SourceTooLong { len } => Diagnostic::error(ErrorCode::E0002)
                .with_message(format!("source of {len} bytes is too long"))
                .with_label(self.span, "nothing after this point is parsed")
                .with_note(format!("sources are limited to {} bytes", u32::MAX)),
        }
    }
}
