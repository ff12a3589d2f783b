//! Bitsets of token kinds.

use std::fmt;

use lambda_ir::TokenKind;

/// A set of token kinds, one bit per `TokenKind` index.
///
/// Used for FIRST sets during table generation and for the
/// "expected one of" list in syntax errors.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSet(u32);

// One bit per kind must fit.
const _: () = assert!(TokenKind::COUNT <= 32);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1 << kind.index())
    }

    /// Add a token kind (builder form, usable in consts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1 << kind.index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1 << kind.index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Members in `TokenKind` order.
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |&kind| self.contains(kind))
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(TokenSet::new(), TokenSet::with)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Comma-separated, as listed in "expected one of" notes.
impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        const OPENERS: TokenSet = TokenSet::new()
            .with(TokenKind::LParen)
            .with(TokenKind::Ident);
        assert!(OPENERS.contains(TokenKind::LParen));
        assert!(!OPENERS.contains(TokenKind::RParen));
        assert_eq!(OPENERS.count(), 2);
    }

    #[test]
    fn test_union_and_iter_order() {
        let set = TokenSet::single(TokenKind::Eof).union(TokenSet::single(TokenKind::Ident));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(set.to_string(), "identifier, end of input");
    }

    #[test]
    fn test_every_kind_fits() {
        let all: TokenSet = TokenKind::ALL.into_iter().collect();
        assert_eq!(all.count() as usize, TokenKind::COUNT);
        assert!(TokenSet::default().is_empty());
    }
}
