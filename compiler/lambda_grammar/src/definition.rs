//! Grammar descriptions.
//!
//! A grammar is plain data: keywords, nonterminal names, and rules that
//! name their syntactic kind, their field layout and their precedence.
//! [`Grammar::build`](crate::Grammar::build) turns a description into
//! parse tables.

use std::fmt;

use lambda_ir::{Field, SyntaxKind, TokenKind};

/// Index into [`GrammarDef::nonterminals`]. Index 0 is the start symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct NonTerminal(pub u16);

impl NonTerminal {
    pub const START: NonTerminal = NonTerminal(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A grammar symbol on a rule's right-hand side.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(kind) => write!(f, "{kind}"),
            Symbol::NonTerminal(nt) => write!(f, "<{}>", nt.0),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Assoc {
    #[default]
    None,
    Left,
    Right,
}

/// Conflict-resolution precedence of a rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Precedence {
    pub level: i8,
    pub assoc: Assoc,
}

impl Precedence {
    pub const NONE: Precedence = Precedence {
        level: 0,
        assoc: Assoc::None,
    };

    pub const fn left(level: i8) -> Self {
        Precedence {
            level,
            assoc: Assoc::Left,
        }
    }

    pub const fn right(level: i8) -> Self {
        Precedence {
            level,
            assoc: Assoc::Right,
        }
    }
}

/// One production: `lhs := rhs`, building a node of `kind`.
///
/// `fields` pairs a right-hand-side position with the role that child
/// plays. Positions not listed carry no role.
#[derive(Copy, Clone, Debug)]
pub struct RuleDef {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
    pub kind: SyntaxKind,
    pub fields: &'static [(u8, Field)],
    pub precedence: Precedence,
}

impl RuleDef {
    pub const fn new(lhs: NonTerminal, rhs: &'static [Symbol], kind: SyntaxKind) -> Self {
        RuleDef {
            lhs,
            rhs,
            kind,
            fields: &[],
            precedence: Precedence::NONE,
        }
    }

    #[must_use]
    pub const fn with_fields(mut self, fields: &'static [(u8, Field)]) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub const fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }
}

/// A complete grammar description.
#[derive(Copy, Clone, Debug)]
pub struct GrammarDef {
    pub name: &'static str,
    /// Reserved words and the token kind each one lexes as.
    pub keywords: &'static [(&'static str, TokenKind)],
    /// Display names, indexed by [`NonTerminal`].
    pub nonterminals: &'static [&'static str],
    pub rules: &'static [RuleDef],
}
