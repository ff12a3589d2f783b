use lambda_ir::{Field, TokenKind};

/// A grammar description that cannot be turned into tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar `{grammar}` has no rules for its start symbol")]
    NoStartRule { grammar: &'static str },

    #[error("rule {rule} refers to nonterminal {index}, but only {count} are declared")]
    UnknownNonTerminal { rule: usize, index: u16, count: usize },

    #[error("field `{field}` of rule {rule} points at position {position}, but the rule has {len} children")]
    FieldOutOfRange {
        rule: usize,
        field: Field,
        position: u8,
        len: usize,
    },

    #[error("field `{field}` of rule {rule} is placed on punctuation {token}")]
    FieldOnPunctuation {
        rule: usize,
        field: Field,
        token: TokenKind,
    },

    #[error("field `{field}` appears more than once in rule {rule}")]
    DuplicateField { rule: usize, field: Field },

    #[error("position {position} of rule {rule} has more than one role")]
    DuplicateRole { rule: usize, position: u8 },

    #[error("rule {rule} uses {token}, which no keyword of the grammar produces")]
    UndeclaredKeyword { rule: usize, token: TokenKind },

    #[error("rule {rule} uses {token}, which is never handed to the automaton")]
    UnusableTerminal { rule: usize, token: TokenKind },

    #[error("keyword `{text}` is not a valid identifier spelling")]
    InvalidKeyword { text: &'static str },

    #[error("keyword `{text}` maps to {kind}, which is not a keyword kind")]
    NotAKeywordKind { text: &'static str, kind: TokenKind },

    #[error("keyword `{text}` is declared more than once")]
    DuplicateKeyword { text: &'static str },

    #[error("shift/reduce conflict on {token} in state {state} (rule {rule}) not resolved by precedence")]
    ShiftReduce {
        state: u32,
        token: TokenKind,
        rule: usize,
    },

    #[error("reduce/reduce conflict on {token} in state {state} between rules {first} and {second}")]
    ReduceReduce {
        state: u32,
        token: TokenKind,
        first: usize,
        second: usize,
    },

    #[error("grammar exceeds the limit of {limit} {what}")]
    LimitExceeded { what: &'static str, limit: usize },
}
