//! Lambda grammar - grammar descriptions and their parse tables.
//!
//! A grammar is described as data ([`GrammarDef`]) and compiled at engine
//! start into an immutable [`Grammar`]:
//!
//! - canonical LR(1) action/goto tables with precedence-based conflict
//!   resolution
//! - a keyword automaton that reclassifies identifier-class lexemes
//! - per-rule syntactic kinds and field layouts for the tree builder
//!
//! Two instances ship with the crate: [`Grammar::base`] and
//! [`Grammar::extended`]. They share one engine and differ only in data.

mod definition;
mod error;
mod grammar;
mod keywords;
pub mod lambda;
mod lr;
mod table;
mod token_set;

pub use definition::{Assoc, GrammarDef, NonTerminal, Precedence, RuleDef, Symbol};
pub use error::GrammarError;
pub use grammar::{Grammar, Production};
pub use keywords::KeywordAutomaton;
pub use table::{Action, ParseTable, ProductionId, StateId};
pub use token_set::TokenSet;

#[cfg(test)]
mod tests;
