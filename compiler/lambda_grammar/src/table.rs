//! Action and goto tables.

use std::fmt;

use lambda_ir::TokenKind;
use rustc_hash::FxHashMap;

use crate::NonTerminal;

/// Automaton state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Index of a rule in its grammar description.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct ProductionId(pub u16);

impl ProductionId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// What the automaton does for a (state, lookahead) pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
}

/// Explicit (state, symbol) → entry maps. A missing entry is a syntax
/// error.
#[derive(Clone, Debug)]
pub struct ParseTable {
    actions: FxHashMap<(StateId, TokenKind), Action>,
    gotos: FxHashMap<(StateId, NonTerminal), StateId>,
    state_count: usize,
}

impl ParseTable {
    pub(crate) fn new(
        actions: FxHashMap<(StateId, TokenKind), Action>,
        gotos: FxHashMap<(StateId, NonTerminal), StateId>,
        state_count: usize,
    ) -> Self {
        ParseTable {
            actions,
            gotos,
            state_count,
        }
    }

    /// The automaton always starts in state 0.
    pub const START: StateId = StateId(0);

    #[inline]
    pub fn action(&self, state: StateId, lookahead: TokenKind) -> Option<Action> {
        self.actions.get(&(state, lookahead)).copied()
    }

    #[inline]
    pub fn goto(&self, state: StateId, nonterminal: NonTerminal) -> Option<StateId> {
        self.gotos.get(&(state, nonterminal)).copied()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn goto_count(&self) -> usize {
        self.gotos.len()
    }
}
