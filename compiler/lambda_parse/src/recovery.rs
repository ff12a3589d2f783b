//! Error recovery.
//!
//! Runs when the lookahead has no action in the top state. Three
//! strategies are tried in order:
//!
//! 1. **Repair**: insert one or two missing symbols (nonterminals first)
//!    if a simulation of the automaton on the state stack shows the
//!    lookahead is then shifted or accepted. Simulations share the real
//!    stack and copy only what they push.
//! 2. **Pop**: abandon stack entries down to the nearest state that has an
//!    action on the lookahead, wrapping them in one error node.
//! 3. **Skip**: move the lookahead into an error node. At end of input
//!    there is nothing to skip and recovery gives up; the parser then wraps
//!    whatever is on the stack.
//!
//! Every step consumes a token or leaves the stack strictly lower than the
//! last step of the same kind at the same input position, so recovery
//! always terminates.

use lambda_grammar::{Action, StateId, Symbol};
use lambda_ir::{Span, TokenKind};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::stack::error_node;
use crate::{ParseError, ParseErrorKind, Parser};

pub(crate) enum Recovery {
    Resumed,
    GaveUp,
}

type Repair = SmallVec<[Symbol; 2]>;

/// State stack seen by a simulation. States below `floor` are read from
/// the parser's stack; only states the simulation pushes are owned, so a
/// copy costs what the simulation added, not the depth of the stack.
#[derive(Clone)]
struct SimStack<'a> {
    base: &'a [StateId],
    floor: usize,
    pushed: SmallVec<[StateId; 8]>,
}

impl<'a> SimStack<'a> {
    fn new(base: &'a [StateId]) -> Self {
        SimStack {
            base,
            floor: base.len(),
            pushed: SmallVec::new(),
        }
    }

    fn len(&self) -> usize {
        self.floor + self.pushed.len()
    }

    fn top(&self) -> Option<StateId> {
        self.pushed.last().copied().or_else(|| {
            self.floor
                .checked_sub(1)
                .and_then(|index| self.base.get(index).copied())
        })
    }

    fn push(&mut self, state: StateId) {
        self.pushed.push(state);
    }

    /// Pop `count` states; `count` must not exceed `len`.
    fn pop(&mut self, count: usize) {
        let owned = count.min(self.pushed.len());
        self.pushed.truncate(self.pushed.len() - owned);
        self.floor = self.floor.saturating_sub(count - owned);
    }
}

/// Per-position bookkeeping that keeps recovery from cycling.
#[derive(Default)]
pub(crate) struct RecoveryGuard {
    position: Option<u32>,
    /// Stack depth at the last repair here.
    repair_depth: Option<usize>,
    /// Level the last pop here cut to.
    pop_level: Option<usize>,
}

impl RecoveryGuard {
    fn enter(&mut self, position: u32) {
        if self.position != Some(position) {
            *self = RecoveryGuard {
                position: Some(position),
                ..RecoveryGuard::default()
            };
        }
    }

    fn may_repair(&self, depth: usize) -> bool {
        self.repair_depth.is_none_or(|last| depth < last)
    }

    /// Pops may only cut strictly below this level.
    fn pop_limit(&self, depth: usize) -> usize {
        self.pop_level.map_or(depth, |last| last.min(depth))
    }
}

impl Parser<'_, '_> {
    pub(crate) fn recover(&mut self) -> Recovery {
        let position = self.lookahead.span.start;
        let depth = self.stack.depth();
        self.guard.enter(position);

        if self.guard.may_repair(depth) {
            if let Some(repair) = self.find_repair() {
                debug!(position, depth, ?repair, "repair with missing symbols");
                self.guard.repair_depth = Some(depth);
                let error = self.missing_error(repair[0]);
                self.report(error);
                self.inserted = repair;
                return Recovery::Resumed;
            }
        }

        let state = self.stack.top_state();
        let error = ParseError::new(
            self.lookahead.span,
            ParseErrorKind::UnexpectedToken {
                found: self.lookahead.clone(),
                expected: self.grammar.expected_tokens(state),
            },
        );
        self.report(error);

        if let Some(level) = self.resync_level(depth) {
            self.guard.pop_level = Some(level);
            let popped = self.stack.abandon_above(level);
            debug!(position, from = depth, to = level, "pop to resynchronize");
            let offset = popped.first().map_or(self.last_end, |node| node.span().start);
            self.stack.push_extra(error_node(popped, offset).into());
            return Recovery::Resumed;
        }

        if self.lookahead.kind == TokenKind::Eof {
            debug!(position, depth, "nothing left to skip");
            return Recovery::GaveUp;
        }

        debug!(position, token = %self.lookahead.kind, "skip token");
        self.skip_lookahead();
        Recovery::Resumed
    }

    /// Record `error` unless it belongs to a recovery run already reported.
    fn report(&mut self, error: ParseError) {
        if self.recovering {
            return;
        }
        self.recovering = true;
        debug!(%error, span = %error.span, "syntax error");
        self.errors.push(error);
    }

    fn missing_error(&self, symbol: Symbol) -> ParseError {
        let span = Span::point(self.last_end);
        let kind = match symbol {
            Symbol::NonTerminal(nonterminal) => ParseErrorKind::MissingNode {
                name: self.grammar.nonterminal_name(nonterminal),
            },
            Symbol::Terminal(TokenKind::RParen) => match self.stack.open_delimiter() {
                Some(open) => ParseErrorKind::UnclosedDelimiter { open },
                None => ParseErrorKind::MissingToken {
                    expected: TokenKind::RParen,
                },
            },
            Symbol::Terminal(expected) => ParseErrorKind::MissingToken { expected },
        };
        ParseError::new(span, kind)
    }

    /// Shortest insertion after which the lookahead can be consumed.
    fn find_repair(&self) -> Option<Repair> {
        let base = SimStack::new(self.stack.states());
        let lookahead = Symbol::Terminal(self.lookahead.kind);
        let symbols = self.grammar.repair_symbols();

        let mut after_first = Vec::new();
        for &first in symbols {
            let mut states = base.clone();
            if !self.simulate(&mut states, first) {
                continue;
            }
            let mut trial = states.clone();
            if self.simulate(&mut trial, lookahead) {
                return Some(smallvec![first]);
            }
            after_first.push((first, states));
        }

        for (first, states) in &after_first {
            for &second in symbols {
                let mut trial = states.clone();
                if self.simulate(&mut trial, second) && self.simulate(&mut trial, lookahead) {
                    return Some(smallvec![*first, second]);
                }
            }
        }
        None
    }

    /// Feed `symbol` to the automaton over a bare state stack. Terminals
    /// run any reductions they trigger and succeed once shifted or
    /// accepted; nonterminals take a goto.
    fn simulate(&self, states: &mut SimStack<'_>, symbol: Symbol) -> bool {
        let kind = match symbol {
            Symbol::Terminal(kind) => kind,
            Symbol::NonTerminal(nonterminal) => {
                let next = states
                    .top()
                    .and_then(|top| self.grammar.goto(top, nonterminal));
                let Some(next) = next else {
                    return false;
                };
                states.push(next);
                return true;
            }
        };

        loop {
            let Some(top) = states.top() else {
                return false;
            };
            match self.grammar.action(top, kind) {
                Some(Action::Shift(next)) => {
                    states.push(next);
                    return true;
                }
                Some(Action::Accept) => return true,
                Some(Action::Reduce(id)) => {
                    let production = self.grammar.production(id);
                    if production.len() >= states.len() {
                        return false;
                    }
                    states.pop(production.len());
                    let next = states
                        .top()
                        .and_then(|top| self.grammar.goto(top, production.lhs()));
                    let Some(next) = next else {
                        return false;
                    };
                    states.push(next);
                }
                None => return false,
            }
        }
    }

    /// Highest stack level below the top whose state has an action on the
    /// lookahead.
    fn resync_level(&self, depth: usize) -> Option<usize> {
        let states = self.stack.states();
        let kind = self.lookahead.kind;
        let limit = self.guard.pop_limit(depth);
        (0..limit)
            .rev()
            .find(|&level| self.grammar.action(states[level], kind).is_some())
    }
}
