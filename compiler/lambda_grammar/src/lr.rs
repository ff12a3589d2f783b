//! Canonical LR(1) table generation.
//!
//! States are closures of LR(1) item sets, identified by their kernels.
//! Shift/reduce conflicts are settled by precedence: the reducing rule's
//! level is compared with the levels of the in-progress items (dot past
//! the first symbol) that could consume the lookahead. The higher level
//! wins; on a tie the reducing rule's associativity decides (left
//! reduces, right shifts). Anything left over is a [`GrammarError`].

use std::collections::{BTreeMap, BTreeSet};

use lambda_ir::TokenKind;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::definition::{Assoc, GrammarDef, NonTerminal, Precedence, Symbol};
use crate::table::{Action, ParseTable, ProductionId, StateId};
use crate::{GrammarError, TokenSet};

/// Upper bound on generated states.
const MAX_STATES: usize = 1 << 16;

const AUGMENTED_RHS: &[Symbol] = &[Symbol::NonTerminal(NonTerminal::START)];

/// A rule as the generator sees it. Rule 0 is the augmented `S' := start`;
/// rule `i + 1` is description rule `i`.
struct Rule {
    lhs: NonTerminal,
    rhs: &'static [Symbol],
    precedence: Precedence,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
struct Item {
    rule: u16,
    dot: u8,
    lookahead: TokenKind,
}

#[derive(Default)]
struct Candidates {
    shift: Option<StateId>,
    reduces: SmallVec<[u16; 2]>,
    accept: bool,
}

pub(crate) fn generate(def: &GrammarDef) -> Result<ParseTable, GrammarError> {
    let generator = Generator::new(def);
    let (states, transitions) = generator.item_sets()?;

    let mut actions = FxHashMap::default();
    let mut gotos = FxHashMap::default();

    for (index, items) in states.iter().enumerate() {
        let state = StateId(index as u32);
        let edges = &transitions[index];

        for (&symbol, &target) in edges {
            if let Symbol::NonTerminal(nt) = symbol {
                gotos.insert((state, nt), target);
            }
        }

        let mut candidates: BTreeMap<TokenKind, Candidates> = BTreeMap::new();
        for item in items {
            let rule = &generator.rules[item.rule as usize];
            match rule.rhs.get(item.dot as usize) {
                Some(&Symbol::Terminal(token)) => {
                    candidates.entry(token).or_default().shift =
                        edges.get(&Symbol::Terminal(token)).copied();
                }
                Some(Symbol::NonTerminal(_)) => {}
                None if item.rule == 0 => candidates.entry(item.lookahead).or_default().accept = true,
                None => {
                    let entry = candidates.entry(item.lookahead).or_default();
                    if !entry.reduces.contains(&item.rule) {
                        entry.reduces.push(item.rule);
                    }
                }
            }
        }

        for (token, candidate) in candidates {
            let action = match (candidate.shift, candidate.reduces.as_slice()) {
                _ if candidate.accept => Action::Accept,
                (_, [first, second, ..]) => {
                    return Err(GrammarError::ReduceReduce {
                        state: state.0,
                        token,
                        first: usize::from(*first) - 1,
                        second: usize::from(*second) - 1,
                    });
                }
                (Some(target), []) => Action::Shift(target),
                (None, [rule]) => Action::Reduce(ProductionId(rule - 1)),
                (Some(target), [rule]) => {
                    generator.resolve(state, items, token, *rule, target)?
                }
                (None, []) => continue,
            };
            actions.insert((state, token), action);
        }
    }

    debug!(
        grammar = def.name,
        states = states.len(),
        actions = actions.len(),
        gotos = gotos.len(),
        "generated LR(1) tables"
    );
    Ok(ParseTable::new(actions, gotos, states.len()))
}

struct Generator {
    rules: Vec<Rule>,
    /// Rule indices per nonterminal.
    by_lhs: Vec<Vec<u16>>,
    first: Vec<TokenSet>,
    nullable: Vec<bool>,
}

impl Generator {
    fn new(def: &GrammarDef) -> Self {
        let mut rules = Vec::with_capacity(def.rules.len() + 1);
        rules.push(Rule {
            lhs: NonTerminal::START,
            rhs: AUGMENTED_RHS,
            precedence: Precedence::NONE,
        });
        rules.extend(def.rules.iter().map(|rule| Rule {
            lhs: rule.lhs,
            rhs: rule.rhs,
            precedence: rule.precedence,
        }));

        let mut by_lhs = vec![Vec::new(); def.nonterminals.len()];
        for (index, rule) in rules.iter().enumerate().skip(1) {
            if let Some(list) = by_lhs.get_mut(rule.lhs.index()) {
                list.push(index as u16);
            }
        }

        let mut generator = Generator {
            rules,
            by_lhs,
            first: vec![TokenSet::new(); def.nonterminals.len()],
            nullable: vec![false; def.nonterminals.len()],
        };
        generator.compute_first();
        generator
    }

    fn compute_first(&mut self) {
        loop {
            let mut changed = false;
            for rule in self.rules.iter().skip(1) {
                let lhs = rule.lhs.index();
                let (set, nullable) = self.first_of(rule.rhs);
                let merged = self.first[lhs].union(set);
                if merged != self.first[lhs] {
                    self.first[lhs] = merged;
                    changed = true;
                }
                if nullable && !self.nullable[lhs] {
                    self.nullable[lhs] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// FIRST set of a symbol sequence, and whether it can derive nothing.
    fn first_of(&self, symbols: &[Symbol]) -> (TokenSet, bool) {
        let mut set = TokenSet::new();
        for symbol in symbols {
            match *symbol {
                Symbol::Terminal(token) => return (set.with(token), false),
                Symbol::NonTerminal(nt) => {
                    set = set.union(self.first[nt.index()]);
                    if !self.nullable[nt.index()] {
                        return (set, false);
                    }
                }
            }
        }
        (set, true)
    }

    fn closure(&self, kernel: Vec<Item>) -> Vec<Item> {
        let mut items: BTreeSet<Item> = kernel.iter().copied().collect();
        let mut work = kernel;
        while let Some(item) = work.pop() {
            let rule = &self.rules[item.rule as usize];
            let dot = item.dot as usize;
            let Some(&Symbol::NonTerminal(nt)) = rule.rhs.get(dot) else {
                continue;
            };
            let (mut lookaheads, nullable) = self.first_of(&rule.rhs[dot + 1..]);
            if nullable {
                lookaheads = lookaheads.with(item.lookahead);
            }
            for &next in &self.by_lhs[nt.index()] {
                for lookahead in lookaheads.iter() {
                    let new = Item {
                        rule: next,
                        dot: 0,
                        lookahead,
                    };
                    if items.insert(new) {
                        work.push(new);
                    }
                }
            }
        }
        items.into_iter().collect()
    }

    /// Canonical collection of item sets and the transitions between them.
    #[allow(clippy::type_complexity)]
    fn item_sets(&self) -> Result<(Vec<Vec<Item>>, Vec<BTreeMap<Symbol, StateId>>), GrammarError> {
        let start = vec![Item {
            rule: 0,
            dot: 0,
            lookahead: TokenKind::Eof,
        }];
        let mut kernels: FxHashMap<Vec<Item>, StateId> = FxHashMap::default();
        kernels.insert(start.clone(), ParseTable::START);
        let mut states = vec![self.closure(start)];
        let mut transitions = vec![BTreeMap::new()];

        let mut index = 0;
        while index < states.len() {
            let mut groups: BTreeMap<Symbol, Vec<Item>> = BTreeMap::new();
            for item in &states[index] {
                let rule = &self.rules[item.rule as usize];
                if let Some(&symbol) = rule.rhs.get(item.dot as usize) {
                    groups.entry(symbol).or_default().push(Item {
                        dot: item.dot + 1,
                        ..*item
                    });
                }
            }

            for (symbol, mut kernel) in groups {
                kernel.sort_unstable();
                kernel.dedup();
                let target = if let Some(&id) = kernels.get(&kernel) {
                    id
                } else {
                    if states.len() >= MAX_STATES {
                        return Err(GrammarError::LimitExceeded {
                            what: "automaton states",
                            limit: MAX_STATES,
                        });
                    }
                    let id = StateId(states.len() as u32);
                    kernels.insert(kernel.clone(), id);
                    states.push(self.closure(kernel));
                    transitions.push(BTreeMap::new());
                    id
                };
                transitions[index].insert(symbol, target);
            }
            index += 1;
        }
        Ok((states, transitions))
    }

    fn resolve(
        &self,
        state: StateId,
        items: &[Item],
        token: TokenKind,
        reduce: u16,
        target: StateId,
    ) -> Result<Action, GrammarError> {
        let reducing = self.rules[reduce as usize].precedence;

        let mut levels: SmallVec<[i8; 4]> = SmallVec::new();
        for item in items.iter().filter(|item| item.dot > 0) {
            let rule = &self.rules[item.rule as usize];
            let rest = &rule.rhs[item.dot as usize..];
            if !rest.is_empty() && self.first_of(rest).0.contains(token) {
                levels.push(rule.precedence.level);
            }
        }
        let min = levels.iter().copied().min().unwrap_or(0);
        let max = levels.iter().copied().max().unwrap_or(0);

        let action = if reducing.level > max {
            Action::Reduce(ProductionId(reduce - 1))
        } else if reducing.level < min {
            Action::Shift(target)
        } else if min == max {
            match reducing.assoc {
                Assoc::Left => Action::Reduce(ProductionId(reduce - 1)),
                Assoc::Right => Action::Shift(target),
                Assoc::None => {
                    return Err(GrammarError::ShiftReduce {
                        state: state.0,
                        token,
                        rule: usize::from(reduce) - 1,
                    });
                }
            }
        } else {
            return Err(GrammarError::ShiftReduce {
                state: state.0,
                token,
                rule: usize::from(reduce) - 1,
            });
        };
        trace!(%state, %token, ?action, "resolved shift/reduce conflict");
        Ok(action)
    }
}
