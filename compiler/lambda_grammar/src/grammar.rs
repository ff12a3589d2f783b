use lambda_ir::{Field, SyntaxKind, TokenKind};
use smallvec::SmallVec;
use tracing::debug;

use crate::definition::{GrammarDef, NonTerminal, Precedence, Symbol};
use crate::keywords::KeywordAutomaton;
use crate::lambda;
use crate::lr;
use crate::table::{Action, ParseTable, ProductionId, StateId};
use crate::{GrammarError, TokenSet};

/// Longest right-hand side a rule may have.
const MAX_RHS: usize = u8::MAX as usize;

/// A rule after validation, as the tree builder needs it.
#[derive(Clone, Debug)]
pub struct Production {
    lhs: NonTerminal,
    rhs: SmallVec<[Symbol; 6]>,
    kind: SyntaxKind,
    fields: SmallVec<[(u8, Field); 3]>,
    precedence: Precedence,
}

impl Production {
    #[inline]
    pub fn lhs(&self) -> NonTerminal {
        self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// Number of children the rule pops.
    #[inline]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// (child position, role) pairs.
    #[inline]
    pub fn fields(&self) -> &[(u8, Field)] {
        &self.fields
    }

    /// Role of the child at right-hand-side `position`.
    pub fn field_at(&self, position: usize) -> Option<Field> {
        self.fields
            .iter()
            .find(|&&(at, _)| usize::from(at) == position)
            .map(|&(_, field)| field)
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }
}

/// Immutable grammar tables: productions, LR(1) actions and gotos, and the
/// keyword automaton.
///
/// Built once per grammar and borrowed by any number of parsers, on any
/// number of threads.
#[derive(Clone, Debug)]
pub struct Grammar {
    name: &'static str,
    nonterminal_names: Vec<&'static str>,
    productions: Vec<Production>,
    table: ParseTable,
    keywords: KeywordAutomaton,
    repair_symbols: Vec<Symbol>,
}

impl Grammar {
    /// Validate a description and generate its tables.
    pub fn build(def: &GrammarDef) -> Result<Self, GrammarError> {
        validate(def)?;
        let keywords = KeywordAutomaton::new(def.keywords)?;
        check_keywords_declared(def, &keywords)?;
        let table = lr::generate(def)?;

        let productions = def
            .rules
            .iter()
            .map(|rule| Production {
                lhs: rule.lhs,
                rhs: rule.rhs.iter().copied().collect(),
                kind: rule.kind,
                fields: rule.fields.iter().copied().collect(),
                precedence: rule.precedence,
            })
            .collect();

        // Nonterminals first, then terminals that can follow something
        // inside a rule. A terminal that only ever opens a rule never
        // completes one.
        let mut repair_symbols: Vec<Symbol> = (1..def.nonterminals.len())
            .map(|index| Symbol::NonTerminal(NonTerminal(index as u16)))
            .collect();
        let mut terminals: Vec<TokenKind> = def
            .rules
            .iter()
            .flat_map(|rule| rule.rhs.iter().skip(1))
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(kind) => Some(*kind),
                Symbol::NonTerminal(_) => None,
            })
            .collect();
        terminals.sort_unstable();
        terminals.dedup();
        repair_symbols.extend(terminals.into_iter().map(Symbol::Terminal));

        debug!(
            grammar = def.name,
            rules = def.rules.len(),
            keywords = def.keywords.len(),
            states = table.state_count(),
            "grammar ready"
        );

        Ok(Grammar {
            name: def.name,
            nonterminal_names: def.nonterminals.to_vec(),
            productions,
            table,
            keywords,
            repair_symbols,
        })
    }

    /// Lambda calculus with booleans and `let`.
    ///
    /// # Panics
    /// Only if the built-in description is inconsistent, which the test
    /// suite rules out.
    pub fn base() -> Self {
        Self::build(&lambda::BASE)
            .unwrap_or_else(|err| panic!("built-in grammar `{}` is invalid: {err}", lambda::BASE.name))
    }

    /// The base grammar plus `if ... then ... else ...`.
    ///
    /// # Panics
    /// Only if the built-in description is inconsistent.
    pub fn extended() -> Self {
        Self::build(&lambda::EXTENDED).unwrap_or_else(|err| {
            panic!("built-in grammar `{}` is invalid: {err}", lambda::EXTENDED.name)
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn start_state(&self) -> StateId {
        ParseTable::START
    }

    #[inline]
    pub fn action(&self, state: StateId, lookahead: TokenKind) -> Option<Action> {
        self.table.action(state, lookahead)
    }

    #[inline]
    pub fn goto(&self, state: StateId, nonterminal: NonTerminal) -> Option<StateId> {
        self.table.goto(state, nonterminal)
    }

    /// Production by id.
    ///
    /// Ids handed out by this grammar's tables are always valid.
    #[inline]
    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn keywords(&self) -> &KeywordAutomaton {
        &self.keywords
    }

    /// Tokens with an action in `state`.
    pub fn expected_tokens(&self, state: StateId) -> TokenSet {
        TokenKind::ALL
            .into_iter()
            .filter(|&kind| self.table.action(state, kind).is_some())
            .collect()
    }

    /// Symbols error recovery may insert, in preference order.
    pub fn repair_symbols(&self) -> &[Symbol] {
        &self.repair_symbols
    }

    pub fn nonterminal_name(&self, nonterminal: NonTerminal) -> &'static str {
        self.nonterminal_names
            .get(nonterminal.index())
            .copied()
            .unwrap_or("?")
    }

    /// Human-readable name of a symbol: `` `)` ``, `identifier`, `expression`.
    pub fn describe(&self, symbol: Symbol) -> String {
        match symbol {
            Symbol::Terminal(kind) => kind.to_string(),
            Symbol::NonTerminal(nt) => self.nonterminal_name(nt).to_string(),
        }
    }
}

fn validate(def: &GrammarDef) -> Result<(), GrammarError> {
    let count = def.nonterminals.len();
    if def.rules.len() >= usize::from(u16::MAX) {
        return Err(GrammarError::LimitExceeded {
            what: "rules",
            limit: usize::from(u16::MAX),
        });
    }
    if !def.rules.iter().any(|rule| rule.lhs == NonTerminal::START) {
        return Err(GrammarError::NoStartRule { grammar: def.name });
    }

    for (index, rule) in def.rules.iter().enumerate() {
        let nonterminals = std::iter::once(rule.lhs).chain(rule.rhs.iter().filter_map(|symbol| {
            match symbol {
                Symbol::NonTerminal(nt) => Some(*nt),
                Symbol::Terminal(_) => None,
            }
        }));
        for nt in nonterminals {
            if nt.index() >= count {
                return Err(GrammarError::UnknownNonTerminal {
                    rule: index,
                    index: nt.0,
                    count,
                });
            }
        }
        if rule.rhs.len() > MAX_RHS {
            return Err(GrammarError::LimitExceeded {
                what: "symbols per rule",
                limit: MAX_RHS,
            });
        }

        for symbol in rule.rhs {
            if let Symbol::Terminal(token) = *symbol {
                if matches!(token, TokenKind::Comment | TokenKind::Error | TokenKind::Eof) {
                    return Err(GrammarError::UnusableTerminal { rule: index, token });
                }
            }
        }

        let mut seen_fields: SmallVec<[Field; 3]> = SmallVec::new();
        let mut seen_positions: SmallVec<[u8; 3]> = SmallVec::new();
        for &(position, field) in rule.fields {
            let Some(symbol) = rule.rhs.get(usize::from(position)) else {
                return Err(GrammarError::FieldOutOfRange {
                    rule: index,
                    field,
                    position,
                    len: rule.rhs.len(),
                });
            };
            if let Symbol::Terminal(token) = *symbol {
                if token != TokenKind::Ident {
                    return Err(GrammarError::FieldOnPunctuation {
                        rule: index,
                        field,
                        token,
                    });
                }
            }
            if seen_fields.contains(&field) {
                return Err(GrammarError::DuplicateField { rule: index, field });
            }
            if seen_positions.contains(&position) {
                return Err(GrammarError::DuplicateRole {
                    rule: index,
                    position,
                });
            }
            seen_fields.push(field);
            seen_positions.push(position);
        }
    }
    Ok(())
}

/// Keyword terminals in rules must be producible by the lexer.
fn check_keywords_declared(def: &GrammarDef, keywords: &KeywordAutomaton) -> Result<(), GrammarError> {
    let declared: TokenSet = keywords.kinds().collect();
    for (index, rule) in def.rules.iter().enumerate() {
        for symbol in rule.rhs {
            if let Symbol::Terminal(token) = *symbol {
                if token.is_keyword() && !declared.contains(token) {
                    return Err(GrammarError::UndeclaredKeyword { rule: index, token });
                }
            }
        }
    }
    Ok(())
}
