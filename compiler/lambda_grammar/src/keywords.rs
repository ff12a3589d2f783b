//! Keyword automaton.
//!
//! A byte-level DFA built from the grammar's keyword list. The lexer runs
//! it over the full text of each identifier-class token; the token is
//! reclassified only when the DFA accepts after consuming every byte, so
//! `let` is a keyword while `letter` and `le` stay identifiers.

use lambda_ir::TokenKind;

use crate::GrammarError;

type StateId = u16;

/// Absorbing reject state.
const DEAD: StateId = 0;
const START: StateId = 1;

#[derive(Clone, Debug)]
pub struct KeywordAutomaton {
    transitions: Vec<[StateId; 256]>,
    accepting: Vec<Option<TokenKind>>,
}

impl KeywordAutomaton {
    pub fn new(keywords: &[(&'static str, TokenKind)]) -> Result<Self, GrammarError> {
        let mut automaton = KeywordAutomaton {
            transitions: vec![[DEAD; 256]; 2],
            accepting: vec![None; 2],
        };
        for &(text, kind) in keywords {
            if !kind.is_keyword() {
                return Err(GrammarError::NotAKeywordKind { text, kind });
            }
            if text.is_empty() || !text.bytes().all(is_ident_byte) {
                return Err(GrammarError::InvalidKeyword { text });
            }
            let mut state = START;
            for byte in text.bytes() {
                let next = automaton.transitions[state as usize][byte as usize];
                state = if next == DEAD {
                    automaton.add_state(state, byte)?
                } else {
                    next
                };
            }
            let slot = &mut automaton.accepting[state as usize];
            if slot.is_some() {
                return Err(GrammarError::DuplicateKeyword { text });
            }
            *slot = Some(kind);
        }
        Ok(automaton)
    }

    fn add_state(&mut self, from: StateId, byte: u8) -> Result<StateId, GrammarError> {
        let id = StateId::try_from(self.transitions.len()).map_err(|_| {
            GrammarError::LimitExceeded {
                what: "keyword automaton states",
                limit: StateId::MAX as usize,
            }
        })?;
        self.transitions.push([DEAD; 256]);
        self.accepting.push(None);
        self.transitions[from as usize][byte as usize] = id;
        Ok(id)
    }

    /// Keyword kind for `lexeme`, if the whole lexeme spells one.
    pub fn classify(&self, lexeme: &str) -> Option<TokenKind> {
        let mut state = START;
        for byte in lexeme.bytes() {
            state = self.transitions[state as usize][byte as usize];
            if state == DEAD {
                return None;
            }
        }
        self.accepting[state as usize]
    }

    /// All keyword kinds this automaton can produce.
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.accepting.iter().filter_map(|kind| *kind)
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn automaton() -> KeywordAutomaton {
        KeywordAutomaton::new(&[
            ("let", TokenKind::Let),
            ("true", TokenKind::True),
            ("then", TokenKind::Then),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_match_only() {
        let kw = automaton();
        assert_eq!(kw.classify("let"), Some(TokenKind::Let));
        assert_eq!(kw.classify("letter"), None);
        assert_eq!(kw.classify("lethal"), None);
        assert_eq!(kw.classify("le"), None);
        assert_eq!(kw.classify(""), None);
    }

    #[test]
    fn test_shared_prefixes() {
        let kw = automaton();
        assert_eq!(kw.classify("true"), Some(TokenKind::True));
        assert_eq!(kw.classify("then"), Some(TokenKind::Then));
        assert_eq!(kw.classify("th"), None);
        // dead and start, `let`, the shared `t`, then `rue` and `hen`
        assert_eq!(kw.state_count(), 2 + 3 + 1 + 3 + 3);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(automaton().classify("Let"), None);
    }

    #[test]
    fn test_rejects_bad_keywords() {
        assert_eq!(
            KeywordAutomaton::new(&[("if!", TokenKind::If)]).unwrap_err(),
            GrammarError::InvalidKeyword { text: "if!" }
        );
        assert_eq!(
            KeywordAutomaton::new(&[("if", TokenKind::If), ("if", TokenKind::If)]).unwrap_err(),
            GrammarError::DuplicateKeyword { text: "if" }
        );
        assert_eq!(
            KeywordAutomaton::new(&[("x", TokenKind::Ident)]).unwrap_err(),
            GrammarError::NotAKeywordKind {
                text: "x",
                kind: TokenKind::Ident
            }
        );
    }
}
