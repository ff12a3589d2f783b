#![allow(clippy::unwrap_used, clippy::expect_used)]

use lambda_ir::{Field, SyntaxKind, TokenKind};
use pretty_assertions::assert_eq;

use crate::lambda::{EXPR, SOURCE_FILE};
use crate::{Action, Grammar, GrammarDef, GrammarError, NonTerminal, Precedence, RuleDef, Symbol};

const E: Symbol = Symbol::NonTerminal(EXPR);
const IDENT: Symbol = Symbol::Terminal(TokenKind::Ident);
const COLON: Symbol = Symbol::Terminal(TokenKind::Colon);
const IF: Symbol = Symbol::Terminal(TokenKind::If);

const SOURCE: RuleDef = RuleDef::new(SOURCE_FILE, &[E], SyntaxKind::SourceFile);
const IDENT_EXPR: RuleDef = RuleDef::new(EXPR, &[IDENT], SyntaxKind::IdentifierExpression);

fn def(rules: &'static [RuleDef]) -> GrammarDef {
    GrammarDef {
        name: "test",
        keywords: &[],
        nonterminals: &["source_file", "expression"],
        rules,
    }
}

/// Drive the tables over a token sequence and record the kinds reduced,
/// in order. `None` if the input is rejected.
fn reductions(grammar: &Grammar, tokens: &[TokenKind]) -> Option<Vec<SyntaxKind>> {
    let mut stack = vec![grammar.start_state()];
    let mut input = tokens
        .iter()
        .copied()
        .chain(std::iter::once(TokenKind::Eof))
        .peekable();
    let mut reduced = Vec::new();
    loop {
        let state = *stack.last()?;
        let lookahead = *input.peek()?;
        match grammar.action(state, lookahead)? {
            Action::Shift(next) => {
                stack.push(next);
                input.next();
            }
            Action::Reduce(id) => {
                let production = grammar.production(id);
                stack.truncate(stack.len() - production.len());
                reduced.push(production.kind());
                let top = *stack.last()?;
                stack.push(grammar.goto(top, production.lhs())?);
            }
            Action::Accept => return Some(reduced),
        }
    }
}

use SyntaxKind::{Application, Definition, IdentifierExpression as Ident, LetBinding, SourceFile};

#[test]
fn test_builtin_grammars_build() {
    let base = Grammar::base();
    let extended = Grammar::extended();
    assert_eq!(base.name(), "lambda");
    assert!(extended.table().state_count() > base.table().state_count());
    assert!(base.table().action_count() > 0);
    assert!(base.table().goto_count() > 0);
}

#[test]
fn test_grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();
}

#[test]
fn test_application_is_left_associative() {
    use TokenKind::Ident as I;
    assert_eq!(
        reductions(&Grammar::base(), &[I, I, I]),
        Some(vec![Ident, Ident, Application, Ident, Application, SourceFile])
    );
}

#[test]
fn test_definition_body_extends_right() {
    use TokenKind::{Colon, Ident as I};
    assert_eq!(
        reductions(&Grammar::base(), &[I, Colon, I, I]),
        Some(vec![Ident, Ident, Application, Definition, SourceFile])
    );
}

#[test]
fn test_let_body_extends_right() {
    use TokenKind::{Eq, Ident as I, Let, Semicolon};
    assert_eq!(
        reductions(&Grammar::base(), &[Let, I, Eq, I, Semicolon, I, I]),
        Some(vec![Ident, Ident, Ident, Application, LetBinding, SourceFile])
    );
}

#[test]
fn test_empty_input_accepts() {
    assert_eq!(reductions(&Grammar::base(), &[]), Some(vec![SourceFile]));
}

#[test]
fn test_conditional_only_in_extended() {
    use TokenKind::{Else, If, Ident as I, Then, True};
    let tokens = [If, True, Then, I, Else, I];
    assert_eq!(reductions(&Grammar::base(), &tokens), None);
    let kinds = reductions(&Grammar::extended(), &tokens).unwrap();
    assert_eq!(kinds.last(), Some(&SourceFile));
    assert!(kinds.contains(&SyntaxKind::Conditional));
}

#[test]
fn test_keyword_sets_differ() {
    assert_eq!(Grammar::base().keywords().classify("if"), None);
    assert_eq!(Grammar::extended().keywords().classify("if"), Some(TokenKind::If));
    assert_eq!(Grammar::base().keywords().classify("let"), Some(TokenKind::Let));
}

#[test]
fn test_expected_tokens_at_start() {
    let grammar = Grammar::base();
    let expected = grammar.expected_tokens(grammar.start_state());
    for kind in [
        TokenKind::LParen,
        TokenKind::Ident,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Let,
        TokenKind::Eof,
    ] {
        assert!(expected.contains(kind), "{kind:?}");
    }
    assert!(!expected.contains(TokenKind::RParen));
    assert!(!expected.contains(TokenKind::If));
}

#[test]
fn test_field_layouts_survive() {
    let grammar = Grammar::base();
    let let_binding = grammar
        .productions()
        .iter()
        .find(|p| p.kind() == LetBinding)
        .unwrap();
    assert_eq!(let_binding.len(), 6);
    assert_eq!(let_binding.field_at(1), Some(Field::Key));
    assert_eq!(let_binding.field_at(3), Some(Field::Value));
    assert_eq!(let_binding.field_at(5), Some(Field::In));
    assert_eq!(let_binding.field_at(0), None);
    assert_eq!(let_binding.precedence(), Precedence::right(1));
}

#[test]
fn test_repair_symbols_prefer_nonterminals() {
    let grammar = Grammar::base();
    let symbols = grammar.repair_symbols();
    assert_eq!(symbols[0], Symbol::NonTerminal(EXPR));
    assert!(symbols.contains(&Symbol::Terminal(TokenKind::RParen)));
    assert!(!symbols.contains(&Symbol::NonTerminal(NonTerminal::START)));
    assert!(!symbols.contains(&Symbol::Terminal(TokenKind::LParen)));
    assert!(!symbols.contains(&Symbol::Terminal(TokenKind::Let)));
    assert!(!symbols.contains(&Symbol::Terminal(TokenKind::If)));
    assert_eq!(grammar.describe(symbols[0]), "expression");
    assert_eq!(grammar.describe(Symbol::Terminal(TokenKind::RParen)), "`)`");
}

#[test]
fn test_unannotated_application_is_ambiguous() {
    const RULES: &[RuleDef] = &[
        SOURCE,
        IDENT_EXPR,
        RuleDef::new(EXPR, &[E, E], SyntaxKind::Application),
    ];
    let err = Grammar::build(&def(RULES)).unwrap_err();
    assert!(
        matches!(
            err,
            GrammarError::ShiftReduce {
                token: TokenKind::Ident,
                rule: 2,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn test_right_associative_application() {
    use TokenKind::Ident as I;

    const RULES: &[RuleDef] = &[
        SOURCE,
        IDENT_EXPR,
        RuleDef::new(EXPR, &[E, E], SyntaxKind::Application).with_precedence(Precedence::right(2)),
    ];
    let grammar = Grammar::build(&def(RULES)).unwrap();
    assert_eq!(
        reductions(&grammar, &[I, I, I]),
        Some(vec![Ident, Ident, Ident, Application, Application, SourceFile])
    );
}

#[test]
fn test_reduce_reduce_conflict() {
    const RULES: &[RuleDef] = &[
        SOURCE,
        IDENT_EXPR,
        RuleDef::new(EXPR, &[IDENT], SyntaxKind::BooleanLiteral),
    ];
    let err = Grammar::build(&def(RULES)).unwrap_err();
    assert!(
        matches!(
            err,
            GrammarError::ReduceReduce {
                first: 1,
                second: 2,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn test_field_validation() {
    const OUT_OF_RANGE: &[RuleDef] = &[
        SOURCE,
        RuleDef::new(EXPR, &[IDENT], SyntaxKind::IdentifierExpression)
            .with_fields(&[(1, Field::Arg)]),
    ];
    const ON_PUNCTUATION: &[RuleDef] = &[
        SOURCE,
        RuleDef::new(EXPR, &[IDENT, COLON, E], SyntaxKind::Definition)
            .with_fields(&[(1, Field::Arg)]),
    ];
    const TWO_ROLES: &[RuleDef] = &[
        SOURCE,
        RuleDef::new(EXPR, &[IDENT, COLON, E], SyntaxKind::Definition)
            .with_fields(&[(0, Field::Arg), (0, Field::Key)]),
    ];
    const ROLE_TWICE: &[RuleDef] = &[
        SOURCE,
        RuleDef::new(EXPR, &[IDENT, COLON, E], SyntaxKind::Definition)
            .with_fields(&[(0, Field::Arg), (2, Field::Arg)]),
    ];

    assert_eq!(
        Grammar::build(&def(OUT_OF_RANGE)).unwrap_err(),
        GrammarError::FieldOutOfRange {
            rule: 1,
            field: Field::Arg,
            position: 1,
            len: 1
        }
    );

    assert_eq!(
        Grammar::build(&def(ON_PUNCTUATION)).unwrap_err(),
        GrammarError::FieldOnPunctuation {
            rule: 1,
            field: Field::Arg,
            token: TokenKind::Colon
        }
    );

    assert_eq!(
        Grammar::build(&def(TWO_ROLES)).unwrap_err(),
        GrammarError::DuplicateRole {
            rule: 1,
            position: 0
        }
    );

    assert_eq!(
        Grammar::build(&def(ROLE_TWICE)).unwrap_err(),
        GrammarError::DuplicateField {
            rule: 1,
            field: Field::Arg
        }
    );
}

#[test]
fn test_keyword_terminal_must_be_declared() {
    const RULES: &[RuleDef] = &[
        SOURCE,
        IDENT_EXPR,
        RuleDef::new(EXPR, &[IF, E], SyntaxKind::Conditional),
    ];
    assert_eq!(
        Grammar::build(&def(RULES)).unwrap_err(),
        GrammarError::UndeclaredKeyword {
            rule: 2,
            token: TokenKind::If
        }
    );
}

#[test]
fn test_structural_errors() {
    const NO_START: &[RuleDef] = &[IDENT_EXPR];
    const UNKNOWN: &[RuleDef] = &[RuleDef::new(
        SOURCE_FILE,
        &[Symbol::NonTerminal(NonTerminal(7))],
        SyntaxKind::SourceFile,
    )];
    const EOF_IN_RULE: &[RuleDef] = &[RuleDef::new(
        SOURCE_FILE,
        &[Symbol::Terminal(TokenKind::Eof)],
        SyntaxKind::SourceFile,
    )];

    assert_eq!(
        Grammar::build(&def(NO_START)).unwrap_err(),
        GrammarError::NoStartRule { grammar: "test" }
    );

    assert!(matches!(
        Grammar::build(&def(UNKNOWN)).unwrap_err(),
        GrammarError::UnknownNonTerminal { index: 7, .. }
    ));

    assert!(matches!(
        Grammar::build(&def(EOF_IN_RULE)).unwrap_err(),
        GrammarError::UnusableTerminal { .. }
    ));
}
