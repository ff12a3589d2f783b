//! The two built-in lambda grammars.
//!
//! ```text
//! source_file := expr | <empty>
//! expr := '(' expr ')'
//!       | 'true' | 'false'
//!       | IDENT
//!       | IDENT ':' expr                        arg, body
//!       | expr expr                             func, arg      left 2
//!       | 'let' IDENT '=' expr ';' expr         key, value, in right 1
//!       | 'if' expr 'then' expr 'else' expr     cond, then, else   (extended)
//! ```
//!
//! Bodies of definitions, lets and conditionals extend as far right as
//! possible; application binds tighter and groups to the left.

use lambda_ir::{Field, SyntaxKind, TokenKind};

use crate::definition::{GrammarDef, NonTerminal, Precedence, RuleDef, Symbol};

pub const SOURCE_FILE: NonTerminal = NonTerminal::START;
pub const EXPR: NonTerminal = NonTerminal(1);

const NONTERMINALS: &[&str] = &["source_file", "expression"];

const E: Symbol = Symbol::NonTerminal(EXPR);
const IDENT: Symbol = Symbol::Terminal(TokenKind::Ident);
const LPAREN: Symbol = Symbol::Terminal(TokenKind::LParen);
const RPAREN: Symbol = Symbol::Terminal(TokenKind::RParen);
const COLON: Symbol = Symbol::Terminal(TokenKind::Colon);
const EQ: Symbol = Symbol::Terminal(TokenKind::Eq);
const SEMI: Symbol = Symbol::Terminal(TokenKind::Semicolon);
const TRUE: Symbol = Symbol::Terminal(TokenKind::True);
const FALSE: Symbol = Symbol::Terminal(TokenKind::False);
const LET: Symbol = Symbol::Terminal(TokenKind::Let);
const IF: Symbol = Symbol::Terminal(TokenKind::If);
const THEN: Symbol = Symbol::Terminal(TokenKind::Then);
const ELSE: Symbol = Symbol::Terminal(TokenKind::Else);

const SOURCE: RuleDef = RuleDef::new(SOURCE_FILE, &[E], SyntaxKind::SourceFile);
const SOURCE_EMPTY: RuleDef = RuleDef::new(SOURCE_FILE, &[], SyntaxKind::SourceFile);
const PAREN: RuleDef = RuleDef::new(EXPR, &[LPAREN, E, RPAREN], SyntaxKind::Parenthesized);
const BOOL_TRUE: RuleDef = RuleDef::new(EXPR, &[TRUE], SyntaxKind::BooleanLiteral);
const BOOL_FALSE: RuleDef = RuleDef::new(EXPR, &[FALSE], SyntaxKind::BooleanLiteral);
const IDENT_EXPR: RuleDef = RuleDef::new(EXPR, &[IDENT], SyntaxKind::IdentifierExpression);

const DEFINITION: RuleDef = RuleDef::new(EXPR, &[IDENT, COLON, E], SyntaxKind::Definition)
    .with_fields(&[(0, Field::Arg), (2, Field::Body)]);

const APPLICATION: RuleDef = RuleDef::new(EXPR, &[E, E], SyntaxKind::Application)
    .with_fields(&[(0, Field::Func), (1, Field::Arg)])
    .with_precedence(Precedence::left(2));

const LET_BINDING: RuleDef = RuleDef::new(EXPR, &[LET, IDENT, EQ, E, SEMI, E], SyntaxKind::LetBinding)
    .with_fields(&[(1, Field::Key), (3, Field::Value), (5, Field::In)])
    .with_precedence(Precedence::right(1));

const CONDITIONAL: RuleDef = RuleDef::new(EXPR, &[IF, E, THEN, E, ELSE, E], SyntaxKind::Conditional)
    .with_fields(&[(1, Field::Cond), (3, Field::Then), (5, Field::Else)]);

const BASE_KEYWORDS: &[(&str, TokenKind)] = &[
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("let", TokenKind::Let),
];

const EXTENDED_KEYWORDS: &[(&str, TokenKind)] = &[
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("let", TokenKind::Let),
    ("if", TokenKind::If),
    ("then", TokenKind::Then),
    ("else", TokenKind::Else),
];

/// Lambda calculus with booleans and `let`.
pub const BASE: GrammarDef = GrammarDef {
    name: "lambda",
    keywords: BASE_KEYWORDS,
    nonterminals: NONTERMINALS,
    rules: &[
        SOURCE,
        SOURCE_EMPTY,
        PAREN,
        BOOL_TRUE,
        BOOL_FALSE,
        IDENT_EXPR,
        DEFINITION,
        APPLICATION,
        LET_BINDING,
    ],
};

/// [`BASE`] plus `if ... then ... else ...`.
pub const EXTENDED: GrammarDef = GrammarDef {
    name: "lambda_conditional",
    keywords: EXTENDED_KEYWORDS,
    nonterminals: NONTERMINALS,
    rules: &[
        SOURCE,
        SOURCE_EMPTY,
        PAREN,
        BOOL_TRUE,
        BOOL_FALSE,
        IDENT_EXPR,
        DEFINITION,
        APPLICATION,
        LET_BINDING,
        CONDITIONAL,
    ],
};
