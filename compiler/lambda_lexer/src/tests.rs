use lambda_grammar::Grammar;
use lambda_ir::{Span, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{lex, LexError, Lexer};

fn kinds(source: &str, grammar: &Grammar) -> Vec<TokenKind> {
    lex(source, grammar).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_keywords_need_exact_match() {
    let grammar = Grammar::base();
    let output = lex("let letter lethal le", &grammar);
    let tokens: Vec<_> = output.tokens.iter().map(|t| (t.kind, t.text())).collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "letter"),
            (TokenKind::Ident, "lethal"),
            (TokenKind::Ident, "le"),
            (TokenKind::Eof, ""),
        ]
    );
    assert!(!output.has_errors());
}

#[test]
fn test_punctuation_and_spans() {
    let grammar = Grammar::base();
    let output = lex("let x=(y);z", &grammar);
    let tokens: Vec<_> = output.tokens.iter().map(|t| (t.kind, t.span)).collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Let, Span::new(0, 3)),
            (TokenKind::Ident, Span::new(4, 5)),
            (TokenKind::Eq, Span::new(5, 6)),
            (TokenKind::LParen, Span::new(6, 7)),
            (TokenKind::Ident, Span::new(7, 8)),
            (TokenKind::RParen, Span::new(8, 9)),
            (TokenKind::Semicolon, Span::new(9, 10)),
            (TokenKind::Ident, Span::new(10, 11)),
            (TokenKind::Eof, Span::point(11)),
        ]
    );
}

#[test]
fn test_comments_are_tokens() {
    let grammar = Grammar::base();
    let output = lex("x # a comment\r\n  y", &grammar);
    let comment = &output.tokens[1];
    assert_eq!(comment.kind, TokenKind::Comment);
    // `\r` is part of the line as far as the comment is concerned.
    assert_eq!(comment.text(), "# a comment\r");
    assert_eq!(output.tokens[2].text(), "y");
}

#[test]
fn test_booleans() {
    assert_eq!(
        kinds("true false True", &Grammar::base()),
        vec![TokenKind::True, TokenKind::False, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn test_conditional_keywords_depend_on_grammar() {
    let source = "if c then a else b";
    assert_eq!(
        kinds(source, &Grammar::base()),
        vec![TokenKind::Ident; 6]
            .into_iter()
            .chain([TokenKind::Eof])
            .collect::<Vec<_>>()
    );
    assert_eq!(
        kinds(source, &Grammar::extended()),
        vec![
            TokenKind::If,
            TokenKind::Ident,
            TokenKind::Then,
            TokenKind::Ident,
            TokenKind::Else,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unrecognized_run_is_one_error() {
    let grammar = Grammar::base();
    let output = lex("a $%€ b ! c", &grammar);
    let errors: Vec<_> = output
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Error)
        .map(|t| (t.span, t.text()))
        .collect();
    assert_eq!(errors, vec![(Span::new(2, 7), "$%€"), (Span::new(10, 11), "!")]);
    assert_eq!(
        output.errors,
        vec![
            LexError::unrecognized(Span::new(2, 7), '$'),
            LexError::unrecognized(Span::new(10, 11), '!'),
        ]
    );
}

#[test]
fn test_eof_is_idempotent() {
    let grammar = Grammar::base();
    let lexer = Lexer::new("ab  ", &grammar);
    let (first, next) = lexer.token_at(0);
    assert_eq!(first.kind, TokenKind::Ident);
    assert_eq!(next, 2);
    let (eof, after) = lexer.token_at(next);
    assert_eq!((eof.kind, eof.span, after), (TokenKind::Eof, Span::point(4), 4));
    let (again, same) = lexer.token_at(after);
    assert_eq!((again.kind, same), (TokenKind::Eof, 4));
}

#[test]
fn test_next_token_after_end_keeps_returning_eof() {
    let grammar = Grammar::base();
    let mut lexer = Lexer::new("x", &grammar);
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.position(), 1);
}

#[test]
fn test_iterator_stops_after_eof() {
    let grammar = Grammar::base();
    let lexer = Lexer::new("  ", &grammar);
    let tokens: Vec<_> = lexer.collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_source_past_offset_limit_is_reported_at_eof() {
    let grammar = Grammar::base();
    // `é` straddles the limit, so lexing stops before it.
    let mut lexer = Lexer::bounded("ab xé yz", grammar.keywords(), 5);
    let tokens: Vec<_> = lexer.by_ref().map(|t| (t.kind, t.span)).collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Ident, Span::new(0, 2)),
            (TokenKind::Ident, Span::new(3, 4)),
            (TokenKind::Eof, Span::point(4)),
        ]
    );
    assert_eq!(lexer.source(), "ab x");
    assert_eq!(lexer.take_errors(), vec![LexError::too_long(4, 9)]);

    // Reported once even though `Eof` keeps coming.
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert!(lexer.errors().is_empty());
}

proptest! {
    #[test]
    fn tokens_tile_the_source(source in "[a-z_ ():=;#\n$é]{0,40}") {
        let grammar = Grammar::extended();
        let output = lex(&source, &grammar);
        let mut last_end = 0;
        for token in &output.tokens {
            prop_assert!(token.span.start >= last_end);
            let gap = &source[last_end as usize..token.span.start as usize];
            prop_assert!(gap.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')));
            if token.kind != TokenKind::Eof {
                prop_assert_eq!(&source[token.span.to_range()], token.text());
            }
            last_end = token.span.end;
        }
        prop_assert_eq!(output.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(last_end as usize, source.len());
    }
}
