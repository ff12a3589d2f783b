//! Parser tests.
//!
//! - `parser`: well-formed input, trees, fields, trivia, both grammars
//! - `recovery`: malformed input and the errors it reports
//! - `properties`: termination, span and token invariants over random input


use lambda_grammar::Grammar;

use crate::{parse, ParseOutput};

fn parse_base(source: &str) -> ParseOutput {
    parse(source, &Grammar::base())
}

fn parse_extended(source: &str) -> ParseOutput {
    parse(source, &Grammar::extended())
}
