//! S-expression rendering of syntax trees.
//!
//! Only named nodes are printed. Roles appear as `field:` prefixes,
//! recovery placeholders as `(ERROR ...)` and inserted symbols as
//! `(MISSING ...)`:
//!
//! ```text
//! (source_file (application func: (identifier_expression (identifier)) arg: (boolean_literal)))
//! ```

use std::fmt::{self, Write};

use crate::{Field, SyntaxNode};

/// Remaining stack below which rendering grows the stack.
const RED_ZONE: usize = 100 * 1024;

/// Size of each stack extension.
const STACK_PER_RECURSION: usize = 1024 * 1024;

impl SyntaxNode {
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, self, None);
        out
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, None)
    }
}

fn write_node(out: &mut impl Write, node: &SyntaxNode, field: Option<&str>) -> fmt::Result {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
        if let Some(field) = field {
            write!(out, "{field}: ")?;
        }
        match node {
            SyntaxNode::Token(leaf) => {
                let kind = leaf.token().kind;
                match (leaf.is_missing(), kind.lexeme()) {
                    (true, Some(text)) => write!(out, "(MISSING \"{text}\")"),
                    (true, None) => write!(out, "(MISSING {})", kind.name()),
                    (false, _) => write!(out, "({})", kind.name()),
                }
            }
            SyntaxNode::Interior(_) if node.is_missing() => out.write_str("(MISSING)"),
            SyntaxNode::Interior(inner) => {
                write!(out, "({}", inner.kind().name())?;
                for (index, child) in inner.children().iter().enumerate() {
                    if !is_printed(child) {
                        continue;
                    }
                    out.write_char(' ')?;
                    let field = inner.fields().field_of(index).map(Field::name);
                    write_node(out, child, field)?;
                }
                out.write_char(')')
            }
        }
    })
}

fn is_printed(node: &SyntaxNode) -> bool {
    node.is_named() || node.is_missing() || node.is_error()
}
