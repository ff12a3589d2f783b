use std::fmt;

use crate::{LineIndex, Point, Span, SyntaxKind, SyntaxNode, Token};

/// A finished parse: the `source_file` root, comments that trail the last
/// token, and a line index for row/column queries.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SyntaxTree {
    root: SyntaxNode,
    trailing_trivia: Vec<Token>,
    line_index: LineIndex,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode, trailing_trivia: Vec<Token>, line_index: LineIndex) -> Self {
        debug_assert_eq!(root.syntax_kind(), Some(SyntaxKind::SourceFile));
        SyntaxTree {
            root,
            trailing_trivia,
            line_index,
        }
    }

    #[inline]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn into_root(self) -> SyntaxNode {
        self.root
    }

    #[inline]
    pub fn trailing_trivia(&self) -> &[Token] {
        &self.trailing_trivia
    }

    pub fn has_error(&self) -> bool {
        self.root.has_error()
    }

    /// Error and missing nodes in preorder.
    pub fn errors(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.root
            .descendants()
            .filter(|node| node.is_error() || node.is_missing())
    }

    pub fn point(&self, offset: u32) -> Point {
        self.line_index.point(offset)
    }

    /// Start and end points of a span.
    pub fn point_range(&self, span: Span) -> (Point, Point) {
        (self.point(span.start), self.point(span.end))
    }

    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
