//! Lambda IR - shared data types for the grammar engine.
//!
//! - Spans and row/column points for source locations
//! - Token kinds and tokens produced by the lexer
//! - The concrete syntax tree: syntactic kinds, field roles, nodes, trees
//!
//! Every other crate in the workspace speaks these types.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod line_index;
mod span;
pub mod syntax;
mod token;

pub use line_index::{LineIndex, Point};
pub use span::Span;
pub use syntax::{
    Descendants, Field, FieldMap, InteriorNode, SyntaxKind, SyntaxNode, SyntaxTree, TokenLeaf,
};
pub use token::{Token, TokenKind};
