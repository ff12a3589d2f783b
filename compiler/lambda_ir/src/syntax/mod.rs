//! Concrete syntax tree.
//!
//! Interior nodes own their children, so a parent always outlives its
//! subtree and nodes are never shared between trees. Field roles are
//! resolved into a [`FieldMap`] when the node is built, so role lookup is
//! a single array access.

mod kind;
mod node;
mod render;
mod tree;

pub use kind::{Field, FieldMap, SyntaxKind};
pub use node::{Descendants, InteriorNode, SyntaxNode, TokenLeaf};
pub use tree::SyntaxTree;
