//! Tree builder.
//!
//! Turns the children popped for a reduction into an interior node. Field
//! layouts name right-hand-side positions; extras popped alongside shift
//! the real child indices, so positions are resolved here, once.

use lambda_grammar::Production;
use lambda_ir::{FieldMap, InteriorNode};

use crate::stack::Popped;

/// Node for `production` over `popped`. `offset` places childless nodes.
pub(crate) fn build(production: &Production, popped: Popped, offset: u32) -> InteriorNode {
    let mut fields = FieldMap::EMPTY;
    let mut children = Vec::with_capacity(popped.len());
    let mut position = 0;
    for (node, extra) in popped {
        if !extra {
            if let Some(field) = production.field_at(position) {
                fields.insert(field, children.len());
            }
            position += 1;
        }
        children.push(node);
    }
    InteriorNode::new(production.kind(), children, fields, offset)
}
