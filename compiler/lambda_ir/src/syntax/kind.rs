//! Syntactic kinds, field roles and per-node field maps.

use std::fmt;

/// Kind of an interior node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum SyntaxKind {
    SourceFile,
    IdentifierExpression,
    BooleanLiteral,
    Definition,
    Application,
    Conditional,
    LetBinding,
    Parenthesized,
    /// Recovery placeholder: skipped tokens, abandoned subtrees, or a
    /// missing nonterminal when it has no children.
    Error,
}

impl SyntaxKind {
    pub const fn name(self) -> &'static str {
        match self {
            SyntaxKind::SourceFile => "source_file",
            SyntaxKind::IdentifierExpression => "identifier_expression",
            SyntaxKind::BooleanLiteral => "boolean_literal",
            SyntaxKind::Definition => "definition",
            SyntaxKind::Application => "application",
            SyntaxKind::Conditional => "conditional",
            SyntaxKind::LetBinding => "let_binding",
            SyntaxKind::Parenthesized => "parenthesized",
            SyntaxKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic role of a child within its parent.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Field {
    Arg,
    Body,
    Cond,
    Else,
    Func,
    In,
    Key,
    Then,
    Value,
}

impl Field {
    pub const COUNT: usize = 9;

    pub const ALL: [Field; Self::COUNT] = [
        Field::Arg,
        Field::Body,
        Field::Cond,
        Field::Else,
        Field::Func,
        Field::In,
        Field::Key,
        Field::Then,
        Field::Value,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Field::Arg => "arg",
            Field::Body => "body",
            Field::Cond => "cond",
            Field::Else => "else",
            Field::Func => "func",
            Field::In => "in",
            Field::Key => "key",
            Field::Then => "then",
            Field::Value => "value",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role → child index map, resolved once when the node is built.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FieldMap([u16; Field::COUNT]);

impl FieldMap {
    const ABSENT: u16 = u16::MAX;

    pub const EMPTY: FieldMap = FieldMap([Self::ABSENT; Field::COUNT]);

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Assign `field` to the child at `index`.
    ///
    /// Indices beyond `u16::MAX - 1` are not representable and are ignored.
    pub fn insert(&mut self, field: Field, index: usize) {
        if let Ok(index) = u16::try_from(index) {
            if index != Self::ABSENT {
                self.0[field as usize] = index;
            }
        }
    }

    #[inline]
    pub fn get(&self, field: Field) -> Option<usize> {
        match self.0[field as usize] {
            Self::ABSENT => None,
            index => Some(index as usize),
        }
    }

    /// Role of the child at `index`, if it has one.
    pub fn field_of(&self, index: usize) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|&field| self.get(field) == Some(index))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&index| index == Self::ABSENT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|index| (field, index)))
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
