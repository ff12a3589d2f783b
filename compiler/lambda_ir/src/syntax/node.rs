//! Concrete syntax tree nodes.

use crate::{Field, FieldMap, Span, SyntaxKind, Token, TokenKind};

/// A node of the concrete syntax tree: a token leaf or an interior node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SyntaxNode {
    Token(TokenLeaf),
    Interior(InteriorNode),
}

/// A shifted token together with the comments that preceded it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TokenLeaf {
    token: Token,
    leading_trivia: Vec<Token>,
    missing: bool,
}

impl TokenLeaf {
    pub fn new(token: Token, leading_trivia: Vec<Token>) -> Self {
        TokenLeaf {
            token,
            leading_trivia,
            missing: false,
        }
    }

    /// Zero-width placeholder for a token recovery inserted.
    pub fn missing(kind: TokenKind, offset: u32) -> Self {
        TokenLeaf {
            token: Token::new(kind, Span::point(offset)),
            leading_trivia: Vec::new(),
            missing: true,
        }
    }

    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[inline]
    pub fn leading_trivia(&self) -> &[Token] {
        &self.leading_trivia
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.missing
    }
}

/// An interior node: kind, ordered children and resolved field roles.
///
/// The span always runs from the first child's start to the last child's
/// end; childless nodes get a zero-width span at the offset they were
/// built at.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InteriorNode {
    kind: SyntaxKind,
    span: Span,
    children: Vec<SyntaxNode>,
    fields: FieldMap,
    has_error: bool,
}

impl InteriorNode {
    pub fn new(kind: SyntaxKind, children: Vec<SyntaxNode>, fields: FieldMap, offset: u32) -> Self {
        let span = covering_span(&children, offset);
        let has_error = kind == SyntaxKind::Error || children.iter().any(SyntaxNode::has_error);
        InteriorNode {
            kind,
            span,
            children,
            fields,
            has_error,
        }
    }

    /// Childless error node standing in for a nonterminal recovery inserted.
    pub fn missing(offset: u32) -> Self {
        Self::new(SyntaxKind::Error, Vec::new(), FieldMap::EMPTY, offset)
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    #[inline]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Append a trailing child. Fields are untouched.
    pub fn push_child(&mut self, child: SyntaxNode) {
        let offset = self.span.start;
        self.has_error |= child.has_error();
        self.children.push(child);
        self.span = covering_span(&self.children, offset);
    }

    pub fn into_children(mut self) -> Vec<SyntaxNode> {
        std::mem::take(&mut self.children)
    }
}

fn covering_span(children: &[SyntaxNode], offset: u32) -> Span {
    match (children.first(), children.last()) {
        (Some(first), Some(last)) => Span::cover(first.span(), last.span()),
        _ => Span::point(offset),
    }
}

// Deep trees would overflow the stack with the derived recursive drop.
impl Drop for InteriorNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let SyntaxNode::Interior(mut inner) = node {
                pending.append(&mut inner.children);
            }
        }
    }
}

impl SyntaxNode {
    #[inline]
    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Token(leaf) => leaf.token.span,
            SyntaxNode::Interior(node) => node.span,
        }
    }

    /// `None` for token leaves.
    #[inline]
    pub fn syntax_kind(&self) -> Option<SyntaxKind> {
        match self {
            SyntaxNode::Token(_) => None,
            SyntaxNode::Interior(node) => Some(node.kind),
        }
    }

    /// `None` for interior nodes.
    #[inline]
    pub fn token(&self) -> Option<&Token> {
        match self {
            SyntaxNode::Token(leaf) => Some(&leaf.token),
            SyntaxNode::Interior(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenLeaf> {
        match self {
            SyntaxNode::Token(leaf) => Some(leaf),
            SyntaxNode::Interior(_) => None,
        }
    }

    pub fn as_interior(&self) -> Option<&InteriorNode> {
        match self {
            SyntaxNode::Token(_) => None,
            SyntaxNode::Interior(node) => Some(node),
        }
    }

    /// Name of the node's kind, as printed in S-expressions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SyntaxNode::Token(leaf) => leaf.token.kind.name(),
            SyntaxNode::Interior(node) => node.kind.name(),
        }
    }

    /// Empty for token leaves.
    #[inline]
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Token(_) => &[],
            SyntaxNode::Interior(node) => &node.children,
        }
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children().get(index)
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Children that are interior nodes or named tokens.
    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children().iter().filter(|child| child.is_named())
    }

    pub fn child_by_field(&self, field: Field) -> Option<&SyntaxNode> {
        match self {
            SyntaxNode::Token(_) => None,
            SyntaxNode::Interior(node) => node
                .fields
                .get(field)
                .and_then(|index| node.children.get(index)),
        }
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<&SyntaxNode> {
        Field::from_name(name).and_then(|field| self.child_by_field(field))
    }

    /// Role of the child at `index`.
    pub fn field_for_child(&self, index: usize) -> Option<Field> {
        self.as_interior()
            .and_then(|node| node.fields.field_of(index))
    }

    pub fn field_name_for_child(&self, index: usize) -> Option<&'static str> {
        self.field_for_child(index).map(Field::name)
    }

    pub fn is_named(&self) -> bool {
        match self {
            SyntaxNode::Token(leaf) => leaf.token.kind.is_named(),
            SyntaxNode::Interior(_) => true,
        }
    }

    /// Recovery placeholder or a lexical error token.
    pub fn is_error(&self) -> bool {
        match self {
            SyntaxNode::Token(leaf) => leaf.token.kind == TokenKind::Error,
            SyntaxNode::Interior(node) => node.kind == SyntaxKind::Error,
        }
    }

    /// Inserted by recovery; occupies no source text.
    pub fn is_missing(&self) -> bool {
        match self {
            SyntaxNode::Token(leaf) => leaf.missing,
            SyntaxNode::Interior(node) => {
                node.kind == SyntaxKind::Error && node.children.is_empty()
            }
        }
    }

    /// True if this node or anything below it came out of error recovery.
    pub fn has_error(&self) -> bool {
        match self {
            SyntaxNode::Token(leaf) => leaf.missing || leaf.token.kind == TokenKind::Error,
            SyntaxNode::Interior(node) => node.has_error,
        }
    }

    /// Source text covered by this node.
    pub fn utf8_text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span().to_range()).unwrap_or("")
    }

    /// Preorder walk over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl From<TokenLeaf> for SyntaxNode {
    fn from(leaf: TokenLeaf) -> Self {
        SyntaxNode::Token(leaf)
    }
}

impl From<InteriorNode> for SyntaxNode {
    fn from(node: InteriorNode) -> Self {
        SyntaxNode::Interior(node)
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
