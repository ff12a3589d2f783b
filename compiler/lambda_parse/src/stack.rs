//! The parse stack.
//!
//! Each entry pairs a parser state with the subtree built for it. Entries
//! flagged `extra` hold error nodes produced by recovery: they sit between
//! grammar symbols, carry the state of the entry below them, and are
//! invisible to reductions except that they end up among the children.

use lambda_grammar::StateId;
use lambda_ir::{FieldMap, InteriorNode, Span, SyntaxKind, SyntaxNode, TokenKind};

pub(crate) struct StackEntry {
    pub state: StateId,
    pub node: SyntaxNode,
    pub extra: bool,
}

/// Children popped for a reduction, in source order, with their extra flag.
pub(crate) type Popped = Vec<(SyntaxNode, bool)>;

pub(crate) struct ParseStack {
    start: StateId,
    entries: Vec<StackEntry>,
    /// The start state, then the state of each non-extra entry.
    states: Vec<StateId>,
}

impl ParseStack {
    pub fn new(start: StateId) -> Self {
        ParseStack {
            start,
            entries: Vec::new(),
            states: vec![start],
        }
    }

    #[inline]
    pub fn top_state(&self) -> StateId {
        self.entries.last().map_or(self.start, |entry| entry.state)
    }

    /// Grammar symbols on the stack, extras excluded.
    #[inline]
    pub fn depth(&self) -> usize {
        self.states.len() - 1
    }

    pub fn push(&mut self, state: StateId, node: SyntaxNode) {
        self.states.push(state);
        self.entries.push(StackEntry {
            state,
            node,
            extra: false,
        });
    }

    pub fn push_extra(&mut self, node: SyntaxNode) {
        let state = self.top_state();
        self.entries.push(StackEntry {
            state,
            node,
            extra: true,
        });
    }

    /// Pop the `count` topmost grammar symbols for a reduction.
    ///
    /// Extras interleaved with them come along as children. Extras above
    /// the topmost symbol are returned separately; they belong after the
    /// reduced node, not inside it.
    pub fn pop_children(&mut self, count: usize) -> (Popped, Vec<SyntaxNode>) {
        let mut trailing = Vec::new();
        while self.entries.last().is_some_and(|entry| entry.extra) {
            if let Some(entry) = self.entries.pop() {
                trailing.push(entry.node);
            }
        }
        trailing.reverse();

        let mut children = Vec::with_capacity(count);
        let mut remaining = count;
        while remaining > 0 {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            if !entry.extra {
                remaining -= 1;
                self.states.pop();
            }
            children.push((entry.node, entry.extra));
        }
        children.reverse();
        (children, trailing)
    }

    /// The start state, then one state per grammar symbol.
    #[inline]
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// Pop every entry above the `depth`-th grammar symbol.
    pub fn abandon_above(&mut self, depth: usize) -> Vec<SyntaxNode> {
        let mut popped = Vec::new();
        while self.depth() > depth {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            if !entry.extra {
                self.states.pop();
            }
            popped.push(entry.node);
        }
        popped.reverse();
        popped
    }

    /// The error node on top of the stack, if the top entry is one.
    pub fn top_error_mut(&mut self) -> Option<&mut InteriorNode> {
        match self.entries.last_mut() {
            Some(StackEntry {
                node: SyntaxNode::Interior(node),
                extra: true,
                ..
            }) if node.kind() == SyntaxKind::Error => Some(node),
            _ => None,
        }
    }

    /// Span of the innermost `(` still waiting for its `)`.
    pub fn open_delimiter(&self) -> Option<Span> {
        self.entries
            .iter()
            .rev()
            .filter(|entry| !entry.extra)
            .find_map(|entry| match &entry.node {
                SyntaxNode::Token(leaf)
                    if leaf.token().kind == TokenKind::LParen && !leaf.is_missing() =>
                {
                    Some(leaf.token().span)
                }
                _ => None,
            })
    }

    pub fn into_entries(self) -> Vec<StackEntry> {
        self.entries
    }
}

/// One error node holding `nodes`, with nested error extras flattened.
pub(crate) fn error_node(nodes: Vec<SyntaxNode>, offset: u32) -> InteriorNode {
    let mut children = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            SyntaxNode::Interior(inner)
                if inner.kind() == SyntaxKind::Error && !inner.children().is_empty() =>
            {
                children.extend(inner.into_children());
            }
            other => children.push(other),
        }
    }
    InteriorNode::new(SyntaxKind::Error, children, FieldMap::EMPTY, offset)
}
