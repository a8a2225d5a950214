//! The expression tree.

pub mod fmt;

pub use fmt::Renderer;

use crate::{registry::symbol, token::{Token, TokenKind}};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A node of an expression tree.
///
/// The node owns its children. Two nodes are equal when their values and children are equal;
/// the enclosure and depth are presentation details and take no part in comparisons.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Node {
    pub value: Token,
    pub children: Vec<Node>,

    /// The opening delimiter of the pair that wraps this node when rendered, if any.
    pub enclosure: Option<Token>,

    /// The distance from the root, as of the last call to [`Node::snapshot`] or
    /// [`Node::insert`].
    pub depth: usize,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.children == other.children
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.children.hash(state);
    }
}

impl Node {
    /// Creates a node with no children.
    pub fn new(value: Token) -> Self {
        Self { value, children: Vec::new(), enclosure: None, depth: 0 }
    }

    /// Creates a node with the given children.
    pub fn with_children(value: Token, children: Vec<Node>) -> Self {
        let mut node = Self::new(value);
        for child in children {
            node.insert(child);
        }
        node
    }

    pub fn num(value: f64) -> Self {
        Self::new(Token::num(value))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(Token::var(name))
    }

    pub fn constant(symbol: impl Into<String>) -> Self {
        Self::new(Token::new(TokenKind::Const, symbol))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Token::text(text))
    }

    /// Creates the root of a tree.
    pub fn root(child: Node) -> Self {
        Self::with_children(Token::root(), vec![child])
    }

    /// Creates the negation of a node.
    pub fn negation(child: Node) -> Self {
        Self::with_children(Token::new(TokenKind::DelOp, symbol::NEGATION), vec![child])
    }

    /// Creates a product of the given factors. A single factor is returned unchanged.
    pub fn product(factors: Vec<Node>) -> Self {
        Self::fold(symbol::PRODUCT, factors, 1.0)
    }

    /// Creates a sum of the given terms. A single term is returned unchanged.
    pub fn sum(terms: Vec<Node>) -> Self {
        Self::fold(symbol::SUM, terms, 0.0)
    }

    fn fold(operator: &str, mut operands: Vec<Node>, identity: f64) -> Self {
        match operands.len() {
            0 => Self::num(identity),
            1 => operands.remove(0),
            _ => Self::with_children(Token::new(TokenKind::Op, operator), operands),
        }
    }

    /// Creates a fraction. Both operands are braced.
    pub fn fraction(numerator: Node, denominator: Node) -> Self {
        Self::with_children(
            Token::new(TokenKind::Struct, symbol::FRACTION),
            vec![numerator.braced(), denominator.braced()],
        )
    }

    /// Wraps the node in the given delimiter when rendered.
    pub fn enclosed(mut self, open: Token) -> Self {
        self.enclosure = Some(open);
        self
    }

    /// Wraps the node in braces when rendered, replacing any transparent enclosure.
    pub fn braced(self) -> Self {
        self.enclosed(Token::new(TokenKind::EncOp, symbol::OPEN_BRACE))
    }

    /// Returns true if the node renders inside braces, either because it is marked as braced or
    /// because it is a brace-delimited region.
    pub fn is_braced(&self) -> bool {
        self.enclosure.as_ref().is_some_and(|open| open.has(symbol::OPEN_BRACE))
            || self.is_symbol(TokenKind::EncOp, symbol::OPEN_BRACE)
    }

    /// Appends a child.
    pub fn insert(&mut self, mut child: Node) {
        child.renumber(self.depth + 1);
        self.children.push(child);
    }

    /// Prepends a child.
    pub fn insert_front(&mut self, mut child: Node) {
        child.renumber(self.depth + 1);
        self.children.insert(0, child);
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.value.is(kind)
    }

    pub fn has(&self, symbol: &str) -> bool {
        self.value.has(symbol)
    }

    /// Returns true if the node is the given operator, delegate or function.
    pub fn is_symbol(&self, kind: TokenKind, symbol: &str) -> bool {
        self.is(kind) && self.has(symbol)
    }

    pub fn is_product(&self) -> bool {
        self.is_symbol(TokenKind::Op, symbol::PRODUCT)
    }

    pub fn is_sum(&self) -> bool {
        self.is_symbol(TokenKind::Op, symbol::SUM)
    }

    pub fn is_negation(&self) -> bool {
        self.is_symbol(TokenKind::DelOp, symbol::NEGATION)
    }

    pub fn is_fraction(&self) -> bool {
        self.is_symbol(TokenKind::Struct, symbol::FRACTION) && self.children.len() == 2
    }

    /// Returns the value of a numeric leaf.
    pub fn as_number(&self) -> Option<f64> {
        self.value.as_number()
    }

    /// Returns true if this is a numeric leaf with the given value.
    pub fn is_number(&self, value: f64) -> bool {
        self.value.is_number(value)
    }

    /// The first child.
    pub fn child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Takes the value and children of another node, keeping this node's enclosure and depth.
    pub fn replace_with(&mut self, other: Node) {
        self.value = other.value;
        self.children = other.children;
        self.renumber(self.depth);
    }

    /// Puts another node in the place of this one.
    ///
    /// This node's enclosure is kept; when it has none, the other node's enclosure is adopted,
    /// unless it is a pair of braces, which only group operands of constructs. Parentheses
    /// around a non-negative literal, a variable or a constant are dropped.
    pub fn splice(&mut self, other: Node) {
        let enclosure = other.enclosure.clone().filter(|open| !open.has(symbol::OPEN_BRACE));
        self.replace_with(other);
        if self.enclosure.is_none() {
            self.enclosure = enclosure;
        }

        let parenthesized = self.enclosure.as_ref()
            .is_some_and(|open| open.has(symbol::LEFT_PAREN) || open.has(symbol::OPEN_PAREN));
        let atomic = self.as_number().is_some_and(|value| value >= 0.0)
            || self.is(TokenKind::Var)
            || self.is(TokenKind::Const);
        if parenthesized && atomic {
            self.enclosure = None;
        }
    }

    /// Replaces this node with its only child. Returns false if the node does not have exactly
    /// one child.
    pub fn collapse_single_child(&mut self) -> bool {
        if self.children.len() != 1 {
            return false;
        }
        let child = self.children.remove(0);
        self.splice(child);
        true
    }

    /// Removes the braces around the node, such as when it is taken out of a construct.
    pub fn without_braces(mut self) -> Self {
        if self.enclosure.as_ref().is_some_and(|open| open.has(symbol::OPEN_BRACE)) {
            self.enclosure = None;
        }
        self
    }

    /// Parenthesizes a sum, so that it can be used as a factor or negated.
    pub fn grouped(self) -> Self {
        let node = self.without_braces();
        if node.is_sum() && node.enclosure.is_none() {
            node.enclosed(Token::new(TokenKind::EncOp, symbol::LEFT_PAREN))
        } else {
            node
        }
    }

    /// Returns true if this node or any node below it is of the given kind.
    pub fn contains_kind(&self, kind: TokenKind) -> bool {
        self.is(kind) || self.children.iter().any(|child| child.contains_kind(kind))
    }

    /// Returns true if this node or any node below it is a free variable.
    pub fn contains_variable(&self) -> bool {
        self.contains_kind(TokenKind::Var)
    }

    /// Returns a copy of the tree with depths counted from this node.
    pub fn snapshot(&self) -> Node {
        let mut copy = self.clone();
        copy.renumber(0);
        copy
    }

    fn renumber(&mut self, depth: usize) {
        self.depth = depth;
        for child in &mut self.children {
            child.renumber(depth + 1);
        }
    }

    /// Formats the tree one node per line, indented by depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        out.push_str(&"  ".repeat(indent));
        out.push_str(&format!("{:?} `{}`", self.value.kind, self.value.text));
        if let Some(open) = &self.enclosure {
            out.push_str(&format!(" in `{}`", open.text));
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(out, indent + 1);
        }
    }
}
