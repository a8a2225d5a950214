//! Builds an expression tree from the tokens of an equation.
//!
//! The tokens are placed in a stream of [`Item`]s, and a fixed sequence of passes rewrites the
//! stream, replacing tokens and their operands with subtrees. Each pass runs until it finds
//! nothing left to rewrite before the next one begins. Delimited regions are parsed recursively
//! with the same passes, so a region is always a single subtree by the time the operators around
//! it are reduced.
//!
//! Unlike an operator-precedence parser, the order of the passes is what determines binding: a
//! construct binds tighter than a function, which binds tighter than a delegate operator, then
//! multiplication, addition and finally the comparison.

mod item;

use eqn_error::Error;
use log::{debug, trace};
use std::ops::Range;
use crate::{
    error::{
        ArityMismatch,
        EmptyEncapsulation,
        EmptyExpression,
        MissingOperand,
        TooManyComparisons,
        UnexpectedExpression,
        UnmatchedDelimiter,
    },
    registry::{symbol, Registry},
    token::{Token, TokenKind},
    tokenizer::tokenize,
    tree::Node,
};
use item::{find_first, find_last, Item};

/// The output of [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The root of the tree. It has exactly one child.
    pub root: Node,

    /// Whether the equation contains a comparison.
    pub has_comparison: bool,

    /// Whether the equation contains a free variable.
    pub has_variables: bool,
}

/// Tokenizes and parses the input.
pub fn parse(input: &str, registry: &Registry) -> Result<Parsed, Error> {
    let tokens = tokenize(input, registry)?;
    let stream = tokens.lexemes.into_iter().map(Item::from).collect();

    let mut parser = Parser::new(registry);
    let mut root = Node::new(Token::root());
    parser.parse_region(stream, &mut root, 0..input.len())?;
    debug!("parsed `{}` into:\n{}", input, root.dump());

    Ok(Parsed {
        root,
        has_comparison: parser.comparison.is_some(),
        has_variables: tokens.has_variables,
    })
}

/// Tracks the state shared by all regions of one equation.
#[derive(Debug)]
pub struct Parser<'r> {
    registry: &'r Registry,

    /// The span of the comparison, once one has been reduced.
    comparison: Option<Range<usize>>,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry, comparison: None }
    }

    /// Parses a stream into a single subtree, which becomes the child of `target`. `span` is the
    /// region of the input that the stream came from.
    fn parse_region(&mut self, mut stream: Vec<Item>, target: &mut Node, span: Range<usize>) -> Result<(), Error> {
        self.multiply_before_functions(&mut stream);
        self.extract_regions(&mut stream)?;
        elide_unary_plus(&mut stream);
        multiply_atoms(&mut stream);
        self.reduce_constructs(&mut stream)?;
        reduce_functions(&mut stream)?;
        multiply_operands(&mut stream);
        self.reduce_delegates(&mut stream)?;
        fold(&mut stream, symbol::PRODUCT)?;
        fold(&mut stream, symbol::SUM)?;
        self.reduce_comparison(&mut stream)?;
        finish(stream, target, span)
    }

    fn is_closing(&self, item: &Item) -> bool {
        item.token().is_some_and(|token| {
            self.registry.encapsulation(&token.text).is_some_and(|encapsulation| !encapsulation.left)
        })
    }

    /// Inserts a multiplication between a closing delimiter and a function right after it.
    fn multiply_before_functions(&self, stream: &mut Vec<Item>) {
        while let Some(i) = (1..stream.len())
            .find(|&i| self.is_closing(&stream[i - 1]) && stream[i].is_token(TokenKind::TrigFun))
        {
            let at = stream[i - 1].span().end;
            stream.insert(i, Item::implied(TokenKind::Op, symbol::PRODUCT, at));
        }
    }

    /// Replaces every delimited region, delimiters included, with the subtree parsed from its
    /// content.
    fn extract_regions(&mut self, stream: &mut Vec<Item>) -> Result<(), Error> {
        let registry = self.registry;
        let opening = |token: &Token| {
            registry.encapsulation(&token.text).is_some_and(|encapsulation| encapsulation.left)
        };

        while let Some((start, open, open_span)) = find_first(stream, opening) {
            let counterpart = registry.encapsulation(&open.text)
                .map_or("", |encapsulation| encapsulation.counterpart);

            let mut depth = 0usize;
            let end = (start + 1..stream.len()).find(|&j| {
                if stream[j].is_symbol(TokenKind::EncOp, &open.text) {
                    depth += 1;
                } else if stream[j].is_symbol(TokenKind::EncOp, counterpart) {
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                }
                false
            });
            let Some(end) = end else {
                return Err(Error::new(vec![open_span], UnmatchedDelimiter { symbol: open.text, counterpart }));
            };

            let close_span = stream[end].span();
            let span = open_span.start..close_span.end;
            let inner = stream.drain(start + 1..end).collect::<Vec<_>>();
            stream.drain(start..start + 2);
            if inner.is_empty() {
                return Err(Error::new(vec![span], EmptyEncapsulation { symbol: open.text }));
            }

            let mut region = Node::new(open);
            self.parse_region(inner, &mut region, open_span.end..close_span.start)?;
            stream.insert(start, Item::Node(region, span));
        }

        Ok(())
    }

    /// Gives each construct its declared number of operands, rightmost construct first.
    fn reduce_constructs(&self, stream: &mut Vec<Item>) -> Result<(), Error> {
        while let Some((i, token, span)) = find_last(stream, |token| token.is(TokenKind::Struct)) {
            let inputs = self.registry.construct(&token.text).map_or(0, |construct| construct.inputs);
            let found = stream[i + 1..].iter()
                .take(inputs)
                .take_while(|item| item.is_operand())
                .count();
            if found < inputs {
                return Err(Error::new(
                    vec![span],
                    ArityMismatch { symbol: token.text, expected: inputs, found },
                ));
            }

            let operands = stream.drain(i + 1..i + 1 + inputs).collect::<Vec<_>>();
            let end = operands.last().map_or(span.end, |operand| operand.span().end);
            let node = Node::with_children(token, operands.into_iter().map(Item::into_node).collect());
            stream[i] = Item::Node(node, span.start..end);
        }

        Ok(())
    }

    /// Gives each `-` and `\div` the operand after it. When an operand precedes the delegate, the
    /// operator it delegates to is inserted between them.
    fn reduce_delegates(&self, stream: &mut Vec<Item>) -> Result<(), Error> {
        while let Some((i, token, span)) = find_last(stream, |token| token.is(TokenKind::DelOp)) {
            let delegate = self.registry.delegate(&token.text).map(|delegate| delegate.delegate);
            let preceded = i > 0 && stream[i - 1].is_operand();
            reduce_unary(stream, i, token, span.clone())?;

            if let (true, Some(delegate)) = (preceded, delegate) {
                stream.insert(i, Item::implied(TokenKind::Op, delegate, span.start));
            }
        }

        Ok(())
    }

    /// Joins the comparison with both of its sides. A comparison missing a side is dropped.
    fn reduce_comparison(&mut self, stream: &mut Vec<Item>) -> Result<(), Error> {
        while let Some((i, token, span)) = find_first(stream, |token| token.is(TokenKind::Comparison)) {
            if let Some(first) = &self.comparison {
                return Err(Error::new(vec![first.clone(), span], TooManyComparisons));
            }

            let has_left = i > 0 && stream[i - 1].is_operand();
            let has_right = stream.get(i + 1).is_some_and(Item::is_operand);
            if !has_left || !has_right {
                debug!("dropping `{}`, which does not have two sides", token.text);
                stream.remove(i);
                continue;
            }

            let (left, right) = take_neighbors(stream, i);
            let whole = left.span().start..right.span().end;
            let node = Node::with_children(token, vec![left.into_node(), right.into_node()]);
            stream.insert(i - 1, Item::Node(node, whole));
            self.comparison = Some(span);
        }

        Ok(())
    }
}

/// Removes the item at `i` and returns its two neighbors, which are removed as well.
fn take_neighbors(stream: &mut Vec<Item>, i: usize) -> (Item, Item) {
    let right = stream.remove(i + 1);
    stream.remove(i);
    let left = stream.remove(i - 1);
    (left, right)
}

/// Gives the token at `i` the operand after it.
fn reduce_unary(stream: &mut Vec<Item>, i: usize, token: Token, span: Range<usize>) -> Result<(), Error> {
    if !stream.get(i + 1).is_some_and(Item::is_operand) {
        return Err(Error::new(vec![span], MissingOperand { symbol: token.text }));
    }

    let operand = stream.remove(i + 1);
    let end = operand.span().end;
    stream[i] = Item::Node(Node::with_children(token, vec![operand.into_node()]), span.start..end);
    Ok(())
}

/// Removes `+` signs that do not add anything to the left of them.
fn elide_unary_plus(stream: &mut Vec<Item>) {
    while let Some(i) = (0..stream.len()).find(|&i| {
        stream[i].is_symbol(TokenKind::Op, symbol::SUM) && (i == 0 || stream[i - 1].is_operator())
    }) {
        stream.remove(i);
    }
}

/// Inserts a multiplication on either side of a number, constant or variable that is written
/// next to something it multiplies, as in `2x`, `x\pi` or `3\frac{1}{2}`.
fn multiply_atoms(stream: &mut Vec<Item>) {
    let joins_before = |item: &Item| {
        matches!(item, Item::Node(..))
            || item.token().is_some_and(|token| matches!(token.kind, TokenKind::Const | TokenKind::Var))
    };
    let joins_after = |item: &Item| {
        matches!(item, Item::Node(..))
            || item.token().is_some_and(|token| matches!(
                token.kind,
                TokenKind::Const | TokenKind::Var | TokenKind::TrigFun | TokenKind::Struct
            ))
    };

    while let Some(at) = (0..stream.len()).find_map(|i| {
        if !stream[i].is_atom() {
            None
        } else if i > 0 && joins_before(&stream[i - 1]) {
            Some(i)
        } else if stream.get(i + 1).is_some_and(joins_after) {
            Some(i + 1)
        } else {
            None
        }
    }) {
        let position = stream[at].span().start;
        stream.insert(at, Item::implied(TokenKind::Op, symbol::PRODUCT, position));
    }
}

/// Inserts a multiplication between two operands that are still side by side once constructs
/// and functions have been reduced, as in `\frac{1}{2}\frac{1}{3}`.
fn multiply_operands(stream: &mut Vec<Item>) {
    while let Some(i) = (1..stream.len()).find(|&i| stream[i - 1].is_operand() && stream[i].is_operand()) {
        let position = stream[i].span().start;
        stream.insert(i, Item::implied(TokenKind::Op, symbol::PRODUCT, position));
    }
}

/// Gives each function the operand after it, rightmost function first.
fn reduce_functions(stream: &mut Vec<Item>) -> Result<(), Error> {
    while let Some((i, token, span)) = find_last(stream, |token| token.is(TokenKind::TrigFun)) {
        reduce_unary(stream, i, token, span)?;
    }
    Ok(())
}

/// Joins each occurrence of the operator with its two neighbors, left to right. A neighbor that
/// already is an application of the same operator is extended instead of nested.
fn fold(stream: &mut Vec<Item>, operator: &str) -> Result<(), Error> {
    while let Some((i, token, span)) = find_first(stream, |token| token.is(TokenKind::Op) && token.has(operator)) {
        let has_left = i > 0 && stream[i - 1].is_operand();
        let has_right = stream.get(i + 1).is_some_and(Item::is_operand);
        if !has_left || !has_right {
            return Err(Error::new(vec![span], MissingOperand { symbol: token.text }));
        }

        let (left, right) = take_neighbors(stream, i);
        let whole = left.span().start..right.span().end;
        let node = match (left.into_node(), right.into_node()) {
            (mut left, right) if left.value == token => {
                left.insert(right);
                left
            },
            (left, mut right) if right.value == token => {
                right.insert_front(left);
                right
            },
            (left, right) => Node::with_children(token, vec![left, right]),
        };
        trace!("folded `{}` over {:?}", operator, whole);
        stream.insert(i - 1, Item::Node(node, whole));
    }

    Ok(())
}

/// Makes the single item left in the stream the child of `target`.
fn finish(stream: Vec<Item>, target: &mut Node, span: Range<usize>) -> Result<(), Error> {
    let mut items = stream.into_iter();
    match (items.next(), items.next()) {
        (None, _) => Err(Error::new(vec![span], EmptyExpression)),
        (Some(item), None) if item.is_operand() => {
            target.insert(item.into_node());
            Ok(())
        },
        (Some(item), None) => Err(Error::new(vec![item.span()], UnexpectedExpression)),
        (Some(_), Some(extra)) => {
            let end = items.last().map_or(extra.span().end, |item| item.span().end);
            Err(Error::new(vec![extra.span().start..end], UnexpectedExpression))
        },
    }
}
