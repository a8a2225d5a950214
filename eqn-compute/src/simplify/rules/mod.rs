//! Implementation of the simplification rules.
//!
//! Each rule is a function that takes the node to rewrite as an argument, and returns
//! `Some(node)` with the replacement if the rule applies, or `None` if it does not. A rule that
//! applies pushes exactly one [`Rewrite`] describing what it did.

pub mod evaluate;
pub mod fold;
pub mod fraction;
pub mod identity;

use crate::{simplify::Context, step::Rewrite, step_collector::StepCollector};
use eqn_parser::tree::Node;

/// The signature of a rule.
pub type Rule = fn(&Node, &Context, &mut dyn StepCollector<Rewrite>) -> Option<Node>;

/// Every rule, highest priority first.
pub const ALL: [Rule; 9] = [
    identity::all,
    fraction::division_to_fraction,
    fraction::all,
    fold::numeric,
    fold::symbolic,
    evaluate::trigonometric,
    evaluate::construct,
    evaluate::absolute_value,
    evaluate::constants,
];

/// If the node is a sum, calls the given transformation function with the terms.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_add<T>(node: &Node, f: impl FnOnce(&[Node]) -> Option<T>) -> Option<T> {
    if node.is_sum() {
        f(&node.children)
    } else {
        None
    }
}

/// If the node is a product, calls the given transformation function with the factors.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_multiply<T>(node: &Node, f: impl FnOnce(&[Node]) -> Option<T>) -> Option<T> {
    if node.is_product() {
        f(&node.children)
    } else {
        None
    }
}

/// If the node is a fraction, calls the given transformation function with the numerator and
/// denominator.
pub(crate) fn do_fraction<T>(node: &Node, f: impl FnOnce(&Node, &Node) -> Option<T>) -> Option<T> {
    match node.children.as_slice() {
        [numerator, denominator] if node.is_fraction() => f(numerator, denominator),
        _ => None,
    }
}

/// The terms of an unenclosed sum (or the factors of an unenclosed product, when `sum` is false),
/// or the node itself.
fn operands_like(node: Node, sum: bool) -> Vec<Node> {
    let flattens = node.enclosure.is_none() && if sum { node.is_sum() } else { node.is_product() };
    if flattens {
        node.children
    } else {
        vec![node]
    }
}

/// Multiplies the nodes, merging the factors of products into one product.
pub(crate) fn multiply(factors: impl IntoIterator<Item = Node>) -> Node {
    let factors = factors.into_iter()
        .flat_map(|factor| operands_like(factor.without_braces(), false))
        .map(Node::grouped)
        .collect();
    Node::product(factors)
}

/// Adds the nodes, merging the terms of sums into one sum.
pub(crate) fn add(terms: impl IntoIterator<Item = Node>) -> Node {
    let terms = terms.into_iter()
        .flat_map(|term| operands_like(term.without_braces(), true))
        .collect();
    Node::sum(terms)
}

/// Returns the operands without the one at the given index.
pub(crate) fn without(operands: &[Node], index: usize) -> Vec<Node> {
    operands.iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, operand)| operand.clone())
        .collect()
}

/// Returns true if the two lists hold the same nodes, in any order.
pub(crate) fn same_multiset(a: &[Node], b: &[Node]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut remaining = b.iter().collect::<Vec<_>>();
    a.iter().all(|node| {
        match remaining.iter().position(|other| *other == node) {
            Some(i) => {
                remaining.swap_remove(i);
                true
            },
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn multiply_flattens() {
        let product = multiply([
            Node::product(vec![Node::num(2.0), Node::var("x")]),
            Node::sum(vec![Node::var("a"), Node::var("b")]).braced(),
        ]);
        assert_eq!(product.children.len(), 3);
        assert!(product.children[2].enclosure.as_ref().is_some_and(|open| open.has("\\left(")));
    }

    #[test]
    fn add_flattens() {
        let sum = add([Node::sum(vec![Node::var("a"), Node::var("b")]), Node::num(1.0)]);
        assert_eq!(sum, Node::sum(vec![Node::var("a"), Node::var("b"), Node::num(1.0)]));
    }

    #[test]
    fn multisets() {
        let a = [Node::var("x"), Node::var("y"), Node::var("x")];
        let b = [Node::var("x"), Node::var("x"), Node::var("y")];
        let c = [Node::var("x"), Node::var("y"), Node::var("y")];
        assert!(same_multiset(&a, &b));
        assert!(!same_multiset(&a, &c));
    }
}
