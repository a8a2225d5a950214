//! Operator identities.

use crate::{simplify::{rules::{do_add, do_multiply, without}, Context}, step::Rewrite, step_collector::StepCollector};
use eqn_parser::tree::Node;

/// `a*1 = a`
/// `a*0 = 0`
///
/// Whichever of the two factors comes first is applied.
pub fn multiply_identity(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let (replacement, rewrite) = do_multiply(node, |factors| {
        let i = factors.iter().position(|factor| factor.is_number(0.0) || factor.is_number(1.0))?;
        if factors[i].is_number(0.0) {
            Some((Node::num(0.0), Rewrite::MultiplyZero))
        } else {
            Some((Node::product(without(factors, i)), Rewrite::MultiplyOne))
        }
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(rewrite);
    Some(replacement)
}

/// `a+0 = a`
/// `0+a = a`
pub fn add_zero(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_add(node, |terms| {
        let i = terms.iter().position(|term| term.is_number(0.0))?;
        Some(Node::sum(without(terms, i)))
    })?;

    step_collector.push(Rewrite::AddZero);
    Some(opt)
}

/// Applies all identity rules.
pub fn all(node: &Node, _: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    multiply_identity(node, step_collector)
        .or_else(|| add_zero(node, step_collector))
}
