//! Isolating the variable of an equation or inequality.
//!
//! Each isolation step moves the side with the variable to the left, or peels one layer off the
//! left side and applies its inverse to the right side. The tree is simplified after every step.
//! Isolation stops when the left side is the bare variable, or when no inverse can be applied.

use crate::{
    simplify::{normalize, rules::{add, multiply}, simplify, Context},
    step::{Rewrite, Snapshot},
    step_collector::StepCollector,
};
use eqn_parser::{token::{Token, TokenKind}, tree::Node};
use log::{debug, warn};

/// Isolates the variable, pushing a [`Snapshot`] after every isolation step and every rewrite of
/// the simplifications in between.
pub fn solve(root: &mut Node, ctx: &Context, step_collector: &mut dyn StepCollector<Snapshot>) {
    for _ in 0..ctx.config.max_cycles {
        let Some(comparison) = root.children.first_mut().filter(|child| child.is(TokenKind::Comparison)) else {
            return;
        };
        let Some(rewrite) = isolate_once(comparison, ctx) else {
            return;
        };

        normalize(root, ctx.registry);
        debug!("{}\n{}", rewrite, root.dump());
        step_collector.push(Snapshot { tree: root.snapshot(), rewrite });
        simplify(root, ctx, step_collector);
    }

    warn!("stopped isolating after {} cycles", ctx.config.max_cycles);
}

/// The terms of a side, as they would be if the side were a sum.
fn terms_of(node: Node) -> Vec<Node> {
    let node = node.without_braces();
    if node.is_sum() {
        node.children
    } else {
        vec![node]
    }
}

/// Removes the enclosure of a side that no longer needs one.
fn bare(mut node: Node) -> Node {
    node.enclosure = None;
    node
}

/// Whether multiplying or dividing both sides by the factor flips an inequality. Returns [`None`]
/// if the sign of the factor is unknown.
fn flips(factor: &Node, inequality: bool) -> Option<bool> {
    if !inequality {
        return Some(false);
    }
    factor.as_number().map(|value| value < 0.0)
}

/// Applies one isolation step to the comparison, returning what was done.
pub fn isolate_once(comparison: &mut Node, ctx: &Context) -> Option<Rewrite> {
    let operator = ctx.registry.comparison(&comparison.value.text)?;
    let mirrored = Token::new(TokenKind::Comparison, operator.mirrored);
    let inequality = operator.mirrored != comparison.value.text;

    let [left, right] = comparison.children.as_slice() else {
        return None;
    };
    let (left, right) = (left.clone(), right.clone());

    let (new_left, new_right, rewrite, flipped) = match (left.contains_variable(), right.contains_variable()) {
        (false, false) => return None,
        (false, true) => (right, left, Rewrite::SwapSides, true),
        (true, true) => {
            let terms = terms_of(left)
                .into_iter()
                .chain(terms_of(right).into_iter().map(|term| Node::negation(term.grouped())));
            (add(terms), Node::num(0.0), Rewrite::MoveTermsLeft, false)
        },
        (true, false) => peel(left, right, inequality, ctx)?,
    };

    if flipped {
        comparison.value = mirrored;
    }
    comparison.children.clear();
    comparison.insert(bare(new_left));
    comparison.insert(bare(new_right));
    Some(rewrite)
}

/// Peels one layer off the left side, which is the only side with the variable.
fn peel(left: Node, right: Node, inequality: bool, ctx: &Context) -> Option<(Node, Node, Rewrite, bool)> {
    if left.is_sum() {
        let i = left.children.iter().position(|term| !term.contains_variable())?;
        let mut terms = left.children;
        let term = terms.remove(i);
        let rewrite = Rewrite::SubtractBothSides(ctx.render(&bare(term.clone())));
        let right = add(terms_of(right).into_iter().chain([Node::negation(term.grouped())]));
        return Some((Node::sum(terms), right, rewrite, false));
    }

    if left.is_product() {
        let i = left.children.iter().position(|factor| !factor.contains_variable())?;
        let mut factors = left.children;
        let factor = bare(factors.remove(i));
        let flipped = flips(&factor, inequality)?;
        let rewrite = Rewrite::DivideBothSides { factor: ctx.render(&factor), flipped };
        return Some((Node::product(factors), Node::fraction(right, factor), rewrite, flipped));
    }

    if let [numerator, denominator] = left.children.as_slice() {
        if left.is_fraction() && !denominator.contains_variable() {
            let denominator = bare(denominator.clone());
            let flipped = flips(&denominator, inequality)?;
            let rewrite = Rewrite::MultiplyBothSides { factor: ctx.render(&denominator), flipped };
            let right = multiply([right, denominator]);
            return Some((numerator.clone(), right, rewrite, flipped));
        }
    }

    if left.is_negation() {
        let child = left.child()?.clone();
        let right = Node::negation(right.grouped());
        return Some((child, right, Rewrite::NegateBothSides { flipped: inequality }, inequality));
    }

    if left.is(TokenKind::TrigFun) && !inequality {
        let function = ctx.registry.function(&left.value.text)?;
        let inverse = ctx.registry.function(function.inverse_symbol)?;
        let applied = Node::with_children(
            Token::new(TokenKind::TrigFun, function.inverse_symbol),
            vec![right.grouped()],
        );
        return Some((left.child()?.clone(), applied, Rewrite::InverseFunction { name: inverse.name }, false));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use eqn_parser::{parse, REGISTRY};
    use pretty_assertions::assert_eq;

    fn solved(input: &str) -> (String, Vec<Rewrite>) {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut root = parse(input, &REGISTRY).unwrap().root;
        let mut steps = Vec::new();
        simplify(&mut root, &ctx, &mut steps);
        solve(&mut root, &ctx, &mut steps);
        (ctx.render(&root), steps.into_iter().map(|step| step.rewrite).collect())
    }

    #[test]
    fn linear() {
        let (result, rewrites) = solved("2x+3=7");
        assert_eq!(result, "x=2");
        assert_eq!(rewrites[0], Rewrite::SubtractBothSides("3".to_string()));
        assert!(rewrites.contains(&Rewrite::DivideBothSides { factor: "2".to_string(), flipped: false }));
    }

    #[test]
    fn variable_on_the_right() {
        let (result, rewrites) = solved("4=x+1");
        assert_eq!(result, "x=3");
        assert_eq!(rewrites[0], Rewrite::SwapSides);
    }

    #[test]
    fn variable_on_both_sides() {
        let (result, rewrites) = solved("3x=x+4");
        assert_eq!(result, "x=2");
        assert_eq!(rewrites[0], Rewrite::MoveTermsLeft);
    }

    #[test]
    fn inequality_flips() {
        let (result, _) = solved("-2x<4");
        assert_eq!(result, "x>-2");
    }

    #[test]
    fn inverse_function() {
        let (result, rewrites) = solved("\\sin x=1");
        assert_eq!(rewrites[0], Rewrite::InverseFunction { name: "arcsine" });
        assert_eq!(result, "x=1.57");
    }

    #[test]
    fn fraction() {
        assert_eq!(solved("\\frac{x}{2}=3").0, "x=6");
    }
}
