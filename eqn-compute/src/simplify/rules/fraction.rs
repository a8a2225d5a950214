//! Rules that create and simplify fractions.

use crate::{
    simplify::{rules::{do_fraction, do_multiply, multiply, without}, Context},
    step::Rewrite,
    step_collector::StepCollector,
};
use eqn_parser::{registry::symbol, token::TokenKind, tree::Node};

/// Literals are scaled by this factor into integers before their GCD is computed.
const GCD_SCALE: f64 = 1e14;

/// Only literals with at most this many decimal places are reduced by their GCD.
const GCD_MAX_DECIMALS: i32 = 6;

/// Literals at least this large are not reduced, since they would not fit once scaled.
const GCD_MAX_MAGNITUDE: f64 = 1e20;

fn is_reciprocal(node: &Node) -> bool {
    node.is_symbol(TokenKind::DelOp, symbol::RECIPROCAL)
}

/// Converts the reciprocals among the factors of a product into the denominator of a fraction.
///
/// `a \div b \cdot c = \frac{a \cdot c}{b}`
pub fn division_to_fraction(node: &Node, _: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_multiply(node, |factors| {
        if !factors.iter().any(is_reciprocal) {
            return None;
        }

        let (divisors, others): (Vec<&Node>, Vec<&Node>) = factors.iter().partition(|factor| is_reciprocal(factor));
        let numerator = multiply(others.into_iter().cloned());
        let denominator = multiply(divisors.into_iter().filter_map(|divisor| divisor.child().cloned()));
        Some(Node::fraction(numerator, denominator))
    })
    .or_else(|| {
        // a reciprocal with nothing before it
        if is_reciprocal(node) {
            let divisor = node.child()?.clone();
            Some(Node::fraction(Node::num(1.0), divisor.without_braces()))
        } else {
            None
        }
    })?;

    step_collector.push(Rewrite::DivisionToFraction);
    Some(opt)
}

/// `\frac{a}{1} = a`
pub fn denominator_one(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        denominator.is_number(1.0).then(|| numerator.clone().without_braces())
    })?;

    step_collector.push(Rewrite::DenominatorOne);
    Some(opt)
}

/// `\frac{\frac{a}{b}}{\frac{c}{d}} = \frac{a \cdot d}{b \cdot c}`
///
/// A numerator or denominator that is not a fraction is treated as being over 1.
pub fn nested_fraction(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        if !numerator.is_fraction() && !denominator.is_fraction() {
            return None;
        }

        let split = |node: &Node| match node.children.as_slice() {
            [top, bottom] if node.is_fraction() => (top.clone(), Some(bottom.clone())),
            _ => (node.clone(), None),
        };
        let (a, b) = split(numerator);
        let (c, d) = split(denominator);
        Some(Node::fraction(
            multiply([Some(a), d].into_iter().flatten()),
            multiply([b, Some(c)].into_iter().flatten()),
        ))
    })?;

    step_collector.push(Rewrite::NestedFraction);
    Some(opt)
}

/// Cancels the first factor shared by the numerator and the denominator.
///
/// `\frac{a \cdot b}{a \cdot c} = \frac{b}{c}`
/// `\frac{a \cdot b}{a} = b`
/// `\frac{a}{a \cdot c} = \frac{1}{c}`
pub fn cancel_factors(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        let top = numerator.clone().without_braces();
        let bottom = denominator.clone().without_braces();
        match (top.is_product(), bottom.is_product()) {
            (true, true) => {
                let (i, j) = top.children.iter().enumerate().find_map(|(i, factor)| {
                    bottom.children.iter().position(|other| other == factor).map(|j| (i, j))
                })?;
                Some(Node::fraction(
                    Node::product(without(&top.children, i)),
                    Node::product(without(&bottom.children, j)),
                ))
            },
            (true, false) => {
                let i = top.children.iter().position(|factor| *factor == bottom)?;
                Some(Node::product(without(&top.children, i)))
            },
            (false, true) => {
                let j = bottom.children.iter().position(|factor| *factor == top)?;
                Some(Node::fraction(Node::num(1.0), Node::product(without(&bottom.children, j))))
            },
            (false, false) => None,
        }
    })?;

    step_collector.push(Rewrite::CancelFactors);
    Some(opt)
}

/// `\frac{a}{a} = 1`
pub fn cancel_equal(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        (numerator == denominator && !denominator.is_number(0.0)).then(|| Node::num(1.0))
    })?;

    step_collector.push(Rewrite::CancelEqual);
    Some(opt)
}

/// Scales a literal into an integer, if it has few enough decimal places for its GCD to be
/// meaningful.
fn scaled(value: f64) -> Option<i128> {
    if !value.is_finite() || value.abs() >= GCD_MAX_MAGNITUDE {
        return None;
    }

    let shifted = value * 10f64.powi(GCD_MAX_DECIMALS);
    let tolerance = (shifted.abs() * f64::EPSILON * 4.0).max(1e-6);
    if (shifted - shifted.round()).abs() > tolerance {
        return None;
    }
    Some((value * GCD_SCALE).round() as i128)
}

/// Euclid's algorithm.
fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// The greatest common divisor of two literals, or [`None`] if it cannot be computed or is 1.
pub fn literal_gcd(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }

    let divisor = gcd(scaled(a)?, scaled(b)?);
    if divisor == 0 || divisor == GCD_SCALE as i128 {
        return None;
    }
    Some(divisor as f64 / GCD_SCALE)
}

/// The index of the only literal among the factors of a product, or of the node itself if it is a
/// literal, together with the literal.
fn lone_literal(node: &Node) -> Option<(Option<usize>, f64)> {
    if let Some(value) = node.as_number() {
        return Some((None, value));
    }

    do_multiply(node, |factors| {
        let mut literals = factors.iter()
            .enumerate()
            .filter_map(|(i, factor)| factor.as_number().map(|value| (i, value)));
        let (i, value) = literals.next()?;
        literals.next().is_none().then_some((Some(i), value))
    })
}

/// Replaces the literal found by [`lone_literal`].
fn replace_literal(node: &Node, index: Option<usize>, value: f64) -> Node {
    let mut node = node.clone().without_braces();
    match index {
        Some(i) => node.children[i] = Node::num(value),
        None => node = Node::num(value),
    }
    node
}

/// Divides the literal of the numerator and the literal of the denominator by their greatest
/// common divisor.
///
/// `\frac{6}{8} = \frac{3}{4}`
/// `\frac{6x}{8} = \frac{3x}{4}`
pub fn reduce_fraction(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let (opt, rewrite) = do_fraction(node, |numerator, denominator| {
        let (top_index, top) = lone_literal(numerator)?;
        let (bottom_index, bottom) = lone_literal(denominator)?;
        let divisor = literal_gcd(top, bottom)?;
        Some((
            Node::fraction(
                replace_literal(numerator, top_index, top / divisor),
                replace_literal(denominator, bottom_index, bottom / divisor),
            ),
            Rewrite::ReduceFraction { numerator: top, denominator: bottom },
        ))
    })?;

    step_collector.push(rewrite);
    Some(opt)
}

/// Applies all fraction simplification rules.
pub fn all(node: &Node, _: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    denominator_one(node, step_collector)
        .or_else(|| nested_fraction(node, step_collector))
        .or_else(|| cancel_factors(node, step_collector))
        .or_else(|| cancel_equal(node, step_collector))
        .or_else(|| reduce_fraction(node, step_collector))
}
