//! Folding the operands of sums and products.

use crate::{
    simplify::{rules::{add, do_add, do_multiply, multiply, same_multiset, without}, Context},
    step::Rewrite,
    step_collector::StepCollector,
};
use eqn_parser::{token::TokenKind, tree::Node};

/// Folds every literal operand of an operator into one, placed where the first literal was.
///
/// `2+x+3 = 5+x`
pub fn numeric(node: &Node, ctx: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    if !node.is(TokenKind::Op) {
        return None;
    }
    let operator = ctx.registry.operator(&node.value.text)?;

    let literals = node.children.iter()
        .enumerate()
        .filter_map(|(i, child)| child.as_number().map(|value| (i, value)))
        .collect::<Vec<_>>();
    let [(first, _), _, ..] = literals.as_slice() else {
        return None;
    };
    let value = literals.iter()
        .map(|&(_, value)| value)
        .reduce(|a, b| operator.apply(a, b))?;

    let mut operands = node.children.iter()
        .enumerate()
        .filter_map(|(i, child)| {
            if i == *first {
                Some(Node::num(value))
            } else if child.as_number().is_some() {
                None
            } else {
                Some(child.clone())
            }
        })
        .collect::<Vec<_>>();

    step_collector.push(Rewrite::NumericFold { operation: operator.verbose });
    if operands.len() == 1 {
        Some(operands.remove(0))
    } else {
        Some(Node::with_children(node.value.clone(), operands))
    }
}

/// Splits a term into its numeric coefficient and the rest of its factors.
///
/// - `5` -> `(5, [])`
/// - `3x` -> `(3, [x])`
/// - `-2xy` -> `(-2, [x, y])`
/// - `\sin x` -> `(1, [\sin x])`
fn coefficient(term: &Node) -> (f64, Vec<Node>) {
    if let Some(value) = term.as_number() {
        return (value, Vec::new());
    }

    if term.is_negation() {
        if let Some(child) = term.child() {
            let (coefficient, factors) = coefficient(child);
            return (-coefficient, factors);
        }
    }

    if term.is_product() {
        let mut coefficient = 1.0;
        let mut factors = Vec::new();
        for factor in &term.children {
            match factor.as_number() {
                Some(value) => coefficient *= value,
                None => factors.push(factor.clone()),
            }
        }
        return (coefficient, factors);
    }

    (1.0, vec![term.clone()])
}

/// Builds a term from a coefficient and factors.
fn with_coefficient(coefficient: f64, factors: Vec<Node>) -> Node {
    if coefficient == 0.0 {
        return Node::num(0.0);
    }

    let body = multiply(factors);
    if coefficient == 1.0 {
        body
    } else if coefficient == -1.0 {
        Node::negation(body.grouped())
    } else {
        multiply([Node::num(coefficient), body])
    }
}

/// Splits a term into its sign and the numerator and denominator of a fraction.
fn signed_fraction(term: &Node) -> Option<(bool, &Node, &Node)> {
    if term.is_negation() {
        let (negative, numerator, denominator) = signed_fraction(term.child()?)?;
        return Some((!negative, numerator, denominator));
    }

    match term.children.as_slice() {
        [numerator, denominator] if term.is_fraction() => Some((false, numerator, denominator)),
        _ => None,
    }
}

fn signed(negative: bool, node: Node) -> Node {
    if negative {
        Node::negation(node.grouped())
    } else {
        node
    }
}

/// Adds the first two fractions of a sum.
///
/// `\frac{a}{b}+\frac{c}{d} = \frac{a \cdot d+c \cdot b}{b \cdot d}`
pub fn add_fractions(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_add(node, |terms| {
        let mut fractions = terms.iter()
            .enumerate()
            .filter_map(|(i, term)| signed_fraction(term).map(|fraction| (i, fraction)));
        let (i, (negative_ab, a, b)) = fractions.next()?;
        let (j, (negative_cd, c, d)) = fractions.next()?;

        let numerator = add([
            signed(negative_ab, multiply([a.clone(), d.clone()])),
            signed(negative_cd, multiply([c.clone(), b.clone()])),
        ]);
        let denominator = multiply([b.clone(), d.clone()]);

        let mut terms = terms.to_vec();
        terms[i] = Node::fraction(numerator, denominator);
        terms.remove(j);
        Some(Node::sum(terms))
    })?;

    step_collector.push(Rewrite::AddFractions);
    Some(opt)
}

/// Combines the first two terms of a sum that share the same factors.
///
/// `2x+3x = 5x`
/// `x-x = 0`
pub fn combine_like_terms(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_add(node, |terms| {
        let split = terms.iter().map(coefficient).collect::<Vec<_>>();
        let (i, j) = (0..split.len()).find_map(|i| {
            let (_, factors) = &split[i];
            if factors.is_empty() {
                return None;
            }
            (i + 1..split.len())
                .find(|&j| same_multiset(factors, &split[j].1))
                .map(|j| (i, j))
        })?;

        let combined = with_coefficient(split[i].0 + split[j].0, split[i].1.clone());
        let mut terms = terms.to_vec();
        terms[i] = combined;
        terms.remove(j);
        Some(Node::sum(terms))
    })?;

    step_collector.push(Rewrite::CombineLikeTerms);
    Some(opt)
}

fn fraction_parts(node: &Node) -> Option<(&Node, &Node)> {
    match node.children.as_slice() {
        [numerator, denominator] if node.is_fraction() => Some((numerator, denominator)),
        _ => None,
    }
}

/// Multiplies the first two fractions of a product.
///
/// `\frac{a}{b} \cdot \frac{c}{d} = \frac{a \cdot c}{b \cdot d}`
pub fn multiply_fractions(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_multiply(node, |factors| {
        let mut fractions = factors.iter()
            .enumerate()
            .filter_map(|(i, factor)| fraction_parts(factor).map(|parts| (i, parts)));
        let (i, (a, b)) = fractions.next()?;
        let (j, (c, d)) = fractions.next()?;

        let product = Node::fraction(
            multiply([a.clone(), c.clone()]),
            multiply([b.clone(), d.clone()]),
        );
        let mut factors = factors.to_vec();
        factors[i] = product;
        factors.remove(j);
        Some(Node::product(factors))
    })?;

    step_collector.push(Rewrite::MultiplyFractions);
    Some(opt)
}

/// Multiplies the numerator of a fraction by the other factors of its product.
///
/// `a \cdot \frac{b}{c} = \frac{a \cdot b}{c}`
pub fn absorb_into_numerator(node: &Node, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let opt = do_multiply(node, |factors| {
        let (i, (numerator, denominator)) = factors.iter()
            .enumerate()
            .find_map(|(i, factor)| fraction_parts(factor).map(|parts| (i, parts)))?;

        let mut others = without(factors, i);
        others.push(numerator.clone());
        Some(Node::fraction(multiply(others), denominator.clone()))
    })?;

    step_collector.push(Rewrite::AbsorbIntoNumerator);
    Some(opt)
}

/// Applies all symbolic folding rules.
pub fn symbolic(node: &Node, _: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    add_fractions(node, step_collector)
        .or_else(|| combine_like_terms(node, step_collector))
        .or_else(|| multiply_fractions(node, step_collector))
        .or_else(|| absorb_into_numerator(node, step_collector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use eqn_parser::REGISTRY;
    use pretty_assertions::assert_eq;

    #[test]
    fn numeric_fold_keeps_position() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut steps = Vec::new();
        let node = Node::sum(vec![Node::var("x"), Node::num(2.0), Node::var("y"), Node::num(3.0)]);
        assert_eq!(
            numeric(&node, &ctx, &mut steps),
            Some(Node::sum(vec![Node::var("x"), Node::num(5.0), Node::var("y")])),
        );
        assert_eq!(steps, vec![Rewrite::NumericFold { operation: "addition" }]);

        let single = Node::sum(vec![Node::num(2.0), Node::var("x")]);
        assert_eq!(numeric(&single, &ctx, &mut ()), None);
    }

    #[test]
    fn coefficients() {
        let term = Node::negation(Node::product(vec![Node::num(2.0), Node::var("x"), Node::var("y")]));
        assert_eq!(coefficient(&term), (-2.0, vec![Node::var("x"), Node::var("y")]));
        assert_eq!(coefficient(&Node::var("x")), (1.0, vec![Node::var("x")]));
    }

    #[test]
    fn like_terms_in_any_order() {
        let node = Node::sum(vec![
            Node::product(vec![Node::num(2.0), Node::var("x"), Node::var("y")]),
            Node::num(1.0),
            Node::product(vec![Node::var("y"), Node::num(3.0), Node::var("x")]),
        ]);
        assert_eq!(
            combine_like_terms(&node, &mut ()),
            Some(Node::sum(vec![
                Node::product(vec![Node::num(5.0), Node::var("x"), Node::var("y")]),
                Node::num(1.0),
            ])),
        );
    }

    #[test]
    fn fraction_difference() {
        let node = Node::sum(vec![
            Node::fraction(Node::num(1.0), Node::num(2.0)),
            Node::negation(Node::fraction(Node::num(1.0), Node::num(3.0))),
        ]);
        assert_eq!(
            add_fractions(&node, &mut ()),
            Some(Node::fraction(
                Node::sum(vec![
                    Node::product(vec![Node::num(1.0), Node::num(3.0)]),
                    Node::negation(Node::product(vec![Node::num(1.0), Node::num(2.0)])),
                ]),
                Node::product(vec![Node::num(2.0), Node::num(3.0)]),
            )),
        );
    }

    #[test]
    fn absorb() {
        let node = Node::product(vec![Node::num(2.0), Node::fraction(Node::var("x"), Node::num(3.0))]);
        assert_eq!(
            absorb_into_numerator(&node, &mut ()),
            Some(Node::fraction(Node::product(vec![Node::num(2.0), Node::var("x")]), Node::num(3.0))),
        );
    }
}
