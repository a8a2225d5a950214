//! Evaluation of functions, constructs, absolute values and constants.

use crate::{simplify::{simplify, Context}, step::Rewrite, step_collector::StepCollector};
use eqn_parser::{registry::{symbol, Registry}, token::TokenKind, tree::Node};
use log::warn;

/// Evaluates a trigonometric function whose argument simplifies to a literal.
///
/// The argument is simplified on the side, without recording steps. A function that has no
/// finite value at the argument, such as `\arcsin 2`, is left as it is.
pub fn trigonometric(node: &Node, ctx: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    if !node.is(TokenKind::TrigFun) {
        return None;
    }
    let function = ctx.registry.function(&node.value.text)?;

    let mut argument = Node::root(node.child()?.clone());
    simplify(&mut argument, ctx, &mut ());
    let value = argument.child()?.as_number()?;

    let Some(result) = (function.eval)(value) else {
        warn!("the {} function is undefined at {}", function.name, value);
        return None;
    };

    step_collector.push(Rewrite::Trig { name: function.name });
    Some(result)
}

/// Evaluates a construct whose operands are literals.
///
/// `\frac{3}{4} = 0.75`
pub fn construct(node: &Node, ctx: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    if !node.is(TokenKind::Struct) {
        return None;
    }
    let construct = ctx.registry.construct(&node.value.text)?;

    let result = match construct.evaluate(&node.value.text, &node.children) {
        Ok(result) => result?,
        Err(err) => {
            warn!("cannot evaluate `{}`: {:?}", node.value.text, err);
            return None;
        },
    };

    step_collector.push(Rewrite::Construct { name: construct.verbose });
    Some(result)
}

/// `\left|-3\right| = 3`
pub fn absolute_value(node: &Node, _: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    if !node.is_symbol(TokenKind::EncOp, symbol::LEFT_ABS) {
        return None;
    }
    let value = node.child()?.as_number()?;

    step_collector.push(Rewrite::AbsoluteValue);
    Some(Node::num(value.abs()))
}

/// The value and symbol of a constant or a negated constant.
fn constant_value<'a>(node: &'a Node, registry: &Registry) -> Option<(f64, &'a str)> {
    if node.is_negation() {
        let (value, name) = constant_value(node.child()?, registry)?;
        return Some((-value, name));
    }

    if !node.is(TokenKind::Const) {
        return None;
    }
    let constant = registry.constant(&node.value.text)?;
    Some((constant.value, node.value.text.as_str()))
}

/// Converts every constant among the children of a node to its value. A negated constant is
/// converted too.
///
/// `2 \cdot \pi + e = 2 \cdot 3.14159... + 2.71828...`
pub fn constants(node: &Node, ctx: &Context, step_collector: &mut dyn StepCollector<Rewrite>) -> Option<Node> {
    let mut symbols = Vec::<String>::new();
    let mut replacement = node.clone();
    for child in &mut replacement.children {
        let Some((value, name)) = constant_value(child, ctx.registry) else {
            continue;
        };
        if !symbols.iter().any(|symbol| symbol == name) {
            symbols.push(name.to_string());
        }
        child.replace_with(Node::num(value));
    }

    if symbols.is_empty() {
        return None;
    }
    step_collector.push(Rewrite::ConvertConstants(symbols));
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use assert_float_eq::assert_float_absolute_eq;
    use eqn_parser::{token::Token, REGISTRY};
    use pretty_assertions::assert_eq;

    fn function(symbol: &str, argument: Node) -> Node {
        Node::with_children(Token::new(TokenKind::TrigFun, symbol), vec![argument])
    }

    #[test]
    fn sine_of_half_pi() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut steps = Vec::new();
        let node = function("\\sin", Node::fraction(Node::constant("\\pi"), Node::num(2.0)));
        assert_eq!(trigonometric(&node, &ctx, &mut steps), Some(Node::num(1.0)));
        assert_eq!(steps, vec![Rewrite::Trig { name: "sine" }]);
    }

    #[test]
    fn undefined_function_is_left_alone() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        assert_eq!(trigonometric(&function("\\arcsin", Node::num(2.0)), &ctx, &mut ()), None);
        assert_eq!(trigonometric(&function("\\sin", Node::var("x")), &ctx, &mut ()), None);
    }

    #[test]
    fn constants_and_negated_constants() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut steps = Vec::new();
        let node = Node::sum(vec![
            Node::constant("\\pi"),
            Node::negation(Node::constant("e")),
            Node::constant("\\pi"),
        ]);
        let result = constants(&node, &ctx, &mut steps).unwrap();
        assert_float_absolute_eq!(result.children[0].as_number().unwrap(), std::f64::consts::PI);
        assert_float_absolute_eq!(result.children[1].as_number().unwrap(), -std::f64::consts::E);
        assert_eq!(steps, vec![Rewrite::ConvertConstants(vec!["\\pi".to_string(), "e".to_string()])]);
    }

    #[test]
    fn absolute() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let node = Node::with_children(Token::new(TokenKind::EncOp, "\\left|"), vec![Node::num(-3.0)]);
        assert_eq!(absolute_value(&node, &ctx, &mut ()), Some(Node::num(3.0)));
    }

    #[test]
    fn fraction_construct() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let node = Node::fraction(Node::num(3.0), Node::num(4.0));
        assert_eq!(construct(&node, &ctx, &mut ()), Some(Node::num(0.75)));
        assert_eq!(construct(&Node::fraction(Node::num(3.0), Node::num(0.0)), &ctx, &mut ()), None);
    }
}
