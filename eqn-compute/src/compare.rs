//! Deciding comparisons between literals.

use crate::{simplify::Context, step::Rewrite};
use eqn_parser::{
    registry::symbol,
    token::{Token, TokenKind},
    tree::{fmt::format_number, Node},
};

/// Rounds a value the way it is displayed.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format_number(value, decimals).parse().unwrap_or(value)
}

/// Replaces the first comparison between two literals in the tree with `True` or `False`.
///
/// `\approx` compares both sides as they are displayed, rounded to [`Config::decimals`] places.
///
/// [`Config::decimals`]: crate::Config::decimals
pub fn evaluate_comparison(node: &mut Node, ctx: &Context) -> Option<Rewrite> {
    if !node.is(TokenKind::Comparison) {
        return node.children.iter_mut().find_map(|child| evaluate_comparison(child, ctx));
    }

    let comparison = ctx.registry.comparison(&node.value.text)?;
    let [left, right] = node.children.as_slice() else {
        return None;
    };
    let (mut left, mut right) = (left.as_number()?, right.as_number()?);
    if node.has(symbol::APPROX) {
        left = round_to(left, ctx.config.decimals);
        right = round_to(right, ctx.config.decimals);
    }

    let holds = comparison.execute(left, right);
    node.value = Token::text(if holds { "True" } else { "False" });
    node.children.clear();
    node.enclosure = Some(Token::new(TokenKind::EncOp, symbol::OPEN_BRACE));
    Some(Rewrite::EvaluateComparison(holds))
}
