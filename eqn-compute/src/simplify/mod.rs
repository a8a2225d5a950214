//! The rewrite engine.
//!
//! Simplification applies a fixed list of [`rules`] to a tree in place, one rewrite at a time.
//! Each cycle tries the rules in priority order; a rule is tried on every node of the tree, top
//! down, before the next rule is considered. The first rule that applies rewrites its node, the
//! tree is [normalized](normalize), the rewrite is recorded and the cycle restarts from the first
//! rule. Simplification ends when no rule applies, or after [`Config::max_cycles`] cycles.
//!
//! ```
//! use eqn_compute::{simplify::{simplify, Context}, Config};
//! use eqn_parser::{parse, registry::REGISTRY, tree::Renderer};
//!
//! let mut root = parse("2+3+4", &REGISTRY).unwrap().root;
//! let config = Config::default();
//! let mut steps = Vec::new();
//! simplify(&mut root, &Context::new(&REGISTRY, &config), &mut steps);
//!
//! assert_eq!(Renderer::new(&REGISTRY).render(&root), "9");
//! assert_eq!(steps.len(), 1);
//! ```

pub mod normalize;
pub mod rules;

use crate::{config::Config, step::{Rewrite, Snapshot}, step_collector::StepCollector};
use eqn_parser::{registry::Registry, tree::{Node, Renderer}};
use log::{trace, warn};
use rules::Rule;

pub use normalize::normalize;

/// Everything a rule can look at besides the node it rewrites.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub config: &'a Config,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a Registry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    /// Renders a node the way it is displayed in steps.
    pub fn render(&self, node: &Node) -> String {
        Renderer::new(self.registry)
            .with_decimals(self.config.decimals)
            .render(node)
    }
}

/// Simplifies the tree in place, pushing a [`Snapshot`] of the whole tree after every rewrite.
///
/// Returns true if any rule applied.
pub fn simplify(root: &mut Node, ctx: &Context, step_collector: &mut dyn StepCollector<Snapshot>) -> bool {
    normalize(root, ctx.registry);

    let mut changed = false;
    for _ in 0..ctx.config.max_cycles {
        let before = root.clone();
        let Some(rewrite) = apply_once(root, ctx) else {
            return changed;
        };
        normalize(root, ctx.registry);

        if *root == before {
            warn!("`{}` did not change the tree; stopping", rewrite);
            return changed;
        }

        trace!("{}\n{}", rewrite, root.dump());
        step_collector.push(Snapshot { tree: root.snapshot(), rewrite });
        changed = true;
    }

    warn!("stopped simplifying after {} cycles", ctx.config.max_cycles);
    changed
}

/// Applies the first rule that applies anywhere in the tree.
fn apply_once(root: &mut Node, ctx: &Context) -> Option<Rewrite> {
    rules::ALL.iter().find_map(|&rule| apply_anywhere(root, rule, ctx))
}

/// Applies the rule to the first node it applies to, in pre-order.
fn apply_anywhere(node: &mut Node, rule: Rule, ctx: &Context) -> Option<Rewrite> {
    let mut rewrites = Vec::new();
    if let Some(replacement) = rule(node, ctx, &mut rewrites) {
        if let Some(rewrite) = rewrites.pop() {
            node.splice(replacement);
            return Some(rewrite);
        }
    }

    node.children.iter_mut().find_map(|child| apply_anywhere(child, rule, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqn_parser::{parse, REGISTRY};
    use pretty_assertions::assert_eq;

    fn simplified(input: &str) -> (String, Vec<Snapshot>) {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut root = parse(input, &REGISTRY).unwrap().root;
        let mut steps = Vec::new();
        simplify(&mut root, &ctx, &mut steps);
        (ctx.render(&root), steps)
    }

    #[test]
    fn folds_in_either_order() {
        assert_eq!(simplified("2+3+4").0, "9");
        assert_eq!(simplified("4+3+2").0, "9");
    }

    #[test]
    fn parenthesized_difference() {
        let (result, steps) = simplified("2+\\left(8-9\\right)\\cdot 4");
        assert_eq!(result, "-2");
        assert_eq!(
            steps.iter().map(|step| step.rewrite.clone()).collect::<Vec<_>>(),
            vec![
                Rewrite::NumericFold { operation: "addition" },
                Rewrite::NumericFold { operation: "multiplication" },
                Rewrite::NumericFold { operation: "addition" },
            ],
        );
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("x+x").0, "2\\cdot x");
        assert_eq!(simplified("3x-x").0, "2\\cdot x");
        assert_eq!(simplified("x-x").0, "0");
    }

    #[test]
    fn consecutive_steps_differ() {
        let (_, steps) = simplified("\\frac{2\\pi}{2e}+\\sin\\frac{\\pi}{2}\\cdot 3-\\left|-4\\right|");
        assert!(!steps.is_empty());
        for pair in steps.windows(2) {
            assert_ne!(pair[0].tree, pair[1].tree);
        }
    }

    #[test]
    fn bounded() {
        let config = Config { max_cycles: 1, ..Config::default() };
        let ctx = Context::new(&REGISTRY, &config);
        let mut root = parse("1+2+x\\cdot 1", &REGISTRY).unwrap().root;
        let mut steps = Vec::new();
        assert!(simplify(&mut root, &ctx, &mut steps));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn unit_collector() {
        let config = Config::default();
        let ctx = Context::new(&REGISTRY, &config);
        let mut root = parse("x", &REGISTRY).unwrap().root;
        assert!(!simplify(&mut root, &ctx, &mut ()));
    }
}
