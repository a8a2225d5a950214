//! Turning a parsed equation into a list of steps.

use crate::{
    compare::{evaluate_comparison, round_to},
    config::Config,
    simplify::{normalize, simplify, Context},
    solve::solve,
    step::{Rewrite, Snapshot, Step},
};
use eqn_error::Error;
use eqn_parser::{
    parse,
    registry::{symbol, Registry, REGISTRY},
    token::{Token, TokenKind},
    tree::{fmt::format_number, Node},
    Parsed,
};
use log::debug;

/// What is done with an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Simplify an expression without a comparison.
    Simplify,

    /// Decide a comparison without variables.
    Compare,

    /// Isolate the variable of a comparison.
    Solve,
}

/// A parsed equation.
#[derive(Debug, Clone)]
pub struct Equation<'r> {
    registry: &'r Registry,
    config: Config,
    parsed: Parsed,
}

impl Equation<'static> {
    /// Parses an equation with the standard registry.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::parse_with(input, &REGISTRY)
    }
}

impl<'r> Equation<'r> {
    /// Parses an equation with the given registry.
    pub fn parse_with(input: &str, registry: &'r Registry) -> Result<Self, Error> {
        let parsed = parse(input, registry)?;
        Ok(Self { registry, config: Config::default(), parsed })
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The parsed tree.
    pub fn root(&self) -> &Node {
        &self.parsed.root
    }

    pub fn has_comparison(&self) -> bool {
        self.parsed.has_comparison
    }

    pub fn has_variables(&self) -> bool {
        self.parsed.has_variables
    }

    /// Decides what to do with the equation.
    pub fn classify(&self) -> Action {
        let action = match (self.parsed.has_comparison, self.parsed.has_variables) {
            (true, false) => Action::Compare,
            (true, true) => Action::Solve,
            (false, _) => Action::Simplify,
        };
        debug!("classified as {:?}", action);
        action
    }

    /// The steps of the action returned by [`Equation::classify`].
    pub fn steps(&self) -> Vec<Step<'r>> {
        match self.classify() {
            Action::Simplify => self.simplify(),
            Action::Compare => self.compare(),
            Action::Solve => self.solve(),
        }
    }

    /// Simplifies the equation. The steps are linked with `=`, or with `\approx` once the tree
    /// is a bare literal.
    pub fn simplify(&self) -> Vec<Step<'r>> {
        let (initial, snapshots) = self.run(|root, ctx, snapshots| {
            simplify(root, ctx, snapshots);
        });

        let equals = Token::new(TokenKind::Comparison, symbol::EQUALS);
        let approx = Token::new(TokenKind::Comparison, symbol::APPROX);
        let mut steps = vec![initial];
        let mut collapsed = false;
        for Snapshot { tree, rewrite } in snapshots {
            let literal = tree.child().is_some_and(|child| child.as_number().is_some());
            let prefix = if literal { approx.clone() } else { equals.clone() };
            let step = self.step(tree, Some(rewrite), Some(prefix));

            // the first literal is shown at full precision
            steps.push(if literal && !collapsed { step.precise() } else { step });
            collapsed |= literal;
        }

        // followed by its rounded value, when rounding changes it
        let rounded = steps.last()
            .filter(|step| step.precise && self.rounds(&step.tree))
            .and_then(|step| step.tree.child()?.as_number());
        if let Some(value) = rounded {
            steps.push(self.step(
                Node::root(Node::num(round_to(value, self.config.decimals))),
                Some(Rewrite::Round { decimals: self.config.decimals }),
                Some(approx),
            ));
        }

        self.combine(steps)
    }

    /// Simplifies both sides of the comparison, then decides it. The steps are linked with
    /// `\implies`.
    pub fn compare(&self) -> Vec<Step<'r>> {
        let (initial, snapshots) = self.run(|root, ctx, snapshots| {
            simplify(root, ctx, snapshots);
            decide(root, ctx, snapshots);
        });
        self.implied(initial, snapshots)
    }

    /// Isolates the variable, then decides the comparison if the variable cancelled out. The
    /// steps are linked with `\implies`.
    pub fn solve(&self) -> Vec<Step<'r>> {
        let (initial, snapshots) = self.run(|root, ctx, snapshots| {
            simplify(root, ctx, snapshots);
            solve(root, ctx, snapshots);
            decide(root, ctx, snapshots);
        });
        self.implied(initial, snapshots)
    }

    /// Runs an algorithm on a copy of the tree, returning the initial step and the snapshots the
    /// algorithm recorded.
    fn run(&self, algorithm: impl FnOnce(&mut Node, &Context, &mut Vec<Snapshot>)) -> (Step<'r>, Vec<Snapshot>) {
        let ctx = Context::new(self.registry, &self.config);
        let mut root = self.parsed.root.clone();
        normalize(&mut root, self.registry);
        let initial = self.step(root.snapshot(), None, None);

        let mut snapshots = Vec::new();
        algorithm(&mut root, &ctx, &mut snapshots);
        (initial, snapshots)
    }

    fn step(&self, tree: Node, rewrite: Option<Rewrite>, prefix: Option<Token>) -> Step<'r> {
        Step::new(self.registry, self.config.decimals, tree, rewrite, prefix)
    }

    /// Returns true if the tree is a literal that is changed by rounding it for display.
    fn rounds(&self, tree: &Node) -> bool {
        tree.child()
            .and_then(Node::as_number)
            .is_some_and(|value| value.is_finite() && format_number(value, self.config.decimals) != Token::num(value).text)
    }

    fn implied(&self, initial: Step<'r>, snapshots: Vec<Snapshot>) -> Vec<Step<'r>> {
        let prefix = Token::new(TokenKind::Logic, symbol::IMPLIES);
        let steps = std::iter::once(initial)
            .chain(snapshots.into_iter().map(|Snapshot { tree, rewrite }| {
                self.step(tree, Some(rewrite), Some(prefix.clone()))
            }))
            .collect();
        self.combine(steps)
    }

    /// Replaces the initial step with one that links the first tree to the last one, if any
    /// step followed it.
    fn combine(&self, mut steps: Vec<Step<'r>>) -> Vec<Step<'r>> {
        if steps.len() < 2 {
            return steps;
        }

        let combined = steps.first()
            .zip(steps.last())
            .and_then(|(first, last)| {
                let prefix = last.prefix.clone()?;
                let children = vec![first.tree.child()?.clone(), last.tree.child()?.clone()];
                Some(Node::root(Node::with_children(prefix, children)))
            });
        if let Some(tree) = combined {
            steps[0] = self.step(tree, None, None);
        }
        steps
    }
}

/// Decides the comparison, recording a snapshot if it was decided.
fn decide(root: &mut Node, ctx: &Context, snapshots: &mut Vec<Snapshot>) {
    if let Some(rewrite) = evaluate_comparison(root, ctx) {
        snapshots.push(Snapshot { tree: root.snapshot(), rewrite });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classification() {
        assert_eq!(Equation::parse("2+3").unwrap().classify(), Action::Simplify);
        assert_eq!(Equation::parse("x+3").unwrap().classify(), Action::Simplify);
        assert_eq!(Equation::parse("2=3").unwrap().classify(), Action::Compare);
        assert_eq!(Equation::parse("2x=3").unwrap().classify(), Action::Solve);
    }

    #[test]
    fn nothing_to_do() {
        let steps = Equation::parse("x").unwrap().simplify();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].render(), "x");
        assert_eq!(steps[0].prefix(), None);
        assert_eq!(steps[0].message(), "");
    }

    #[test]
    fn combined_first_step() {
        let steps = Equation::parse("2+3").unwrap().simplify();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].render(), "2+ 3\\approx5");
        assert_eq!(steps[1].to_string(), "\\approx 5");
        assert!(steps[1].precise);
        assert_eq!(steps[1].message(), "Calculate the addition.");
    }

    #[test]
    fn decimals() {
        let config = Config { decimals: 4, ..Config::default() };
        let steps = Equation::parse("\\frac{1}{3}").unwrap().with_config(config).simplify();
        assert_eq!(steps.last().unwrap().render(), "0.3333");
    }

    #[test]
    fn collapsed_literal_is_approximate() {
        let steps = Equation::parse("0.1+0.2").unwrap().simplify();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].prefix(), Some("\\approx"));
        assert!(steps[1].precise);
        assert_eq!(steps[1].render(), "0.30000000000000004");
        assert_eq!(steps[2].to_string(), "\\approx 0.3");
        assert!(!steps[2].precise);
        assert_eq!(steps[0].render(), "0.1+ 0.2\\approx0.3");
    }

    #[test]
    fn unfinished_steps_are_equal() {
        let steps = Equation::parse("2x+0").unwrap().simplify();
        assert!(steps[1..].iter().all(|step| step.prefix() == Some("=")));
        assert!(steps[1..].iter().all(|step| !step.precise));
    }
}
