use eqn_parser::{registry::Registry, token::Token, tree::{Node, Renderer}};
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A rewrite applied to a tree. The [`Display`] implementation gives the explanation shown next
/// to the step; math in the explanation is written between `$` signs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Rewrite {
    /// `x + 0 = x`
    AddZero,

    /// `x * 1 = x`
    MultiplyOne,

    /// `x * 0 = 0`
    MultiplyZero,

    /// `a \div b = a / b`
    DivisionToFraction,

    /// `x / 1 = x`
    DenominatorOne,

    /// `(a/b) / (c/d) = (ad) / (bc)`
    NestedFraction,

    /// `(ax) / (bx) = a / b`
    CancelFactors,

    /// `x / x = 1`
    CancelEqual,

    /// Both literals of a fraction were divided by their greatest common divisor.
    ReduceFraction { numerator: f64, denominator: f64 },

    /// The literal operands of an operator were combined.
    NumericFold { operation: &'static str },

    /// `ax + bx = (a+b)x`
    CombineLikeTerms,

    /// `a/b + c/d = (ad + cb) / (bd)`
    AddFractions,

    /// `a/b * c/d = (ac) / (bd)`
    MultiplyFractions,

    /// `a * (b/c) = (ab) / c`
    AbsorbIntoNumerator,

    /// A trigonometric function of a literal was evaluated.
    Trig { name: &'static str },

    /// A construct with literal operands was evaluated.
    Construct { name: &'static str },

    /// The absolute value of a literal was taken.
    AbsoluteValue,

    /// Constants were replaced with their values.
    ConvertConstants(Vec<String>),

    /// The result was rounded for display.
    Round { decimals: usize },

    /// A comparison of two literals was decided.
    EvaluateComparison(bool),

    /// The sides of the comparison were swapped so that the variable is on the left.
    SwapSides,

    /// The right side was subtracted from both sides.
    MoveTermsLeft,

    /// A term was subtracted from both sides.
    SubtractBothSides(String),

    /// Both sides were divided by a factor.
    DivideBothSides { factor: String, flipped: bool },

    /// Both sides were multiplied by a factor.
    MultiplyBothSides { factor: String, flipped: bool },

    /// Both sides were negated.
    NegateBothSides { flipped: bool },

    /// The inverse of a function was applied to both sides.
    InverseFunction { name: &'static str },
}

fn flip_note(flipped: bool) -> &'static str {
    if flipped {
        ", which flips the direction of the inequality"
    } else {
        ""
    }
}

impl Display for Rewrite {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddZero => write!(f, "In addition, 0 is ignored such that $x + 0 = x$."),
            Self::MultiplyOne => write!(f, "In multiplication, 1 is ignored such that $x \\cdot 1 = x$."),
            Self::MultiplyZero => write!(
                f,
                "When any number is multiplied by 0, the resulting product is always 0 such that $x \\cdot 0 = 0$.",
            ),
            Self::DivisionToFraction => write!(f, "Convert division operators to fractions for better calculations."),
            Self::DenominatorOne => write!(
                f,
                "A denominator of 1 can be ignored in division such that $\\frac{{x}}{{1}} = x$.",
            ),
            Self::NestedFraction => write!(
                f,
                "Simplify long division using the $\\frac{{\\frac{{a}}{{b}}}}{{\\frac{{c}}{{d}}}} = \\frac{{a \\cdot d}}{{b \\cdot c}}$ rule.",
            ),
            Self::CancelFactors | Self::CancelEqual => write!(
                f,
                "Cancel out inverse pairs using the $x \\cdot \\frac{{1}}{{x}} = 1$ rule.",
            ),
            Self::ReduceFraction { numerator, denominator } => write!(
                f,
                "Simplify by dividing the numbers {} and {} by their GCD (Greatest Common Divisor).",
                Token::num(*numerator),
                Token::num(*denominator),
            ),
            Self::NumericFold { operation } => write!(f, "Calculate the {}.", operation),
            Self::CombineLikeTerms => write!(f, "Add the coefficients of the common factors."),
            Self::AddFractions => write!(
                f,
                "Find the least common denominator (LCD) and rewrite the fraction sum using the $\\frac{{a}}{{b}} + \\frac{{c}}{{d}} = \\frac{{a \\cdot d + c \\cdot b}}{{b \\cdot d}}$ rule.",
            ),
            Self::MultiplyFractions => write!(f, "Calculate the product of the fractions."),
            Self::AbsorbIntoNumerator => write!(
                f,
                "Multiply the numerator of the fraction using the $a \\cdot \\frac{{b}}{{c}} = \\frac{{a \\cdot b}}{{c}}$ rule.",
            ),
            Self::Trig { name } => write!(f, "Calculate the trigonometric {} function.", name),
            Self::Construct { name } => write!(f, "Calculate the {}.", name),
            Self::AbsoluteValue => write!(f, "Calculate the absolute value."),
            Self::ConvertConstants(symbols) => {
                let plural = if symbols.len() > 1 { "s" } else { "" };
                let list = symbols.iter()
                    .map(|symbol| format!("${}$", symbol))
                    .collect::<Vec<_>>()
                    .join(" and ");
                write!(f, "Convert constant{} {} to number{}.", plural, list, plural)
            },
            Self::Round { decimals } => write!(f, "Round the result to {} decimal places.", decimals),
            Self::EvaluateComparison(holds) => {
                write!(f, "The comparison is {}.", if *holds { "true" } else { "false" })
            },
            Self::SwapSides => write!(f, "Swap the sides so that the variable is on the left."),
            Self::MoveTermsLeft => write!(
                f,
                "Subtract the right side from both sides so that the variable is only on the left.",
            ),
            Self::SubtractBothSides(term) => write!(f, "Subtract ${}$ from both sides.", term),
            Self::DivideBothSides { factor, flipped } => {
                write!(f, "Divide both sides by ${}${}.", factor, flip_note(*flipped))
            },
            Self::MultiplyBothSides { factor, flipped } => {
                write!(f, "Multiply both sides by ${}${}.", factor, flip_note(*flipped))
            },
            Self::NegateBothSides { flipped } => {
                write!(f, "Multiply both sides by $-1${}.", flip_note(*flipped))
            },
            Self::InverseFunction { name } => write!(f, "Apply the {} to both sides.", name),
        }
    }
}

/// A rewrite, together with the whole tree right after it was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: Node,
    pub rewrite: Rewrite,
}

/// One step of a derivation: a tree, the rewrite that produced it, and the connective that links
/// it to the step before.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Step<'r> {
    /// The whole tree, from its root.
    pub tree: Node,

    /// The rewrite that produced the tree. The first step of a derivation has none.
    pub rewrite: Option<Rewrite>,

    /// `=`, `\approx` or `\implies`. The first step of a derivation has none.
    pub prefix: Option<Token>,

    /// Whether numbers are rendered at full precision.
    pub precise: bool,

    decimals: usize,

    #[cfg_attr(feature = "serde", serde(skip))]
    registry: &'r Registry,
}

impl<'r> Step<'r> {
    pub fn new(
        registry: &'r Registry,
        decimals: usize,
        tree: Node,
        rewrite: Option<Rewrite>,
        prefix: Option<Token>,
    ) -> Self {
        Self { tree, rewrite, prefix, precise: false, decimals, registry }
    }

    /// Renders numbers at full precision.
    pub fn precise(mut self) -> Self {
        self.precise = true;
        self
    }

    /// The tree, rendered as LaTeX.
    pub fn render(&self) -> String {
        Renderer::new(self.registry)
            .with_decimals(self.decimals)
            .precise(self.precise)
            .render(&self.tree)
    }

    /// The explanation of the step, or an empty string for the first step.
    pub fn message(&self) -> String {
        self.rewrite.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// The connective to the step before.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_ref().map(|prefix| prefix.text.as_str())
    }
}

impl Display for Step<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.prefix() {
            Some(prefix) => write!(f, "{} {}", prefix, self.render()),
            None => write!(f, "{}", self.render()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages() {
        assert_eq!(
            Rewrite::ReduceFraction { numerator: 6.0, denominator: 8.0 }.to_string(),
            "Simplify by dividing the numbers 6 and 8 by their GCD (Greatest Common Divisor).",
        );
        assert_eq!(
            Rewrite::ConvertConstants(vec!["\\pi".to_string(), "e".to_string()]).to_string(),
            "Convert constants $\\pi$ and $e$ to numbers.",
        );
        assert_eq!(
            Rewrite::ConvertConstants(vec!["\\pi".to_string()]).to_string(),
            "Convert constant $\\pi$ to number.",
        );
        assert_eq!(
            Rewrite::DenominatorOne.to_string(),
            "A denominator of 1 can be ignored in division such that $\\frac{x}{1} = x$.",
        );
        assert_eq!(
            Rewrite::DivideBothSides { factor: "-2".to_string(), flipped: true }.to_string(),
            "Divide both sides by $-2$, which flips the direction of the inequality.",
        );
    }
}
