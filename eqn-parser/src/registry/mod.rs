//! The table of every symbol the engine understands.
//!
//! Each symbol maps onto an [`Expression`] descriptor that says how the symbol is parsed,
//! evaluated and rendered. The table is built once by [`Registry::standard`] and shared through
//! the [`REGISTRY`] static; everything else borrows it.

pub mod symbol;
pub mod trig;

use crate::{error::ArityMismatch, token::{Token, TokenKind}, tree::Node};
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The standard registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::standard);

/// Whether an [`Operator`] adds or multiplies its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Sum,
    Product,
}

/// A foldable operator with two or more operands.
#[derive(Debug, Clone)]
pub struct Operator {
    pub kind: OperatorKind,

    /// Folds two literal operands into one.
    pub fold: fn(f64, f64) -> f64,

    /// The name of the operation, as used in step messages.
    pub verbose: &'static str,
}

impl Operator {
    /// Folds two literal operands into one.
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        (self.fold)(a, b)
    }

    /// The operand that leaves the other unchanged.
    pub fn identity(&self) -> f64 {
        match self.kind {
            OperatorKind::Sum => 0.0,
            OperatorKind::Product => 1.0,
        }
    }
}

/// What a [`DelegateOperator`] does to its single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateKind {
    Negation,
    Reciprocal,
}

/// A unary stand-in for an operator, such as `-` (adding a negation) or `\div` (multiplying by a
/// reciprocal).
#[derive(Debug, Clone)]
pub struct DelegateOperator {
    pub kind: DelegateKind,

    /// The operator this one delegates to.
    pub delegate: &'static str,
}

/// The family a pair of delimiters belongs to. Nesting is counted per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Parenthesis,
    Brace,
    Absolute,
}

impl Delimiter {
    /// All delimiter families.
    pub const ALL: [Delimiter; 3] = [Delimiter::Parenthesis, Delimiter::Brace, Delimiter::Absolute];

    /// The index of the family in [`Delimiter::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One half of a pair of delimiters.
#[derive(Debug, Clone)]
pub struct EncapsulationOperator {
    /// The other half of the pair.
    pub counterpart: &'static str,

    /// Whether this is the opening half.
    pub left: bool,

    pub delimiter: Delimiter,
}

impl EncapsulationOperator {
    /// Returns true if the pair only groups its content, and can be omitted once the content is
    /// a single node. Absolute value bars are not transparent.
    pub fn is_transparent(&self) -> bool {
        self.delimiter != Delimiter::Absolute
    }
}

/// A comparison between two sides of an equation.
#[derive(Debug, Clone)]
pub struct ComparisonOperator {
    pub predicate: fn(f64, f64) -> bool,

    /// The comparison that holds after the two sides are swapped, or both are negated.
    pub mirrored: &'static str,
}

impl ComparisonOperator {
    /// Evaluates the comparison.
    pub fn execute(&self, left: f64, right: f64) -> bool {
        (self.predicate)(left, right)
    }
}

/// A connective between two statements.
#[derive(Debug, Clone)]
pub struct LogicOperator;

/// A pseudo-function with a fixed number of brace-delimited operands.
#[derive(Debug, Clone)]
pub struct Construct {
    pub inputs: usize,

    /// The name of the construct, as used in step messages.
    pub verbose: &'static str,

    evaluate: fn(&[Node]) -> Option<Node>,
}

impl Construct {
    /// Evaluates the construct with the given operands. Returns [`None`] if the construct cannot
    /// be evaluated with these operands, such as a fraction with a symbolic denominator.
    pub fn evaluate(&self, symbol: &str, operands: &[Node]) -> Result<Option<Node>, ArityMismatch> {
        if operands.len() != self.inputs {
            return Err(ArityMismatch {
                symbol: symbol.to_string(),
                expected: self.inputs,
                found: operands.len(),
            });
        }
        Ok((self.evaluate)(operands))
    }
}

/// A trigonometric function or its inverse.
#[derive(Debug, Clone)]
pub struct TrigonometricFunction {
    /// The name of the function, as used in step messages.
    pub name: &'static str,

    /// Evaluates the function, returning [`None`] when the result is not a finite number.
    pub eval: fn(f64) -> Option<Node>,

    pub inverse: bool,

    /// The symbol of the inverse function.
    pub inverse_symbol: &'static str,
}

/// A named real constant.
#[derive(Debug, Clone)]
pub struct Constant {
    pub value: f64,
}

/// The descriptor of a registered symbol.
#[derive(Debug, Clone)]
pub enum Expression {
    Operator(Operator),
    DelegateOperator(DelegateOperator),
    EncapsulationOperator(EncapsulationOperator),
    ComparisonOperator(ComparisonOperator),
    LogicOperator(LogicOperator),
    Construct(Construct),
    TrigonometricFunction(TrigonometricFunction),
    Constant(Constant),
}

impl Expression {
    /// The kind of token the symbol is read as.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Operator(_) => TokenKind::Op,
            Self::DelegateOperator(_) => TokenKind::DelOp,
            Self::EncapsulationOperator(_) => TokenKind::EncOp,
            Self::ComparisonOperator(_) => TokenKind::Comparison,
            Self::LogicOperator(_) => TokenKind::Logic,
            Self::Construct(_) => TokenKind::Struct,
            Self::TrigonometricFunction(_) => TokenKind::TrigFun,
            Self::Constant(_) => TokenKind::Const,
        }
    }
}

/// Maps symbols onto their descriptors.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    expressions: HashMap<&'static str, Expression>,
}

fn comparison(predicate: fn(f64, f64) -> bool, mirrored: &'static str) -> Expression {
    Expression::ComparisonOperator(ComparisonOperator { predicate, mirrored })
}

fn encapsulation(counterpart: &'static str, left: bool, delimiter: Delimiter) -> Expression {
    Expression::EncapsulationOperator(EncapsulationOperator { counterpart, left, delimiter })
}

fn function(
    name: &'static str,
    eval: fn(f64) -> Option<Node>,
    inverse: bool,
    inverse_symbol: &'static str,
) -> Expression {
    Expression::TrigonometricFunction(TrigonometricFunction { name, eval, inverse, inverse_symbol })
}

/// Relative tolerance of `=` and `\ne`.
const EQUALITY_EPSILON: f64 = 1e-10;

fn approximately_equal(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= EQUALITY_EPSILON * a.abs().max(b.abs()).max(1.0)
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry of every symbol the engine supports.
    pub fn standard() -> Self {
        use symbol::*;

        let mut registry = Self::new();

        registry.register(EQUALS, comparison(approximately_equal, EQUALS));
        registry.register(NOT_EQUAL, comparison(|a, b| !approximately_equal(a, b), NOT_EQUAL));
        // `\approx` compares values as they are displayed; the engine rounds both sides first
        registry.register(APPROX, comparison(approximately_equal, APPROX));
        registry.register(GREATER, comparison(|a, b| a > b, LESS));
        registry.register(LESS, comparison(|a, b| a < b, GREATER));
        registry.register(GREATER_EQUAL, comparison(|a, b| a >= b, LESS_EQUAL));
        registry.register(LESS_EQUAL, comparison(|a, b| a <= b, GREATER_EQUAL));
        registry.register(IMPLIES, Expression::LogicOperator(LogicOperator));

        registry.register(SUM, Expression::Operator(Operator {
            kind: OperatorKind::Sum,
            fold: |a, b| a + b,
            verbose: "addition",
        }));
        registry.register(PRODUCT, Expression::Operator(Operator {
            kind: OperatorKind::Product,
            fold: |a, b| a * b,
            verbose: "multiplication",
        }));
        registry.register(NEGATION, Expression::DelegateOperator(DelegateOperator {
            kind: DelegateKind::Negation,
            delegate: SUM,
        }));
        registry.register(RECIPROCAL, Expression::DelegateOperator(DelegateOperator {
            kind: DelegateKind::Reciprocal,
            delegate: PRODUCT,
        }));

        registry.register(LEFT_PAREN, encapsulation(RIGHT_PAREN, true, Delimiter::Parenthesis));
        registry.register(RIGHT_PAREN, encapsulation(LEFT_PAREN, false, Delimiter::Parenthesis));
        registry.register(OPEN_PAREN, encapsulation(CLOSE_PAREN, true, Delimiter::Parenthesis));
        registry.register(CLOSE_PAREN, encapsulation(OPEN_PAREN, false, Delimiter::Parenthesis));
        registry.register(OPEN_BRACE, encapsulation(CLOSE_BRACE, true, Delimiter::Brace));
        registry.register(CLOSE_BRACE, encapsulation(OPEN_BRACE, false, Delimiter::Brace));
        registry.register(LEFT_ABS, encapsulation(RIGHT_ABS, true, Delimiter::Absolute));
        registry.register(RIGHT_ABS, encapsulation(LEFT_ABS, false, Delimiter::Absolute));

        registry.register(PI, Expression::Constant(Constant { value: std::f64::consts::PI }));
        registry.register(E, Expression::Constant(Constant { value: std::f64::consts::E }));

        registry.register(FRACTION, Expression::Construct(Construct {
            inputs: 2,
            verbose: "fraction",
            evaluate: |operands| {
                let numerator = operands[0].as_number()?;
                let denominator = operands[1].as_number()?;
                (denominator != 0.0).then(|| Node::num(numerator / denominator))
            },
        }));

        registry.register(SIN, function("sine", trig::eval_sin, false, ARCSIN));
        registry.register(COS, function("cosine", trig::eval_cos, false, ARCCOS));
        registry.register(TAN, function("tangent", trig::eval_tan, false, ARCTAN));
        registry.register(CSC, function("cosecant", trig::eval_csc, false, ARCCSC));
        registry.register(SEC, function("secant", trig::eval_sec, false, ARCSEC));
        registry.register(COT, function("cotangent", trig::eval_cot, false, ARCCOT));
        registry.register(ARCSIN, function("arcsine", trig::eval_arcsin, true, SIN));
        registry.register(ARCCOS, function("arccosine", trig::eval_arccos, true, COS));
        registry.register(ARCTAN, function("arctangent", trig::eval_arctan, true, TAN));
        registry.register(ARCCSC, function("arccosecant", trig::eval_arccsc, true, CSC));
        registry.register(ARCSEC, function("arcsecant", trig::eval_arcsec, true, SEC));
        registry.register(ARCCOT, function("arccotangent", trig::eval_arccot, true, COT));

        registry
    }

    /// Registers a symbol, replacing any previous descriptor for it.
    pub fn register(&mut self, symbol: &'static str, expression: Expression) {
        self.expressions.insert(symbol, expression);
    }

    /// Returns the descriptor of the symbol.
    pub fn get(&self, symbol: &str) -> Option<&Expression> {
        self.expressions.get(symbol)
    }

    /// Returns true if the symbol is registered.
    pub fn contains(&self, symbol: &str) -> bool {
        self.expressions.contains_key(symbol)
    }

    /// Creates a token for a registered symbol.
    pub fn token(&self, symbol: &str) -> Option<Token> {
        self.get(symbol).map(|expression| Token::new(expression.kind(), symbol))
    }

    pub fn operator(&self, symbol: &str) -> Option<&Operator> {
        match self.get(symbol)? {
            Expression::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn delegate(&self, symbol: &str) -> Option<&DelegateOperator> {
        match self.get(symbol)? {
            Expression::DelegateOperator(delegate) => Some(delegate),
            _ => None,
        }
    }

    pub fn encapsulation(&self, symbol: &str) -> Option<&EncapsulationOperator> {
        match self.get(symbol)? {
            Expression::EncapsulationOperator(encapsulation) => Some(encapsulation),
            _ => None,
        }
    }

    pub fn comparison(&self, symbol: &str) -> Option<&ComparisonOperator> {
        match self.get(symbol)? {
            Expression::ComparisonOperator(comparison) => Some(comparison),
            _ => None,
        }
    }

    pub fn construct(&self, symbol: &str) -> Option<&Construct> {
        match self.get(symbol)? {
            Expression::Construct(construct) => Some(construct),
            _ => None,
        }
    }

    pub fn function(&self, symbol: &str) -> Option<&TrigonometricFunction> {
        match self.get(symbol)? {
            Expression::TrigonometricFunction(function) => Some(function),
            _ => None,
        }
    }

    pub fn constant(&self, symbol: &str) -> Option<&Constant> {
        match self.get(symbol)? {
            Expression::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    /// Returns the registered escape sequence closest to the given one, if any is within a small
    /// edit distance.
    pub fn suggest(&self, text: &str) -> Option<&'static str> {
        let max_distance = (text.len() / 3).max(1);
        self.expressions.keys()
            .filter(|symbol| symbol.starts_with('\\'))
            .map(|symbol| (levenshtein(symbol, text), *symbol))
            .filter(|(distance, _)| *distance <= max_distance)
            .min()
            .map(|(_, symbol)| symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds() {
        let registry = Registry::standard();
        assert_eq!(registry.token("\\cdot"), Some(Token::new(TokenKind::Op, "\\cdot")));
        assert_eq!(registry.token("-"), Some(Token::new(TokenKind::DelOp, "-")));
        assert_eq!(registry.token("\\left|"), Some(Token::new(TokenKind::EncOp, "\\left|")));
        assert_eq!(registry.token("e"), Some(Token::new(TokenKind::Const, "e")));
        assert_eq!(registry.token("\\frac"), Some(Token::new(TokenKind::Struct, "\\frac")));
        assert_eq!(registry.token("\\arccot"), Some(Token::new(TokenKind::TrigFun, "\\arccot")));
        assert_eq!(registry.token("\\implies"), Some(Token::new(TokenKind::Logic, "\\implies")));
        assert_eq!(registry.token("x"), None);
    }

    #[test]
    fn counterparts() {
        let registry = Registry::standard();
        let open = registry.encapsulation("\\left(").unwrap();
        assert!(open.left);
        assert_eq!(open.counterpart, "\\right)");
        assert!(open.is_transparent());
        assert!(!registry.encapsulation("\\right|").unwrap().is_transparent());
    }

    #[test]
    fn comparisons() {
        let registry = Registry::standard();
        assert!(registry.comparison("=").unwrap().execute(0.1 + 0.2, 0.3));
        assert!(registry.comparison("\\ne").unwrap().execute(2.0, 3.0));
        assert!(registry.comparison("\\ge").unwrap().execute(2.0, 2.0));
        assert!(!registry.comparison(">").unwrap().execute(2.0, 2.0));
        assert_eq!(registry.comparison("<").unwrap().mirrored, ">");
    }

    #[test]
    fn fraction_arity() {
        let registry = Registry::standard();
        let frac = registry.construct("\\frac").unwrap();
        assert_eq!(
            frac.evaluate("\\frac", &[Node::num(1.0)]),
            Err(ArityMismatch { symbol: "\\frac".to_string(), expected: 2, found: 1 }),
        );
        assert_eq!(frac.evaluate("\\frac", &[Node::num(3.0), Node::num(4.0)]), Ok(Some(Node::num(0.75))));
        assert_eq!(frac.evaluate("\\frac", &[Node::num(3.0), Node::num(0.0)]), Ok(None));
        assert_eq!(frac.evaluate("\\frac", &[Node::num(3.0), Node::var("x")]), Ok(None));
    }

    #[test]
    fn suggestions() {
        let registry = Registry::standard();
        assert_eq!(registry.suggest("\\sinn"), Some("\\sin"));
        assert_eq!(registry.suggest("\\fracc"), Some("\\frac"));
        assert_eq!(registry.suggest("\\qquadratic"), None);
    }
}
