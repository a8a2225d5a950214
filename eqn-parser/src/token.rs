use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::Serialize;

/// The kind of a [`Token`]. Every symbol in the registry maps onto exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TokenKind {
    /// A numeric literal.
    Num,

    /// A free variable, such as `x`.
    Var,

    /// A named constant, such as `\pi`.
    Const,

    /// A foldable operator with two or more operands, `+` or `\cdot`.
    Op,

    /// An operator that stands in for another, such as `-` for `+`.
    DelOp,

    /// One half of a pair of delimiters.
    EncOp,

    /// A construct with a fixed number of brace-delimited operands, such as `\frac`.
    Struct,

    /// A trigonometric function.
    TrigFun,

    /// A comparison between two sides.
    Comparison,

    /// A connective between two statements, used only to narrate derivations.
    Logic,

    /// Text that is displayed verbatim.
    Text,

    /// The top of every tree.
    Root,
}

/// A token of an equation: a kind paired with the text it was read from.
///
/// Two tokens are equal when both their kinds and texts are equal. Numeric tokens built with
/// [`Token::num`] have their text canonicalized, so equal values compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    /// Creates a numeric token for the given value.
    pub fn num(value: f64) -> Self {
        // -0 and 0 must be the same token
        let value = if value == 0.0 { 0.0 } else { value };
        Self::new(TokenKind::Num, value.to_string())
    }

    /// Creates a variable token.
    pub fn var(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Var, name)
    }

    /// Creates a text token.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, text)
    }

    /// Creates the token at the top of every tree.
    pub fn root() -> Self {
        Self::new(TokenKind::Root, "root")
    }

    /// Returns true if the token is of the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true if the token's text is the given symbol.
    pub fn has(&self, symbol: &str) -> bool {
        self.text == symbol
    }

    /// Returns the value of a numeric token.
    pub fn as_number(&self) -> Option<f64> {
        if self.kind == TokenKind::Num {
            self.text.parse().ok()
        } else {
            None
        }
    }

    /// Returns true if this is a numeric token with the given value.
    pub fn is_number(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_canonical() {
        assert_eq!(Token::num(2.0), Token::new(TokenKind::Num, "2"));
        assert_eq!(Token::num(-0.0), Token::num(0.0));
        assert_eq!(Token::num(0.5).text, "0.5");
    }

    #[test]
    fn number_value() {
        assert_eq!(Token::num(-3.25).as_number(), Some(-3.25));
        assert_eq!(Token::var("x").as_number(), None);
        assert!(Token::num(1.0).is_number(1.0));
        assert!(!Token::num(1.0).is_number(2.0));
    }

    #[test]
    fn kind_and_text_are_both_compared() {
        assert_ne!(Token::var("e"), Token::new(TokenKind::Const, "e"));
    }
}
