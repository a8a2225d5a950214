//! Error kinds raised while tokenizing and parsing an equation.

use ariadne::Fmt;
use eqn_attrs::ErrorKind;
use eqn_error::{ErrorKind, EXPR};

/// An escape sequence that is not in the registry, and has no registered prefix.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized expression `{}`", text),
    labels = ["this is not a known command"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => "only registered LaTeX commands, such as `\\frac` or `\\sin`, can be used".to_string(),
    },
)]
pub struct UnrecognizedExpression {
    /// The escape sequence that was found.
    pub text: String,

    /// The closest registered escape sequence, if one is close enough.
    pub suggestion: Option<&'static str>,
}

/// A character that does not belong to any token class.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid character `{}`", character),
    labels = ["here"],
)]
pub struct InvalidCharacter {
    pub character: char,
}

/// A closing delimiter was found without an open delimiter of the same family.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected closing `{}`", symbol),
    labels = ["there is no matching opening delimiter before this"],
)]
pub struct UnexpectedClosing {
    pub symbol: String,
}

/// The input ended while a delimiter was still open.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unclosed `{}`", symbol),
    labels = ["this delimiter is never closed"],
    help = format!("add a closing {} somewhere after it", counterpart.fg(EXPR)),
)]
pub struct UnclosedDelimiter {
    /// The opening delimiter.
    pub symbol: String,

    /// The delimiter that would close it.
    pub counterpart: &'static str,
}

/// An opening delimiter whose counterpart could not be found in the same region.
///
/// The tokenizer counts delimiters per family, so this is raised when families interleave, as in
/// `\left(\left|\right)\right|`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not matched by a `{}`", symbol, counterpart),
    labels = ["this delimiter is opened here"],
    help = "delimiters must be closed in the reverse order they were opened",
)]
pub struct UnmatchedDelimiter {
    pub symbol: String,
    pub counterpart: &'static str,
}

/// More than one comparison in the same equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an equation can have at most one comparison",
    labels = ["the first comparison is here", "another comparison is here"],
    help = format!("split the input into separate {}", "equations".fg(EXPR)),
)]
pub struct TooManyComparisons;

/// An operator or function is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand for `{}`", symbol),
    labels = [format!("you might need to add an {} next to this", "expression".fg(EXPR))],
)]
pub struct MissingOperand {
    pub symbol: String,
}

/// A construct was given a different number of operands than it takes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} operands, but {} were given", symbol, expected, found),
    labels = ["this construct"],
    help = format!("each operand goes in its own pair of {}", "braces".fg(EXPR)),
)]
pub struct ArityMismatch {
    pub symbol: String,
    pub expected: usize,
    pub found: usize,
}

/// A pair of delimiters with nothing in between.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("nothing inside `{}`", symbol),
    labels = [format!("add an {} inside these delimiters", "expression".fg(EXPR))],
)]
pub struct EmptyEncapsulation {
    pub symbol: String,
}

/// The input, or one of its regions, contains no expression at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [format!("expected an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// Parsing left more than one expression side by side.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "the operator connecting these expressions may be missing",
)]
pub struct UnexpectedExpression;
