//! The text of every registered symbol.

pub const EQUALS: &str = "=";
pub const NOT_EQUAL: &str = "\\ne";
pub const APPROX: &str = "\\approx";
pub const GREATER: &str = ">";
pub const LESS: &str = "<";
pub const GREATER_EQUAL: &str = "\\ge";
pub const LESS_EQUAL: &str = "\\le";
pub const IMPLIES: &str = "\\implies";

pub const SUM: &str = "+";
pub const PRODUCT: &str = "\\cdot";
pub const NEGATION: &str = "-";
pub const RECIPROCAL: &str = "\\div";

pub const LEFT_PAREN: &str = "\\left(";
pub const RIGHT_PAREN: &str = "\\right)";
pub const OPEN_PAREN: &str = "(";
pub const CLOSE_PAREN: &str = ")";
pub const OPEN_BRACE: &str = "{";
pub const CLOSE_BRACE: &str = "}";
pub const LEFT_ABS: &str = "\\left|";
pub const RIGHT_ABS: &str = "\\right|";

pub const PI: &str = "\\pi";
pub const E: &str = "e";

pub const FRACTION: &str = "\\frac";

pub const SIN: &str = "\\sin";
pub const COS: &str = "\\cos";
pub const TAN: &str = "\\tan";
pub const CSC: &str = "\\csc";
pub const SEC: &str = "\\sec";
pub const COT: &str = "\\cot";
pub const ARCSIN: &str = "\\arcsin";
pub const ARCCOS: &str = "\\arccos";
pub const ARCTAN: &str = "\\arctan";
pub const ARCCSC: &str = "\\arccsc";
pub const ARCSEC: &str = "\\arcsec";
pub const ARCCOT: &str = "\\arccot";
