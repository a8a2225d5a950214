use std::fmt::{self, Display, Formatter};
use crate::{registry::Registry, token::{Token, TokenKind}};
use super::Node;

/// The number of decimal places numbers are rounded to by default.
pub const DEFAULT_DECIMALS: usize = 2;

/// Renders trees back into LaTeX.
///
/// The output of a parsed tree can be tokenized and parsed again into an equal tree.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    registry: &'r Registry,
    decimals: usize,
    precise: bool,
}

impl<'r> Renderer<'r> {
    /// Creates a renderer that rounds numbers to [`DEFAULT_DECIMALS`] places.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry, decimals: DEFAULT_DECIMALS, precise: false }
    }

    /// Sets the number of decimal places numbers are rounded to.
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Renders numbers at full precision instead of rounding them.
    pub fn precise(mut self, precise: bool) -> Self {
        self.precise = precise;
        self
    }

    /// Renders the tree.
    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write(node, &mut out);
        out
    }

    /// Wraps the tree in a type that renders it through [`Display`].
    pub fn display<'a>(&'a self, node: &'a Node) -> Rendered<'a, 'r> {
        Rendered { renderer: self, node }
    }

    /// Formats a number the way this renderer would.
    pub fn number(&self, value: f64) -> String {
        if self.precise {
            if value.is_infinite() {
                return infinity(value);
            }
            Token::num(value).text
        } else {
            format_number(value, self.decimals)
        }
    }

    fn counterpart(&self, open: &Token) -> &'static str {
        self.registry.encapsulation(&open.text).map_or("", |encapsulation| encapsulation.counterpart)
    }

    fn write(&self, node: &Node, out: &mut String) {
        if node.is(TokenKind::Root) {
            if let Some(child) = node.child() {
                self.write(child, out);
            }
            return;
        }

        let close = node.enclosure.as_ref().map(|open| {
            out.push_str(&open.text);
            self.counterpart(open)
        });

        let symbol = node.value.text.as_str();
        match node.value.kind {
            TokenKind::Num => match node.as_number() {
                Some(value) => out.push_str(&self.number(value)),
                None => out.push_str(symbol),
            },
            TokenKind::Var | TokenKind::Const => out.push_str(symbol),
            TokenKind::Text => {
                out.push_str("\\text{");
                out.push_str(symbol);
                out.push('}');
            },
            TokenKind::Op => self.write_operator(node, out),
            TokenKind::DelOp => {
                let operand = node.child().map(|child| self.render(child)).unwrap_or_default();
                push_joined(out, symbol, &operand);
            },
            TokenKind::TrigFun => {
                // a literal argument is one the function is undefined at
                let operand = node.child()
                    .map(|child| match child.as_number() {
                        Some(_) => Renderer { precise: true, ..*self }.render(child),
                        None => self.render(child),
                    })
                    .unwrap_or_default();
                push_joined(out, symbol, &operand);
            },
            TokenKind::EncOp => {
                out.push_str(symbol);
                if let Some(child) = node.child() {
                    self.write(child, out);
                }
                out.push_str(self.counterpart(&node.value));
            },
            TokenKind::Struct => {
                out.push_str(symbol);
                for child in &node.children {
                    if child.is_braced() {
                        self.write(child, out);
                    } else {
                        out.push('{');
                        self.write(child, out);
                        out.push('}');
                    }
                }
            },
            TokenKind::Comparison => {
                if let [left, right] = node.children.as_slice() {
                    self.write(left, out);
                    push_joined(out, symbol, &self.render(right));
                }
            },
            TokenKind::Logic => {
                if let [left, right] = node.children.as_slice() {
                    self.write(left, out);
                    out.push(' ');
                    out.push_str(symbol);
                    out.push(' ');
                    self.write(right, out);
                }
            },
            TokenKind::Root => {},
        }

        if let Some(close) = close {
            out.push_str(close);
        }
    }

    fn write_operator(&self, node: &Node, out: &mut String) {
        let symbol = node.value.text.as_str();
        let is_sum = node.is_sum();
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                // a sum of a negative term reads as a subtraction
                let signed = child.enclosure.is_none()
                    && (child.is_negation() || child.as_number().is_some_and(|value| value < 0.0));
                if !(is_sum && signed) {
                    out.push_str(symbol);
                    out.push(' ');
                }
            }
            self.write(child, out);
        }
    }
}

/// A tree paired with the renderer that displays it.
pub struct Rendered<'a, 'r> {
    renderer: &'a Renderer<'r>,
    node: &'a Node,
}

impl Display for Rendered<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.renderer.render(self.node))
    }
}

/// Appends a symbol followed by its operand, separating them with a space when the symbol is an
/// alphabetic escape and the operand starts with a letter.
fn push_joined(out: &mut String, symbol: &str, operand: &str) {
    out.push_str(symbol);
    let alphabetic_escape = symbol.starts_with('\\') && symbol.ends_with(|c: char| c.is_ascii_alphabetic());
    if alphabetic_escape && operand.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.push(' ');
    }
    out.push_str(operand);
}

fn infinity(value: f64) -> String {
    let text = if value > 0.0 { "\\infty" } else { "-\\infty" };
    text.to_string()
}

/// Rounds a number to the given number of decimal places, trimming trailing zeros.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        return infinity(value);
    }

    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.truncate(text.trim_end_matches('0').trim_end_matches('.').len());
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REGISTRY;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers() {
        assert_eq!(format_number(2.0, 2), "2");
        assert_eq!(format_number(1.155727349, 2), "1.16");
        assert_eq!(format_number(0.5, 2), "0.5");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(f64::INFINITY, 2), "\\infty");
        assert_eq!(format_number(12.0, 0), "12");
    }

    #[test]
    fn precise_numbers() {
        let renderer = Renderer::new(&REGISTRY).precise(true);
        assert_eq!(renderer.number(1.1557273497909217), "1.1557273497909217");
        assert_eq!(renderer.number(-0.0), "0");
    }

    #[test]
    fn sum_of_negations() {
        let tree = Node::sum(vec![Node::num(8.0), Node::negation(Node::num(9.0)), Node::num(-2.0)]);
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "8-9-2");
    }

    #[test]
    fn escapes_are_separated_from_letters() {
        let tree = Node::with_children(
            Token::new(TokenKind::TrigFun, "\\sin"),
            vec![Node::var("x")],
        );
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "\\sin x");

        let tree = Node::product(vec![Node::num(2.0), Node::constant("\\pi")]);
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "2\\cdot \\pi");
    }

    #[test]
    fn literal_function_argument_is_precise() {
        let tree = Node::with_children(
            Token::new(TokenKind::TrigFun, "\\tan"),
            vec![Node::num(std::f64::consts::FRAC_PI_2)],
        );
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "\\tan1.5707963267948966");

        let tree = Node::product(vec![Node::num(2.0), Node::num(std::f64::consts::FRAC_PI_2)]);
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "2\\cdot 1.57");
    }

    #[test]
    fn fractions_and_text() {
        let tree = Node::fraction(Node::num(3.0), Node::num(4.0));
        assert_eq!(Renderer::new(&REGISTRY).render(&tree), "\\frac{3}{4}");

        let text = Node::text("False").braced();
        assert_eq!(format!("{}", Renderer::new(&REGISTRY).display(&text)), "{\\text{False}}");
    }
}
