//! Normalizations that run before the rules and after every rewrite. They change how the tree is
//! shaped, never what it means, and are not recorded as steps.

use eqn_parser::{
    registry::{symbol, Registry},
    token::{Token, TokenKind},
    tree::Node,
};
use replace_with::replace_with_or_abort;

/// Runs every normalization on the tree.
pub fn normalize(root: &mut Node, registry: &Registry) {
    omit_parentheses(root, registry);
    apply_signs(root);
    group_sums(root);
}

fn is_transparent_region(node: &Node, registry: &Registry) -> bool {
    node.is(TokenKind::EncOp)
        && node.children.len() == 1
        && registry.encapsulation(&node.value.text).is_some_and(|open| open.is_transparent())
}

/// Replaces every transparent delimited region below the node with its content. The content
/// remembers the delimiters it was in, so it renders the same way.
pub fn omit_parentheses(node: &mut Node, registry: &Registry) {
    for child in &mut node.children {
        while is_transparent_region(child, registry) {
            let open = child.value.clone();
            let content = child.children.remove(0);
            child.replace_with(content);
            child.enclosure = Some(open);
        }
        omit_parentheses(child, registry);
    }
}

/// Moves negative signs outwards, bottom up:
///
/// - the negations among the factors of a product are removed, and an odd number of them wraps
///   the product in a single negation;
/// - a double negation cancels;
/// - a negated literal becomes a signed literal.
pub fn apply_signs(node: &mut Node) {
    for child in &mut node.children {
        apply_signs(child);
    }

    if node.is_product() {
        let mut negations = 0;
        for factor in &mut node.children {
            if factor.is_negation() {
                factor.collapse_single_child();
                negations += 1;
            }
        }

        if negations % 2 == 1 {
            replace_with_or_abort(node, |mut product| {
                let enclosure = product.enclosure.take();
                let mut negation = Node::negation(product);
                negation.enclosure = enclosure;
                negation
            });
        }
        return;
    }

    if node.is_negation() {
        let Some(child) = node.child() else {
            return;
        };

        if child.is_negation() {
            let mut inner = node.children.remove(0);
            inner.collapse_single_child();
            node.splice(inner);
        } else if let Some(value) = child.as_number() {
            node.value = Token::num(-value);
            node.children.clear();
        }
    }
}

/// Parenthesizes sums that are operands of a product, a negation or a function, so that the tree
/// renders the way it is structured.
pub fn group_sums(node: &mut Node) {
    let groups_operands = node.is_product()
        || node.is_negation()
        || node.is(TokenKind::TrigFun)
        || node.is_symbol(TokenKind::DelOp, symbol::RECIPROCAL);
    for child in &mut node.children {
        if groups_operands && child.is_sum() && child.enclosure.is_none() {
            child.enclosure = Some(Token::new(TokenKind::EncOp, symbol::LEFT_PAREN));
        }
        group_sums(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqn_parser::{parse, tree::Renderer, REGISTRY};
    use pretty_assertions::assert_eq;

    fn normalized(input: &str) -> Node {
        let mut root = parse(input, &REGISTRY).unwrap().root;
        normalize(&mut root, &REGISTRY);
        root
    }

    #[test]
    fn omits_transparent_regions() {
        let root = normalized("\\left(\\left(x\\right)\\right)");
        let child = root.child().unwrap();
        assert_eq!(*child, Node::var("x"));
        assert_eq!(child.enclosure, Some(Token::new(TokenKind::EncOp, "\\left(")));

        let abs = normalized("\\left|x\\right|");
        assert!(abs.child().unwrap().is_symbol(TokenKind::EncOp, "\\left|"));
    }

    #[test]
    fn factors_out_negations() {
        let root = normalized("2\\cdot\\left(-x\\right)");
        assert_eq!(
            *root.child().unwrap(),
            Node::negation(Node::product(vec![Node::num(2.0), Node::var("x")])),
        );

        let even = normalized("\\left(-a\\right)\\cdot\\left(-b\\right)");
        assert_eq!(*even.child().unwrap(), Node::product(vec![Node::var("a"), Node::var("b")]));
        assert_eq!(Renderer::new(&REGISTRY).render(&even), "a\\cdot b");
    }

    #[test]
    fn negated_literal() {
        let root = normalized("-3+x");
        assert_eq!(*root.child().unwrap(), Node::sum(vec![Node::num(-3.0), Node::var("x")]));
        assert_eq!(Renderer::new(&REGISTRY).render(&root), "-3+ x");
    }

    #[test]
    fn double_negation() {
        let root = normalized("-\\left(-x\\right)");
        assert_eq!(*root.child().unwrap(), Node::var("x"));
    }
}
