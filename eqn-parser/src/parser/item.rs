use std::ops::Range;
use crate::{token::{Token, TokenKind}, tree::Node, tokenizer::Lexeme};

/// An element of the stream the parser rewrites: either a token that has not been consumed yet,
/// or a subtree that has already been built. Both remember the region of the input they cover.
#[derive(Debug, Clone)]
pub enum Item {
    Token(Token, Range<usize>),
    Node(Node, Range<usize>),
}

impl From<Lexeme> for Item {
    fn from(lexeme: Lexeme) -> Self {
        Item::Token(lexeme.token, lexeme.span)
    }
}

impl Item {
    /// Creates an operator token that was not written in the input, but implied at the given
    /// position.
    pub fn implied(kind: TokenKind, symbol: &str, at: usize) -> Self {
        Item::Token(Token::new(kind, symbol), at..at)
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            Item::Token(_, span) | Item::Node(_, span) => span.clone(),
        }
    }

    /// The token, if the item has not been consumed yet.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Item::Token(token, _) => Some(token),
            Item::Node(..) => None,
        }
    }

    /// Returns true if the item is an unconsumed token of the given kind.
    pub fn is_token(&self, kind: TokenKind) -> bool {
        self.token().is_some_and(|token| token.is(kind))
    }

    /// Returns true if the item is an unconsumed token of the given kind and text.
    pub fn is_symbol(&self, kind: TokenKind, symbol: &str) -> bool {
        self.token().is_some_and(|token| token.is(kind) && token.has(symbol))
    }

    /// Returns true if the item is a value that operators can consume.
    pub fn is_operand(&self) -> bool {
        match self {
            Item::Node(..) => true,
            Item::Token(token, _) => matches!(
                token.kind,
                TokenKind::Num | TokenKind::Var | TokenKind::Const | TokenKind::Text
            ),
        }
    }

    /// Returns true if the item is a single-token operand.
    pub fn is_atom(&self) -> bool {
        self.token().is_some_and(|token| matches!(token.kind, TokenKind::Num | TokenKind::Const | TokenKind::Var))
    }

    /// Returns true if the item is an operator token, after which a `+` is redundant.
    pub fn is_operator(&self) -> bool {
        self.token().is_some_and(|token| matches!(
            token.kind,
            TokenKind::Op | TokenKind::DelOp | TokenKind::Comparison | TokenKind::Logic
        ))
    }

    /// Turns the item into a node. Tokens become leaves.
    pub fn into_node(self) -> Node {
        match self {
            Item::Token(token, _) => Node::new(token),
            Item::Node(node, _) => node,
        }
    }
}

/// Finds the first unconsumed token matching the predicate.
pub fn find_first(stream: &[Item], predicate: impl Fn(&Token) -> bool) -> Option<(usize, Token, Range<usize>)> {
    stream.iter()
        .enumerate()
        .find_map(|(i, item)| match item {
            Item::Token(token, span) if predicate(token) => Some((i, token.clone(), span.clone())),
            _ => None,
        })
}

/// Finds the last unconsumed token matching the predicate.
pub fn find_last(stream: &[Item], predicate: impl Fn(&Token) -> bool) -> Option<(usize, Token, Range<usize>)> {
    stream.iter()
        .enumerate()
        .rev()
        .find_map(|(i, item)| match item {
            Item::Token(token, span) if predicate(token) => Some((i, token.clone(), span.clone())),
            _ => None,
        })
}
