//! Splits the input into registry tokens.
//!
//! Raw lexing is done by a [`logos`] lexer over [`RawKind`]. The raw lexemes are then classified
//! by looking them up in the [`Registry`], and delimiters are checked for balance per family.

pub mod raw;

use eqn_error::Error;
use logos::Logos;
use std::ops::Range;
use crate::{
    error::{InvalidCharacter, UnclosedDelimiter, UnexpectedClosing, UnrecognizedExpression},
    registry::{Delimiter, Registry},
    token::Token,
};
pub use raw::RawKind;

/// A token and the region of the input it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Range<usize>,
}

/// The output of the tokenizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    pub lexemes: Vec<Lexeme>,

    /// Whether a free variable occurred in the input.
    pub has_variables: bool,
}

/// The opening delimiters that are still open, per [`Delimiter`] family.
#[derive(Debug, Default)]
struct Nesting {
    open: [Vec<Lexeme>; Delimiter::ALL.len()],
}

impl Nesting {
    fn track(&mut self, lexeme: &Lexeme, registry: &Registry) -> Result<(), Error> {
        let Some(encapsulation) = registry.encapsulation(&lexeme.token.text) else {
            return Ok(());
        };

        let open = &mut self.open[encapsulation.delimiter.index()];
        if encapsulation.left {
            open.push(lexeme.clone());
        } else if open.pop().is_none() {
            return Err(Error::new(
                vec![lexeme.span.clone()],
                UnexpectedClosing { symbol: lexeme.token.text.clone() },
            ));
        }
        Ok(())
    }

    fn finish(self, registry: &Registry) -> Result<(), Error> {
        let unclosed = self.open.into_iter()
            .flatten()
            .min_by_key(|lexeme| lexeme.span.start);

        match unclosed {
            Some(lexeme) => {
                let counterpart = registry.encapsulation(&lexeme.token.text)
                    .map_or("", |encapsulation| encapsulation.counterpart);
                Err(Error::new(
                    vec![lexeme.span],
                    UnclosedDelimiter { symbol: lexeme.token.text, counterpart },
                ))
            },
            None => Ok(()),
        }
    }
}

/// Returns the longest prefix of an escape sequence that is a registered symbol.
fn longest_prefix<'a>(text: &'a str, registry: &Registry) -> Option<&'a str> {
    (2..=text.len()).rev()
        .map(|len| &text[..len])
        .find(|prefix| registry.contains(prefix))
}

fn invalid_character(input: &str, span: Range<usize>) -> Error {
    let character = input[span.start..].chars().next().unwrap_or_default();
    Error::new(vec![span], InvalidCharacter { character })
}

/// Tokenizes the input.
pub fn tokenize(input: &str, registry: &Registry) -> Result<Tokens, Error> {
    let mut tokens = Tokens::default();
    let mut nesting = Nesting::default();

    // when an escape sequence is only partly registered, lexing restarts after the registered
    // part; spans of the restarted lexer are relative to `offset`
    let mut offset = 0;
    let mut lexer = RawKind::lexer(input);

    while let Some(kind) = lexer.next() {
        let span = offset + lexer.span().start..offset + lexer.span().end;
        let slice = lexer.slice();
        let Ok(kind) = kind else {
            return Err(invalid_character(input, span));
        };

        let lexeme = match kind {
            RawKind::Whitespace | RawKind::EscapedSpace => continue,
            RawKind::Escape => {
                let Some(symbol) = longest_prefix(slice, registry) else {
                    return Err(Error::new(
                        vec![span],
                        UnrecognizedExpression {
                            text: slice.to_string(),
                            suggestion: registry.suggest(slice),
                        },
                    ));
                };
                let end = span.start + symbol.len();
                let token = registry.token(symbol);
                if end < span.end {
                    offset = end;
                    lexer = RawKind::lexer(&input[offset..]);
                }
                match token {
                    Some(token) => Lexeme { token, span: span.start..end },
                    None => return Err(invalid_character(input, span)),
                }
            },
            RawKind::Number => match slice.parse::<f64>() {
                Ok(value) => Lexeme { token: Token::num(value), span },
                Err(_) => return Err(invalid_character(input, span)),
            },
            RawKind::Letter | RawKind::Symbol => match registry.token(slice) {
                Some(token) => Lexeme { token, span },
                None if kind == RawKind::Letter => {
                    tokens.has_variables = true;
                    Lexeme { token: Token::var(slice), span }
                },
                None => return Err(invalid_character(input, span)),
            },
        };

        nesting.track(&lexeme, registry)?;
        tokens.lexemes.push(lexeme);
    }

    nesting.finish(registry)?;
    Ok(tokens)
}
