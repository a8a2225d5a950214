//! Tokenizer, symbol registry, expression tree and parser for LaTeX-like equations.
//!
//! The entry point is [`parse`], which turns an input string such as `2+\left(8-9\right)\cdot 4`
//! into a [`Node`] tree hanging from a `root` node:
//!
//! ```
//! use eqn_parser::{parse, registry::REGISTRY, tree::Renderer};
//!
//! let parsed = parse("2x+3=7", &REGISTRY).unwrap();
//! assert!(parsed.has_comparison);
//! assert!(parsed.has_variables);
//! assert_eq!(Renderer::new(&REGISTRY).render(&parsed.root), "2\\cdot x+ 3=7");
//! ```
//!
//! All symbol behavior (arity, evaluation, rendering) comes from the [`Registry`], an immutable
//! table built once and shared by reference.

pub mod error;
pub mod parser;
pub mod registry;
pub mod token;
pub mod tokenizer;
pub mod tree;

pub use parser::{parse, Parsed};
pub use registry::{Registry, REGISTRY};
pub use token::{Token, TokenKind};
pub use tree::Node;
