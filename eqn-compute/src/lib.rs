//! Step-by-step simplification, comparison and solving of equations.
//!
//! An [`Equation`] is parsed from a LaTeX-like string, then turned into a list of [`Step`]s that
//! explain how it is simplified, how its comparison is decided, or how its variable is isolated:
//!
//! ```
//! use eqn_compute::{Action, Equation};
//!
//! let equation = Equation::parse("2x+3=7").unwrap();
//! assert_eq!(equation.classify(), Action::Solve);
//!
//! let steps = equation.steps();
//! assert_eq!(steps.last().unwrap().render(), "x=2");
//! for step in &steps[1..] {
//!     println!("{}    {}", step, step.message());
//! }
//! ```
//!
//! The rewriting itself is done in place on [`Node`](eqn_parser::Node) trees by the
//! [`simplify`](mod@simplify) module, and can be used on its own.

pub mod compare;
pub mod config;
pub mod equation;
pub mod simplify;
pub mod solve;
pub mod step;
pub mod step_collector;

pub use config::Config;
pub use equation::{Action, Equation};
pub use step::{Rewrite, Snapshot, Step};
pub use step_collector::StepCollector;

/// Parses an equation with the standard registry.
pub fn parse(input: &str) -> Result<Equation<'static>, eqn_error::Error> {
    Equation::parse(input)
}
