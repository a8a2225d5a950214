#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings of the rewrite engine and of how steps are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// The most rewrite cycles run before the engine gives up on reaching a fixpoint. Solving
    /// uses the same bound for the number of isolation steps.
    pub max_cycles: usize,

    /// The number of decimal places numbers are displayed with.
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cycles: 1000,
            decimals: eqn_parser::tree::fmt::DEFAULT_DECIMALS,
        }
    }
}
