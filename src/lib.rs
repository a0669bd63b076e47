//! Rule compiler and trail-state engine for [R]Super and [R]History rules.

pub mod rules;
pub mod superalgo;

/// A cell state. Odd values are alive, even values dead.
pub type State = u8;

pub use rules::{Family, Neighborhood, Neighbors, Rule, RuleError};
pub use superalgo::{SuperAlgo, SuperAlgoConfig};
