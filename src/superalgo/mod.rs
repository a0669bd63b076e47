//! Trail-state engine: transition function and rule holder.

mod bits;
mod engine;
mod transition;

pub use bits::isolated_bit_index;
pub use engine::{SuperAlgo, SuperAlgoConfig};
