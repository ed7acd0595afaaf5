//! Selector model: base names, pseudo-states, combinator chains.

mod types;

pub use types::{PseudoState, Selector};
