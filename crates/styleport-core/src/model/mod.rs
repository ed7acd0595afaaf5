//! Structured rule model produced by the parser.

mod rule;
mod stylesheet;

pub use rule::{Declaration, Rule};
pub use stylesheet::{KeyframesBlock, RuleModel, Waypoint};
