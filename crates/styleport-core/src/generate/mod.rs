//! Rendering grouped rules into Rust source units.

mod generator;
mod utilities;

pub use generator::{Generated, GenerateOptions, GeneratedUnit, generate};
