//! CSS to Rust style-constructor conversion pipeline.
//!
//! This crate turns hand-written stylesheets into `stylist`-style constructor
//! functions, featuring:
//!
//! - **Parsing**: tolerant CSS parsing with media queries, pseudo-selector
//!   rules, keyframes, and per-construct error recovery
//! - **Value mapping**: layered substitution of literal values with theme
//!   token references (`#007bff` → `var(--color-primary)`)
//! - **Grouping**: component/variant partitioning of selectors, with optional
//!   framework-convention classifiers
//! - **Generation**: one constructor per rule group, rendered into a single
//!   unit or a module tree
//!
//! # Example
//!
//! ```
//! use styleport_core::convert::{ConvertOptions, convert};
//! use styleport_core::mapping::MappingTable;
//!
//! let css = ".button { background: #007bff; padding: 8px 16px; }";
//! let conversion = convert(css, &MappingTable::with_defaults(), &ConvertOptions::default())?;
//! assert!(conversion.units[0].source.contains("var(--color-primary)"));
//! # Ok::<(), styleport_core::Error>(())
//! ```

pub mod analyze;
pub mod convert;
pub mod generate;
pub mod group;
pub mod ident;
pub mod mapping;
pub mod model;
pub mod parser;
pub mod selector;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::analyze::{CssReport, analyze, validate};
    pub use crate::convert::{Conversion, ConvertOptions, convert};
    pub use crate::generate::{GenerateOptions, GeneratedUnit, generate};
    pub use crate::group::{
        ComponentGroup, Framework, FrameworkClassifier, GroupedModel, NullClassifier,
        SignatureClassifier, group_rules,
    };
    pub use crate::mapping::{Category, MappingConfig, MappingLayer, MappingTable, apply_mappings};
    pub use crate::model::{Declaration, KeyframesBlock, Rule, RuleModel};
    pub use crate::parser::{ParseOutcome, ParseWarning, parse_css};
    pub use crate::selector::{PseudoState, Selector};
}
