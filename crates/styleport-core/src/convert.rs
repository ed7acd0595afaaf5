//! One-call conversion facade over the pipeline stages.

use crate::generate::{GenerateOptions, GeneratedUnit, generate};
use crate::group::{FrameworkClassifier, NullClassifier, SignatureClassifier, group_rules, ungroup_rules};
use crate::mapping::{MappingTable, apply_mappings};
use crate::parser::{ParseWarning, parse_css};
use crate::Result;

/// Options bundle supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Partition rules into component groups (otherwise one constructor per
    /// selector).
    pub group_components: bool,
    /// Emit per-variant constructors.
    pub emit_variants: bool,
    /// Append the fixed utility constructors.
    pub include_utilities: bool,
    /// One unit per component plus a module index (implies grouping).
    pub split_modules: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            group_components: false,
            emit_variants: true,
            include_utilities: false,
            split_modules: false,
        }
    }
}

/// The full conversion result handed back to the caller.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub units: Vec<GeneratedUnit>,
    /// Recoverable parse issues.
    pub parse_warnings: Vec<ParseWarning>,
    /// Generation issues (identifier collisions).
    pub generate_warnings: Vec<String>,
    /// Framework recognized in the stylesheet, if any.
    pub detected_framework: Option<&'static str>,
}

/// Run the whole pipeline: parse, map, group, generate.
///
/// Returns `Err` only for a fatal parse error; everything recoverable is
/// reported through the warning lists on [`Conversion`].
pub fn convert(css: &str, table: &MappingTable, options: &ConvertOptions) -> Result<Conversion> {
    let outcome = parse_css(css)?;
    let mut model = outcome.model;
    apply_mappings(&mut model, table);

    let group_components = options.group_components || options.split_modules;
    let classifier = SignatureClassifier::for_stylesheet(css);
    let grouped = if group_components {
        match &classifier {
            Some(c) => group_rules(&model, c),
            None => group_rules(&model, &NullClassifier),
        }
    } else {
        ungroup_rules(&model)
    };

    let generated = generate(
        &grouped,
        &model.keyframes,
        &GenerateOptions {
            split_modules: options.split_modules,
            include_utilities: options.include_utilities,
            emit_variants: options.emit_variants,
        },
    )?;

    Ok(Conversion {
        units: generated.units,
        parse_warnings: outcome.warnings,
        generate_warnings: generated.warnings,
        detected_framework: classifier
            .as_ref()
            .and_then(|c| c.framework())
            .map(|f| f.name()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_off_names_constructors_by_selector() {
        let css = ".button { color: red; } .button:hover { color: blue; }";
        let conversion = convert(css, &MappingTable::with_defaults(), &ConvertOptions::default())
            .unwrap();
        let source = &conversion.units[0].source;
        // Without grouping, the hover rule is its own top-level constructor.
        assert!(source.contains("pub fn button() -> Style"));
        assert!(source.contains("pub fn button_hover() -> Style"));
    }

    #[test]
    fn split_modules_implies_grouping() {
        let css = ".btn { color: red; } .btn-primary { color: blue; }";
        let conversion = convert(
            css,
            &MappingTable::with_defaults(),
            &ConvertOptions {
                split_modules: true,
                ..Default::default()
            },
        )
        .unwrap();
        let names: Vec<&str> = conversion.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["btn", "mod"]);
    }

    #[test]
    fn bootstrap_signature_is_reported() {
        let css = ".btn-primary { color: red; } .navbar-brand { float: left; }";
        let conversion = convert(
            css,
            &MappingTable::with_defaults(),
            &ConvertOptions {
                group_components: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(conversion.detected_framework, Some("bootstrap"));
    }

    #[test]
    fn fatal_parse_error_produces_no_units() {
        let err = convert(
            ".broken {",
            &MappingTable::with_defaults(),
            &ConvertOptions::default(),
        );
        assert!(err.is_err());
    }
}
