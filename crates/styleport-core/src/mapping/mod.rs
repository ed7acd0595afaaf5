//! Layered value-to-theme-token mapping.

mod config;
mod defaults;
mod table;

pub use config::{MappingConfig, PatternConfig};
pub use table::{Category, MappingLayer, MappingTable, PatternRule};

use crate::model::RuleModel;

/// Run the mapping stage over every declaration in the model.
///
/// Each declaration's value is classified against the table; hits are stored
/// on the declaration, misses leave it falling back to the raw value.
pub fn apply_mappings(model: &mut RuleModel, table: &MappingTable) {
    for decl in model.declarations_mut() {
        let mapped = table.map_value(&decl.property, &decl.value);
        decl.mapped = (mapped != decl.value).then_some(mapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_css;

    #[test]
    fn apply_maps_nested_and_keyframe_declarations() {
        let css = r#"
            .button { background: #007bff; }
            .button:hover { background: #0056b3; }
            @keyframes pulse { from { padding: 8px; } to { padding: 16px; } }
        "#;
        let mut model = parse_css(css).unwrap().model;
        apply_mappings(&mut model, &MappingTable::with_defaults());

        assert_eq!(
            model.rules[0].declarations[0].output_value(),
            "var(--color-primary)"
        );
        assert_eq!(
            model.rules[1].declarations[0].output_value(),
            "var(--color-primary-hover)"
        );
        assert_eq!(
            model.keyframes[0].waypoints[0].declarations[0].output_value(),
            "var(--spacing-sm)"
        );
    }
}
