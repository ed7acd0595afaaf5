//! End-to-end pipeline tests: parse → map → group → generate.

use styleport_core::convert::{Conversion, ConvertOptions, convert};
use styleport_core::group::NullClassifier;
use styleport_core::mapping::{MappingConfig, MappingTable, apply_mappings};
use styleport_core::parser::parse_css;
use styleport_core::{Error, group};

const BUTTON_CSS: &str = r#"
/* Primary button */
.btn {
    display: inline-flex;
    padding: 8px 16px;
    border-radius: 4px;
    font-size: 14px;
    background: #007bff;
    color: #ffffff;
}

.btn:hover {
    background: #0056b3;
    transform: translateY(-2px);
}

.btn-secondary {
    background: #6c757d;
}

@media (max-width: 768px) {
    .btn {
        width: 100%;
        padding: 12px 16px;
    }
}

@keyframes fade-in {
    from { opacity: 0; }
    to { opacity: 1; }
}
"#;

fn run(css: &str, options: ConvertOptions) -> Conversion {
    convert(css, &MappingTable::with_defaults(), &options).unwrap()
}

#[test]
fn full_conversion_with_grouping() {
    let conversion = run(
        BUTTON_CSS,
        ConvertOptions {
            group_components: true,
            ..Default::default()
        },
    );

    assert_eq!(conversion.units.len(), 1);
    let source = &conversion.units[0].source;

    // Base constructor with mapped values and nested hover.
    assert!(source.contains("pub fn btn() -> Style"));
    assert!(source.contains("padding: var(--spacing-sm) var(--spacing-md);"));
    assert!(source.contains("border-radius: var(--border-radius-sm);"));
    assert!(source.contains("font-size: var(--font-size-sm);"));
    assert!(source.contains("background: var(--color-primary);"));
    assert!(source.contains("&:hover {"));
    assert!(source.contains("background: var(--color-primary-hover);"));
    // The unmappable transform stays verbatim.
    assert!(source.contains("transform: translateY(-2px);"));

    // Variant constructor.
    assert!(source.contains("pub fn btn_secondary() -> Style"));

    // Media section inside the base constructor, not a separate one.
    assert!(source.contains("@media (max-width: 768px) {"));

    // Keyframes constructor.
    assert!(source.contains("pub fn animation_fade_in() -> Style"));
    assert!(source.contains("@keyframes fade-in {"));
}

#[test]
fn split_modules_layout() {
    let conversion = run(
        BUTTON_CSS,
        ConvertOptions {
            split_modules: true,
            include_utilities: true,
            ..Default::default()
        },
    );

    let names: Vec<&str> = conversion.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["animations", "btn", "utils", "mod"]);

    let index = conversion.units.last().unwrap();
    assert_eq!(index.file_name(), "mod.rs");
    assert!(index.source.contains("pub mod animations;"));
    assert!(index.source.contains("pub mod btn;"));
    assert!(index.source.contains("pub mod utils;"));
    assert!(index.source.contains("pub use btn::*;"));

    let utils = conversion.units.iter().find(|u| u.name == "utils").unwrap();
    assert!(utils.source.contains("pub fn flex_center() -> Style"));
}

#[test]
fn declaration_order_round_trips_through_model() {
    let css = ".a { margin: 0; color: red; margin-top: 4px; z-index: 9; }";
    let model = parse_css(css).unwrap().model;
    let props: Vec<&str> = model.rules[0]
        .declarations
        .iter()
        .map(|d| d.property.as_str())
        .collect();
    assert_eq!(props, vec!["margin", "color", "margin-top", "z-index"]);
}

#[test]
fn every_mapped_value_is_hit_or_identity() {
    let mut model = parse_css(BUTTON_CSS).unwrap().model;
    let table = MappingTable::with_defaults();
    apply_mappings(&mut model, &table);

    for decl in model.declarations() {
        match &decl.mapped {
            Some(mapped) => {
                assert!(!mapped.is_empty());
                assert_ne!(mapped, &decl.value);
            }
            None => assert_eq!(decl.output_value(), decl.value),
        }
    }
}

#[test]
fn grouping_is_idempotent_end_to_end() {
    let model = parse_css(BUTTON_CSS).unwrap().model;
    let first = group::group_rules(&model, &NullClassifier);
    let again = group::group_rules(&first.flatten(), &NullClassifier);
    assert_eq!(first, again);
}

#[test]
fn generated_identifiers_are_unique() {
    let css = r#"
        .btn--primary { color: red; }
        .btn_primary { color: blue; }
        .btn.primary { color: green; }
    "#;
    let conversion = run(css, ConvertOptions::default());
    let source = &conversion.units[0].source;

    let mut names: Vec<&str> = source
        .lines()
        .filter_map(|l| l.strip_prefix("pub fn "))
        .filter_map(|l| l.split('(').next())
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate constructor names generated");
    assert!(!conversion.generate_warnings.is_empty());
}

#[test]
fn user_overlay_overrides_defaults_end_to_end() {
    let overlay = MappingConfig::from_json(
        r##"{ "colors": { "#007bff": "var(--brand)" } }"##,
    )
    .unwrap()
    .into_layer()
    .unwrap();
    let table = MappingTable::with_overlay(overlay);

    let conversion = convert(
        ".a { background: #007bff; color: #dc3545; }",
        &table,
        &ConvertOptions::default(),
    )
    .unwrap();
    let source = &conversion.units[0].source;
    assert!(source.contains("background: var(--brand);"));
    // Defaults still apply where the overlay is silent.
    assert!(source.contains("color: var(--color-error);"));
}

#[test]
fn unterminated_block_aborts_with_location() {
    let css = ".fine { color: red; }\n\n.broken {\n  color: blue;\n";
    match convert(css, &MappingTable::with_defaults(), &ConvertOptions::default()) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected fatal parse error, got {other:?}"),
    }
}

#[test]
fn warnings_do_not_halt_conversion() {
    let css = r#"
        @font-face { font-family: X; src: url(x.woff); }
        input[type=text] { padding: 4px; }
        .ok { color: red; }
    "#;
    let conversion = run(css, ConvertOptions::default());
    assert_eq!(conversion.units.len(), 1);
    assert!(conversion.units[0].source.contains("pub fn ok() -> Style"));
    assert_eq!(conversion.parse_warnings.len(), 2);
}

#[test]
fn comma_selectors_share_declarations_by_value() {
    let conversion = run("h1, h2 { margin: 0; }", ConvertOptions::default());
    let source = &conversion.units[0].source;
    assert!(source.contains("pub fn h1() -> Style"));
    assert!(source.contains("pub fn h2() -> Style"));
}
