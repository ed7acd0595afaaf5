//! Code generation for grouped rules.
//!
//! Rendering is split into a sequential planning phase (identifier
//! allocation, collision handling) and a per-unit render phase. Plans only
//! borrow the grouped model, so unit rendering fans out across a rayon pool
//! with no shared mutable state; the final unit order is deterministic.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::group::{ComponentGroup, GroupedModel};
use crate::ident;
use crate::model::{Declaration, KeyframesBlock, Rule};
use crate::{Error, Result};

use super::utilities::UTILITIES;

/// Generator options.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// One unit per component plus a module index, instead of one aggregate
    /// unit.
    pub split_modules: bool,
    /// Append the fixed utility constructors.
    pub include_utilities: bool,
    /// Emit one constructor per variant in addition to the base constructor.
    pub emit_variants: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            split_modules: false,
            include_utilities: false,
            emit_variants: true,
        }
    }
}

/// One generated source unit: a logical module name plus its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Logical module name (`button`, `mod` for the index).
    pub name: String,
    /// Rendered Rust source.
    pub source: String,
}

impl GeneratedUnit {
    /// File name for this unit when written to a directory.
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name)
    }
}

/// Generation output: units in deterministic order, plus warnings
/// (identifier collisions).
#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub units: Vec<GeneratedUnit>,
    pub warnings: Vec<String>,
}

/// Render grouped rules (and keyframes) into source units.
///
/// Constructor and module identifiers are unique within one call: a name
/// collision after normalization is disambiguated with a numeric suffix and
/// reported as a warning, never silently overwritten.
pub fn generate(
    grouped: &GroupedModel,
    keyframes: &[KeyframesBlock],
    options: &GenerateOptions,
) -> Result<Generated> {
    for group in &grouped.components {
        if group.rule_count() == 0 {
            debug_assert!(false, "component group '{}' has no rules", group.name);
            return Err(Error::generation(format!(
                "component group '{}' has no rules",
                group.name
            )));
        }
    }

    let mut warnings = Vec::new();
    let mut fn_names = IdentAllocator::default();

    // Plan component constructors in sorted group order.
    let mut component_plans: Vec<UnitPlan<'_>> = Vec::new();
    for group in &grouped.components {
        let functions = plan_component(group, options, &mut fn_names, &mut warnings);
        if functions.is_empty() {
            continue;
        }
        component_plans.push(UnitPlan {
            module: group.name.clone(),
            title: format!("{} component styles.", title_case(&group.name)),
            functions,
        });
    }

    let ungrouped: Vec<FunctionPlan<'_>> = grouped
        .ungrouped
        .iter()
        .map(|rule| {
            let name = fn_names.claim(&ident::sanitize(&rule.selector.raw), &mut warnings);
            FunctionPlan {
                doc: format!("Styles for `{}`.", rule.selector.raw),
                name,
                body: Body::Rule(rule),
            }
        })
        .collect();

    let animations: Vec<FunctionPlan<'_>> = keyframes
        .iter()
        .map(|kf| {
            let desired = format!("animation_{}", ident::sanitize(&kf.name));
            let name = fn_names.claim(&desired, &mut warnings);
            FunctionPlan {
                doc: format!("`@keyframes {}` animation.", kf.name),
                name,
                body: Body::Keyframes(kf),
            }
        })
        .collect();

    let utilities: Vec<FunctionPlan<'_>> = if options.include_utilities {
        UTILITIES
            .iter()
            .map(|&(name, lines)| {
                let name = fn_names.claim(name, &mut warnings);
                FunctionPlan {
                    doc: format!("{} utility.", title_case(&name)),
                    name,
                    body: Body::Utility(lines),
                }
            })
            .collect()
    } else {
        vec![]
    };

    let units = if options.split_modules {
        render_split(component_plans, ungrouped, animations, utilities, &mut warnings)
    } else {
        render_aggregate(component_plans, ungrouped, animations, utilities)
    };

    Ok(Generated { units, warnings })
}

fn plan_component<'a>(
    group: &'a ComponentGroup,
    options: &GenerateOptions,
    fn_names: &mut IdentAllocator,
    warnings: &mut Vec<String>,
) -> Vec<FunctionPlan<'a>> {
    let mut functions = Vec::new();

    if let Some(base) = &group.base {
        let name = fn_names.claim(&group.name, warnings);
        functions.push(FunctionPlan {
            doc: format!("{} styles.", title_case(&group.name)),
            name,
            body: Body::Rule(base),
        });
    }

    if options.emit_variants {
        for (variant, rule) in &group.variants {
            let desired = format!("{}_{}", group.name, variant);
            let name = fn_names.claim(&desired, warnings);
            functions.push(FunctionPlan {
                doc: format!(
                    "{} {} variant styles.",
                    title_case(&group.name),
                    variant.replace('_', " ")
                ),
                name,
                body: Body::Rule(rule),
            });
        }
    }

    functions
}

fn render_split(
    component_plans: Vec<UnitPlan<'_>>,
    ungrouped: Vec<FunctionPlan<'_>>,
    animations: Vec<FunctionPlan<'_>>,
    utilities: Vec<FunctionPlan<'_>>,
    warnings: &mut Vec<String>,
) -> Vec<GeneratedUnit> {
    let mut modules = IdentAllocator::default();
    let mut plans = component_plans;
    for plan in &mut plans {
        plan.module = modules.claim(&plan.module, warnings);
    }
    if !animations.is_empty() {
        plans.push(UnitPlan {
            module: modules.claim("animations", warnings),
            title: "Keyframe animation styles.".to_string(),
            functions: animations,
        });
    }
    if !utilities.is_empty() {
        plans.push(UnitPlan {
            module: modules.claim("utils", warnings),
            title: "Utility styles.".to_string(),
            functions: utilities,
        });
    }
    plans.sort_by(|a, b| a.module.cmp(&b.module));

    // Units are independent read-only renders; fan out per plan.
    let mut units: Vec<GeneratedUnit> = plans.par_iter().map(render_unit).collect();
    units.push(render_index(&plans, &ungrouped));
    units
}

fn render_aggregate(
    component_plans: Vec<UnitPlan<'_>>,
    ungrouped: Vec<FunctionPlan<'_>>,
    animations: Vec<FunctionPlan<'_>>,
    utilities: Vec<FunctionPlan<'_>>,
) -> Vec<GeneratedUnit> {
    let functions: Vec<FunctionPlan<'_>> = component_plans
        .into_iter()
        .flat_map(|p| p.functions)
        .chain(ungrouped)
        .chain(animations)
        .chain(utilities)
        .collect();
    if functions.is_empty() {
        return vec![];
    }

    let plan = UnitPlan {
        module: "styles".to_string(),
        title: "Generated styles.".to_string(),
        functions,
    };
    vec![render_unit(&plan)]
}

/// Render the `mod.rs` index: module declarations and re-exports in
/// alphabetical order, plus any ungrouped top-level constructors.
fn render_index(plans: &[UnitPlan<'_>], ungrouped: &[FunctionPlan<'_>]) -> GeneratedUnit {
    let mut source = String::from("//! Generated style modules.\n\n");

    for plan in plans {
        source.push_str(&format!("pub mod {};\n", plan.module));
    }
    source.push('\n');
    for plan in plans {
        source.push_str(&format!("pub use {}::*;\n", plan.module));
    }

    if !ungrouped.is_empty() {
        source.push_str("\nuse stylist::Style;\n\n");
        for (i, function) in ungrouped.iter().enumerate() {
            if i > 0 {
                source.push('\n');
            }
            source.push_str(&render_function(function));
        }
    }

    GeneratedUnit {
        name: "mod".to_string(),
        source,
    }
}

struct UnitPlan<'a> {
    module: String,
    title: String,
    functions: Vec<FunctionPlan<'a>>,
}

struct FunctionPlan<'a> {
    name: String,
    doc: String,
    body: Body<'a>,
}

enum Body<'a> {
    Rule(&'a Rule),
    Keyframes(&'a KeyframesBlock),
    Utility(&'static [&'static str]),
}

fn render_unit(plan: &UnitPlan<'_>) -> GeneratedUnit {
    let mut source = format!("//! {}\n\nuse stylist::Style;\n\n", plan.title);
    for (i, function) in plan.functions.iter().enumerate() {
        if i > 0 {
            source.push('\n');
        }
        source.push_str(&render_function(function));
    }
    GeneratedUnit {
        name: plan.module.clone(),
        source,
    }
}

fn render_function(plan: &FunctionPlan<'_>) -> String {
    let lines = match &plan.body {
        Body::Rule(rule) => rule_css_lines(rule),
        Body::Keyframes(kf) => keyframes_css_lines(kf),
        Body::Utility(lines) => lines.iter().map(|l| l.to_string()).collect(),
    };

    let mut css = String::new();
    for line in &lines {
        if line.is_empty() {
            css.push('\n');
        } else {
            css.push_str("        ");
            css.push_str(line);
            css.push('\n');
        }
    }

    let hashes = "#".repeat(raw_string_hashes(&css));
    format!(
        "/// {doc}\npub fn {name}() -> Style {{\n    Style::new(\n        r{h}\"\n{css}        \"{h},\n    )\n    .expect(\"{name} style should be valid\")\n}}\n",
        doc = plan.doc,
        name = plan.name,
        h = hashes,
        css = css,
    )
}

/// CSS lines for one slot rule: declarations, then pseudo blocks, then media
/// sections (in first-appearance order of the query).
fn rule_css_lines(rule: &Rule) -> Vec<String> {
    let mut lines: Vec<String> = rule.declarations.iter().map(decl_line).collect();

    for nested in rule.nested.iter().filter(|n| n.media_query.is_none()) {
        let Some(pseudo) = &nested.selector.pseudo else {
            continue;
        };
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("&{} {{", pseudo.css_suffix()));
        for decl in &nested.declarations {
            lines.push(format!("    {}", decl_line(decl)));
        }
        lines.push("}".to_string());
    }

    let mut queries: Vec<&str> = Vec::new();
    for nested in &rule.nested {
        if let Some(query) = nested.media_query.as_deref()
            && !queries.contains(&query)
        {
            queries.push(query);
        }
    }
    for query in queries {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("@media {query} {{"));
        for nested in rule
            .nested
            .iter()
            .filter(|n| n.media_query.as_deref() == Some(query))
        {
            match &nested.selector.pseudo {
                Some(pseudo) => {
                    lines.push(format!("    &{} {{", pseudo.css_suffix()));
                    for decl in &nested.declarations {
                        lines.push(format!("        {}", decl_line(decl)));
                    }
                    lines.push("    }".to_string());
                }
                None => {
                    for decl in &nested.declarations {
                        lines.push(format!("    {}", decl_line(decl)));
                    }
                }
            }
        }
        lines.push("}".to_string());
    }

    lines
}

fn keyframes_css_lines(kf: &KeyframesBlock) -> Vec<String> {
    let mut lines = vec![format!("@keyframes {} {{", kf.name)];
    for waypoint in &kf.waypoints {
        lines.push(format!("    {} {{", waypoint.stop));
        for decl in &waypoint.declarations {
            lines.push(format!("        {}", decl_line(decl)));
        }
        lines.push("    }".to_string());
    }
    lines.push("}".to_string());
    lines
}

fn decl_line(decl: &Declaration) -> String {
    let bang = if decl.important { " !important" } else { "" };
    format!("{}: {}{};", decl.property, decl.output_value(), bang)
}

/// Pick how many `#`s the raw-string delimiter needs so the CSS text can
/// never terminate it early.
fn raw_string_hashes(text: &str) -> usize {
    let mut n = 1;
    while text.contains(&format!("\"{}", "#".repeat(n))) {
        n += 1;
    }
    n
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic identifier allocation with collision suffixing.
#[derive(Default)]
struct IdentAllocator {
    seen: HashSet<String>,
}

impl IdentAllocator {
    fn claim(&mut self, desired: &str, warnings: &mut Vec<String>) -> String {
        if self.seen.insert(desired.to_string()) {
            return desired.to_string();
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{desired}_{n}");
            if self.seen.insert(candidate.clone()) {
                tracing::warn!("identifier collision: '{}' renamed to '{}'", desired, candidate);
                warnings.push(format!(
                    "identifier collision: '{desired}' renamed to '{candidate}'"
                ));
                return candidate;
            }
            n += 1;
        }
    }
}
