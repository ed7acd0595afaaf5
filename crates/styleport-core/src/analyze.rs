//! Read-only analysis and compatibility validation of a rule model.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::group::{FrameworkClassifier, group_rules};
use crate::mapping::{Category, MappingTable};
use crate::model::RuleModel;

/// Statistics derived from a rule model, for the `analyze` surface.
#[derive(Debug, Clone, Serialize)]
pub struct CssReport {
    pub rules: usize,
    pub keyframes: usize,
    pub media_rules: usize,
    pub pseudo_rules: usize,
    pub unique_selectors: usize,
    pub declarations: usize,
    pub unique_properties: usize,
    /// Framework recognized by the classifier, if any.
    pub detected_framework: Option<String>,
    /// Component name → number of rules it claims.
    pub components: BTreeMap<String, usize>,
    /// Per-category mapping coverage.
    pub coverage: Vec<CategoryCoverage>,
    pub mapped_values: usize,
    pub total_values: usize,
}

impl CssReport {
    /// Overall mapping coverage in percent.
    pub fn coverage_percent(&self) -> f64 {
        percent(self.mapped_values, self.total_values)
    }
}

/// Mapping coverage within one value category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCoverage {
    pub category: &'static str,
    pub total: usize,
    pub mapped: usize,
}

impl CategoryCoverage {
    pub fn percent(&self) -> f64 {
        percent(self.mapped, self.total)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Compute statistics for a parsed model against a mapping table.
pub fn analyze(
    model: &RuleModel,
    table: &MappingTable,
    classifier: &dyn FrameworkClassifier,
) -> CssReport {
    let mut selectors = BTreeSet::new();
    let mut properties = BTreeSet::new();
    let mut media_rules = 0;
    let mut pseudo_rules = 0;

    for rule in &model.rules {
        selectors.insert(rule.selector.raw.clone());
        if rule.media_query.is_some() {
            media_rules += 1;
        }
        if rule.selector.pseudo.is_some() {
            pseudo_rules += 1;
        }
    }

    let mut per_category: BTreeMap<&'static str, (usize, usize)> = BTreeMap::new();
    let mut mapped_values = 0;
    let mut total_values = 0;
    for decl in model.declarations() {
        properties.insert(decl.property.clone());
        let category = Category::for_property(&decl.property)
            .map(Category::name)
            .unwrap_or("other");
        let entry = per_category.entry(category).or_default();
        entry.0 += 1;
        total_values += 1;
        if table.hits(&decl.property, &decl.value) {
            entry.1 += 1;
            mapped_values += 1;
        }
    }

    let grouped = group_rules(model, classifier);
    let mut components: BTreeMap<String, usize> = grouped
        .components
        .iter()
        .map(|g| (g.name.clone(), g.rule_count()))
        .collect();
    if !grouped.ungrouped.is_empty() {
        components.insert("(ungrouped)".to_string(), grouped.ungrouped.len());
    }

    CssReport {
        rules: model.rules.len(),
        keyframes: model.keyframes.len(),
        media_rules,
        pseudo_rules,
        unique_selectors: selectors.len(),
        declarations: total_values,
        unique_properties: properties.len(),
        detected_framework: classifier.framework().map(|f| f.name().to_string()),
        components,
        coverage: per_category
            .into_iter()
            .map(|(category, (total, mapped))| CategoryCoverage {
                category,
                total,
                mapped,
            })
            .collect(),
        mapped_values,
        total_values,
    }
}

/// Scan a model for constructs that convert poorly.
pub fn validate(model: &RuleModel) -> Vec<String> {
    let mut warnings = Vec::new();

    for rule in &model.rules {
        if rule.declarations.is_empty() {
            warnings.push(format!("empty rule: '{}'", rule.selector.raw));
        }
        if !rule.selector.is_simple() {
            warnings.push(format!(
                "complex selector may not convert well: '{}'",
                rule.selector.raw
            ));
        }
        for decl in &rule.declarations {
            if decl.value.contains("calc(") {
                warnings.push(format!(
                    "calc() in '{}' / {} is passed through unmapped",
                    rule.selector.raw, decl.property
                ));
            }
            if decl.value.contains("var(") && !decl.value.contains("var(--") {
                warnings.push(format!(
                    "non-standard var() reference in '{}' / {}",
                    rule.selector.raw, decl.property
                ));
            }
        }
    }
    for import in &model.imports {
        warnings.push(format!("@import {import} must be ported separately"));
    }

    warnings
}
