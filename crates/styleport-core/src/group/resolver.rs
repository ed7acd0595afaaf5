//! Partitioning rules into component groups.

use std::collections::BTreeMap;

use crate::group::FrameworkClassifier;
use crate::ident;
use crate::model::{Rule, RuleModel};
use crate::selector::Selector;

/// Variant suffixes recognized without a framework classifier.
///
/// An unrecognized suffix stays part of the component name; this list is what
/// keeps `.navbar-brand` one component instead of a false `navbar`/`brand`
/// split.
pub const VARIANT_VOCABULARY: &[&str] = &[
    "primary", "secondary", "success", "danger", "warning", "info", "light", "dark", "outline",
    "solid", "ghost", "link", "small", "sm", "large", "lg", "xl", "xs", "disabled", "active",
];

/// One component's rules: an optional base rule plus named variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentGroup {
    /// Identifier-safe component name.
    pub name: String,
    /// The rule with no variant suffix, if the stylesheet had one.
    pub base: Option<Rule>,
    /// Variant name → merged rule, sorted by name.
    pub variants: BTreeMap<String, Rule>,
}

impl ComponentGroup {
    /// Number of rules in the group (base + variants).
    pub fn rule_count(&self) -> usize {
        usize::from(self.base.is_some()) + self.variants.len()
    }
}

/// The grouping result: sorted components plus the ungrouped leftovers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedModel {
    /// Component groups, sorted by name.
    pub components: Vec<ComponentGroup>,
    /// Rules with no representable component (combinator chains and the
    /// like), rendered top-level and un-namespaced.
    pub ungrouped: Vec<Rule>,
}

impl GroupedModel {
    /// Whether nothing was grouped at all.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.ungrouped.is_empty()
    }

    /// Flatten back into a rule model (nested rules become top-level again).
    pub fn flatten(&self) -> RuleModel {
        let mut model = RuleModel::default();
        let mut push_slot = |rule: &Rule| {
            if !rule.declarations.is_empty() {
                let mut flat = rule.clone();
                flat.nested = vec![];
                model.rules.push(flat);
            }
            for nested in &rule.nested {
                let mut flat = nested.clone();
                flat.nested = vec![];
                model.rules.push(flat);
            }
        };
        for group in &self.components {
            if let Some(base) = &group.base {
                push_slot(base);
            }
            for rule in group.variants.values() {
                push_slot(rule);
            }
        }
        for rule in &self.ungrouped {
            push_slot(rule);
        }
        model
    }
}

/// Partition a rule model into component groups.
///
/// Pure function of the model and the classifier: input rule order only
/// matters for cascade merges between rules with an identical selector.
/// Pseudo-state and media-scoped rules nest under the base/variant rule that
/// shares their base name.
pub fn group_rules(model: &RuleModel, classifier: &dyn FrameworkClassifier) -> GroupedModel {
    let mut builders: BTreeMap<String, GroupBuilder> = BTreeMap::new();
    let mut ungrouped: Vec<Rule> = Vec::new();

    for rule in &model.rules {
        let selector = &rule.selector;
        if !selector.is_simple() {
            attach(&mut ungrouped, rule);
            continue;
        }

        let (component, variant) = match classifier.classify(&selector.base) {
            Some(c) => (c.component, c.variant),
            None => split_variant(&selector.base),
        };
        let component = ident::sanitize(&component);
        let variant = variant.map(|v| ident::sanitize(&v));

        let builder = builders.entry(component).or_default();
        let slot = match variant {
            None => builder.base.get_or_insert_with(|| empty_slot(selector)),
            Some(name) => builder
                .variants
                .entry(name)
                .or_insert_with(|| empty_slot(selector)),
        };

        if selector.pseudo.is_none() && rule.media_query.is_none() {
            slot.merge_declarations(rule.declarations.clone());
        } else {
            attach(&mut slot.nested, rule);
        }
    }

    let components = builders
        .into_iter()
        .map(|(name, b)| ComponentGroup {
            name,
            base: b.base,
            variants: b.variants,
        })
        .collect();

    GroupedModel {
        components,
        ungrouped,
    }
}

/// Skip component partitioning entirely: every rule lands in the ungrouped
/// bucket, merged only by identical selector and media scope. Used when the
/// caller turns component grouping off.
pub fn ungroup_rules(model: &RuleModel) -> GroupedModel {
    let mut ungrouped = Vec::new();
    for rule in &model.rules {
        attach(&mut ungrouped, rule);
    }
    GroupedModel {
        components: vec![],
        ungrouped,
    }
}

#[derive(Default)]
struct GroupBuilder {
    base: Option<Rule>,
    variants: BTreeMap<String, Rule>,
}

/// A slot rule with no declarations yet, keyed by the pseudo-free selector.
fn empty_slot(selector: &Selector) -> Rule {
    Rule::new(selector.without_pseudo(), vec![])
}

/// Merge a rule into a list, cascading onto an existing entry with the same
/// selector and media scope.
fn attach(rules: &mut Vec<Rule>, incoming: &Rule) {
    if let Some(existing) = rules.iter_mut().find(|r| {
        r.selector.raw == incoming.selector.raw && r.media_query == incoming.media_query
    }) {
        existing.merge_declarations(incoming.declarations.clone());
    } else {
        let mut rule = incoming.clone();
        rule.nested = vec![];
        rules.push(rule);
    }
}

/// Generic first-separator split, accepted only for known variant names.
fn split_variant(base: &str) -> (String, Option<String>) {
    if let Some(idx) = base.find(['-', '_']) {
        let head = &base[..idx];
        let tail = &base[idx + 1..];
        if !head.is_empty() && VARIANT_VOCABULARY.contains(&tail.to_ascii_lowercase().as_str()) {
            return (head.to_string(), Some(tail.to_string()));
        }
    }
    (base.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::NullClassifier;
    use crate::parser::parse_css;
    use crate::selector::PseudoState;

    fn grouped(css: &str) -> GroupedModel {
        let model = parse_css(css).unwrap().model;
        group_rules(&model, &NullClassifier)
    }

    #[test]
    fn known_variant_suffix_splits() {
        let g = grouped(".btn-primary { color: red; }");
        assert_eq!(g.components.len(), 1);
        let group = &g.components[0];
        assert_eq!(group.name, "btn");
        assert!(group.base.is_none());
        assert!(group.variants.contains_key("primary"));
    }

    #[test]
    fn unknown_suffix_stays_one_component() {
        let g = grouped(".navbar-brand { float: left; }");
        assert_eq!(g.components.len(), 1);
        let group = &g.components[0];
        assert_eq!(group.name, "navbar_brand");
        assert!(group.base.is_some());
        assert!(group.variants.is_empty());
    }

    #[test]
    fn pseudo_rule_nests_under_base() {
        let g = grouped(".button { color: red; } .button:hover { color: blue; }");
        let group = &g.components[0];
        let base = group.base.as_ref().unwrap();
        assert_eq!(base.declarations.len(), 1);
        assert_eq!(base.nested.len(), 1);
        assert_eq!(base.nested[0].selector.pseudo, Some(PseudoState::Hover));
    }

    #[test]
    fn pseudo_rule_without_base_creates_empty_slot() {
        let g = grouped(".button:hover { color: blue; }");
        let group = &g.components[0];
        let base = group.base.as_ref().unwrap();
        assert!(base.declarations.is_empty());
        assert_eq!(base.nested.len(), 1);
    }

    #[test]
    fn media_rule_nests_under_owner() {
        let css = ".button { color: red; } @media (max-width: 768px) { .button { width: 100%; } }";
        let g = grouped(css);
        let base = g.components[0].base.as_ref().unwrap();
        assert_eq!(base.nested.len(), 1);
        assert_eq!(
            base.nested[0].media_query.as_deref(),
            Some("(max-width: 768px)")
        );
    }

    #[test]
    fn duplicate_selectors_cascade_merge() {
        let css = ".card { color: red; padding: 4px; } .card { color: blue; }";
        let g = grouped(css);
        let base = g.components[0].base.as_ref().unwrap();
        assert_eq!(base.declarations.len(), 2);
        assert_eq!(base.declarations[0].value, "blue");
    }

    #[test]
    fn combinator_chain_goes_ungrouped() {
        let g = grouped(".card > .title { margin: 0; } .card { padding: 8px; }");
        assert_eq!(g.components.len(), 1);
        assert_eq!(g.ungrouped.len(), 1);
        assert_eq!(g.ungrouped[0].selector.raw, ".card > .title");
    }

    #[test]
    fn components_sorted_by_name() {
        let g = grouped(".zeta { a: b; } .alpha { c: d; } .mid { e: f; }");
        let names: Vec<&str> = g.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let css = r#"
            .btn { padding: 8px; }
            .btn-primary { color: white; }
            .btn-primary:hover { color: gray; }
            .navbar-brand { float: left; }
            .card > .title { margin: 0; }
        "#;
        let first = grouped(css);
        let again = group_rules(&first.flatten(), &NullClassifier);
        assert_eq!(first, again);
    }

    #[test]
    fn grouping_is_order_independent() {
        let forward = grouped(".btn { a: b; } .btn-primary { c: d; } .card { e: f; }");
        let backward = grouped(".card { e: f; } .btn-primary { c: d; } .btn { a: b; }");
        assert_eq!(forward, backward);
    }

    #[test]
    fn classifier_overrides_generic_split() {
        use crate::group::{Framework, SignatureClassifier};
        let model = parse_css(".btn-outline-primary { color: red; }").unwrap().model;
        let g = group_rules(&model, &SignatureClassifier::new(Framework::Bootstrap));
        let group = &g.components[0];
        assert_eq!(group.name, "btn");
        assert!(group.variants.contains_key("outline_primary"));
    }
}
