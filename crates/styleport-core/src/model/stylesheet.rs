//! Top-level rule model for a parsed stylesheet.

use crate::model::{Declaration, Rule};

/// The structured model of one stylesheet.
///
/// Media-query blocks are flattened during parsing: each inner rule carries
/// its enclosing query in `Rule::media_query`. Keyframes keep their own shape
/// since their bodies are waypoints, not selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleModel {
    /// Top-level rules in source order.
    pub rules: Vec<Rule>,
    /// `@keyframes` blocks in source order.
    pub keyframes: Vec<KeyframesBlock>,
    /// `@import` targets, collected verbatim.
    pub imports: Vec<String>,
}

impl RuleModel {
    /// Number of top-level rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the model contains no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.keyframes.is_empty()
    }

    /// Iterate over every declaration in the model, nested rules and
    /// keyframe waypoints included.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        fn rule_decls(rule: &Rule) -> Box<dyn Iterator<Item = &Declaration> + '_> {
            Box::new(
                rule.declarations
                    .iter()
                    .chain(rule.nested.iter().flat_map(rule_decls)),
            )
        }

        self.rules.iter().flat_map(rule_decls).chain(
            self.keyframes
                .iter()
                .flat_map(|k| k.waypoints.iter())
                .flat_map(|w| w.declarations.iter()),
        )
    }

    /// Mutable variant of [`RuleModel::declarations`].
    pub fn declarations_mut(&mut self) -> impl Iterator<Item = &mut Declaration> {
        fn rule_decls(rule: &mut Rule) -> Box<dyn Iterator<Item = &mut Declaration> + '_> {
            Box::new(
                rule.declarations
                    .iter_mut()
                    .chain(rule.nested.iter_mut().flat_map(rule_decls)),
            )
        }

        self.rules
            .iter_mut()
            .flat_map(rule_decls)
            .chain(
                self.keyframes
                    .iter_mut()
                    .flat_map(|k| k.waypoints.iter_mut())
                    .flat_map(|w| w.declarations.iter_mut()),
            )
    }
}

/// An `@keyframes` block: a name plus percentage waypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesBlock {
    pub name: String,
    pub waypoints: Vec<Waypoint>,
}

/// One waypoint inside a keyframes block (`0%`, `50%`, `from`, `to`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    /// The stop text as written (`0%`, `from`, `0%, 100%`).
    pub stop: String,
    pub declarations: Vec<Declaration>,
}
