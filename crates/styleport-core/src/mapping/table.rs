//! Mapping table: categories, layers, and value classification.

use std::collections::HashMap;

use regex::Regex;

use crate::{Error, Result};

/// Value categories consulted during classification.
///
/// The declaration order here is also the fall-through order when the
/// primary category (derived from the property name) yields no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Color,
    Spacing,
    Radius,
    FontSize,
    FontWeight,
    Shadow,
    Transition,
    Breakpoint,
}

impl Category {
    /// All categories, in fall-through order.
    pub const ALL: [Category; 8] = [
        Category::Color,
        Category::Spacing,
        Category::Radius,
        Category::FontSize,
        Category::FontWeight,
        Category::Shadow,
        Category::Transition,
        Category::Breakpoint,
    ];

    /// Stable name, matching the configuration-file keys.
    pub fn name(self) -> &'static str {
        match self {
            Category::Color => "colors",
            Category::Spacing => "spacing",
            Category::Radius => "radius",
            Category::FontSize => "font-size",
            Category::FontWeight => "font-weight",
            Category::Shadow => "shadow",
            Category::Transition => "transition",
            Category::Breakpoint => "breakpoints",
        }
    }

    /// Resolve a configuration-file key to a category.
    pub fn from_config_key(key: &str) -> Option<Category> {
        match key {
            "colors" | "color" => Some(Category::Color),
            "spacing" => Some(Category::Spacing),
            "radius" | "border-radius" => Some(Category::Radius),
            "font-size" | "font-sizes" => Some(Category::FontSize),
            "font-weight" | "font-weights" => Some(Category::FontWeight),
            "shadow" | "shadows" => Some(Category::Shadow),
            "transition" | "transitions" => Some(Category::Transition),
            "breakpoints" | "breakpoint" => Some(Category::Breakpoint),
            _ => None,
        }
    }

    /// The category consulted first for a property name.
    pub fn for_property(property: &str) -> Option<Category> {
        let p = property.to_ascii_lowercase();
        if p.contains("color") || p.contains("background") {
            Some(Category::Color)
        } else if p.contains("padding") || p.contains("margin") || p.contains("gap") {
            Some(Category::Spacing)
        } else if p.contains("border-radius") {
            Some(Category::Radius)
        } else if p.contains("font-size") {
            Some(Category::FontSize)
        } else if p.contains("font-weight") {
            Some(Category::FontWeight)
        } else if p.contains("shadow") {
            Some(Category::Shadow)
        } else if p.contains("transition") {
            Some(Category::Transition)
        } else if matches!(p.as_str(), "width" | "min-width" | "max-width") {
            Some(Category::Breakpoint)
        } else {
            None
        }
    }
}

/// An ordered pattern entry within a layer. Earlier entries win ties.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Regex,
    pub replacement: String,
}

/// One mapping layer: per-category exact entries plus ordered patterns.
#[derive(Debug, Clone, Default)]
pub struct MappingLayer {
    exact: HashMap<Category, HashMap<String, String>>,
    patterns: HashMap<Category, Vec<PatternRule>>,
}

impl MappingLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an exact-value entry.
    pub fn insert(
        &mut self,
        category: Category,
        from: impl Into<String>,
        to: impl Into<String>,
    ) {
        self.exact
            .entry(category)
            .or_default()
            .insert(from.into(), to.into());
    }

    /// Append a pattern entry. Patterns are matched in insertion order.
    pub fn insert_pattern(
        &mut self,
        category: Category,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<()> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("invalid pattern for {}: {e}", category.name())))?;
        self.patterns.entry(category).or_default().push(PatternRule {
            pattern,
            replacement: replacement.into(),
        });
        Ok(())
    }

    /// Exact lookup of a token within one category.
    pub fn exact(&self, category: Category, token: &str) -> Option<&str> {
        self.exact
            .get(&category)?
            .get(token)
            .map(String::as_str)
    }

    /// Pattern lookup of a token within one category, first-defined wins.
    pub fn pattern(&self, category: Category, token: &str) -> Option<String> {
        self.patterns
            .get(&category)?
            .iter()
            .find(|rule| rule.pattern.is_match(token))
            .map(|rule| {
                rule.pattern
                    .replace(token, rule.replacement.as_str())
                    .into_owned()
            })
    }

    /// Total number of exact entries across categories.
    pub fn len(&self) -> usize {
        self.exact.values().map(HashMap::len).sum()
    }

    /// Whether the layer has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.exact.values().all(HashMap::is_empty)
            && self.patterns.values().all(Vec::is_empty)
    }
}

/// The layered mapping table: a user overlay over the built-in defaults.
///
/// The defaults are a process-wide constant built once and never mutated;
/// the user layer strictly overrides them for identical keys.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    user: MappingLayer,
}

impl MappingTable {
    /// Table with the built-in defaults only.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Table with a user overlay on top of the defaults.
    pub fn with_overlay(user: MappingLayer) -> Self {
        Self { user }
    }

    fn defaults() -> &'static MappingLayer {
        super::defaults::layer()
    }

    /// Map one declaration value.
    ///
    /// The trimmed value as a whole is classified first; on a miss,
    /// multi-token shorthands are split on top-level whitespace (function
    /// calls stay atomic) and each token is classified independently, then
    /// rejoined with the original separators. The result is either a table
    /// hit or the input text unchanged.
    pub fn map_value(&self, property: &str, raw: &str) -> String {
        let trimmed = raw.trim();
        let primary = Category::for_property(property);

        if let Some(hit) = self.resolve_token(primary, trimmed) {
            return hit;
        }

        let segments = split_value_segments(trimmed);
        if segments.len() <= 1 {
            return trimmed.to_string();
        }

        let mut out = String::with_capacity(trimmed.len());
        for segment in segments {
            match segment {
                Segment::Separator(s) => out.push_str(s),
                Segment::Token(t) => match self.resolve_token(primary, t) {
                    Some(hit) => out.push_str(&hit),
                    None => out.push_str(t),
                },
            }
        }
        out
    }

    /// Classify a single token.
    ///
    /// The primary category is consulted first, then the remaining categories
    /// in [`Category::ALL`] order. Within a category: exact-user,
    /// exact-default, pattern-user, pattern-default.
    pub fn resolve_token(&self, primary: Option<Category>, token: &str) -> Option<String> {
        let rest = Category::ALL
            .into_iter()
            .filter(|c| Some(*c) != primary);

        for category in primary.into_iter().chain(rest) {
            if let Some(hit) = self.user.exact(category, token) {
                return Some(hit.to_string());
            }
            if let Some(hit) = Self::defaults().exact(category, token) {
                return Some(hit.to_string());
            }
            if let Some(hit) = self.user.pattern(category, token) {
                return Some(hit);
            }
            if let Some(hit) = Self::defaults().pattern(category, token) {
                return Some(hit);
            }
        }
        None
    }

    /// Whether a value would be substituted (used by the coverage report).
    pub fn hits(&self, property: &str, raw: &str) -> bool {
        self.map_value(property, raw) != raw.trim()
    }
}

enum Segment<'a> {
    Token(&'a str),
    Separator(&'a str),
}

/// Split a value on top-level whitespace, keeping separators.
///
/// Parenthesized groups and quoted strings are atomic, so
/// `rgba(0, 0, 0, 0.5)` stays one token.
fn split_value_segments(value: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    let mut in_separator = false;

    for (idx, ch) in value.char_indices() {
        let is_break = quote.is_none() && depth == 0 && ch.is_whitespace();
        if is_break != in_separator {
            if idx > start {
                let text = &value[start..idx];
                segments.push(if in_separator {
                    Segment::Separator(text)
                } else {
                    Segment::Token(text)
                });
            }
            start = idx;
            in_separator = is_break;
        }
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    if value.len() > start {
        let text = &value[start..];
        segments.push(if in_separator {
            Segment::Separator(text)
        } else {
            Segment::Token(text)
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_hex_maps_to_primary() {
        let table = MappingTable::with_defaults();
        assert_eq!(
            table.map_value("background", "#007bff"),
            "var(--color-primary)"
        );
    }

    #[test]
    fn padding_shorthand_maps_each_token() {
        let table = MappingTable::with_defaults();
        assert_eq!(
            table.map_value("padding", "8px 16px"),
            "var(--spacing-sm) var(--spacing-md)"
        );
    }

    #[test]
    fn shorthand_preserves_original_separators() {
        let table = MappingTable::with_defaults();
        assert_eq!(
            table.map_value("margin", "8px  16px"),
            "var(--spacing-sm)  var(--spacing-md)"
        );
    }

    #[test]
    fn unmapped_value_is_identity() {
        let table = MappingTable::with_defaults();
        assert_eq!(table.map_value("color", "rebeccapurple"), "rebeccapurple");
    }

    #[test]
    fn function_values_stay_atomic() {
        let table = MappingTable::with_defaults();
        assert_eq!(
            table.map_value("color", "rgba(0, 0, 0, 0.5)"),
            "rgba(0, 0, 0, 0.5)"
        );
        // Mixed shorthand: the function token is not split apart.
        assert_eq!(
            table.map_value("border", "1px solid rgba(0, 0, 0, 0.5)"),
            "1px solid rgba(0, 0, 0, 0.5)"
        );
    }

    #[test]
    fn transition_shorthand_maps_duration_token() {
        let table = MappingTable::with_defaults();
        assert_eq!(
            table.map_value("transition", "all 0.3s ease"),
            "all var(--transition-normal) ease"
        );
    }

    #[test]
    fn user_layer_overrides_defaults() {
        let mut user = MappingLayer::new();
        user.insert(Category::Color, "#007bff", "var(--brand)");
        let table = MappingTable::with_overlay(user);
        assert_eq!(table.map_value("background", "#007bff"), "var(--brand)");
    }

    #[test]
    fn user_pattern_wins_over_default_exact_only_on_exact_miss() {
        let mut user = MappingLayer::new();
        user.insert_pattern(Category::Color, r"^#0{2}7bff$", "var(--pattern-hit)")
            .unwrap();
        let table = MappingTable::with_overlay(user);
        // Default exact entry still wins: exact layers outrank patterns.
        assert_eq!(
            table.map_value("background", "#007bff"),
            "var(--color-primary)"
        );
    }

    #[test]
    fn pattern_ties_resolve_first_defined() {
        let mut user = MappingLayer::new();
        user.insert_pattern(Category::Spacing, r"^\d+vw$", "var(--first)")
            .unwrap();
        user.insert_pattern(Category::Spacing, r"^10vw$", "var(--second)")
            .unwrap();
        let table = MappingTable::with_overlay(user);
        assert_eq!(table.map_value("padding", "10vw"), "var(--first)");
    }

    #[test]
    fn secondary_category_fall_through() {
        // `border-color` is a Color property, but the token is a known
        // spacing value nowhere in the color table; identity applies rather
        // than a wrong-category hit for hex-like tokens.
        let table = MappingTable::with_defaults();
        assert_eq!(table.map_value("outline-offset", "4px"), "var(--spacing-xs)");
    }

    #[test]
    fn breakpoint_properties_map_widths() {
        let table = MappingTable::with_defaults();
        assert_eq!(table.map_value("max-width", "768px"), "var(--breakpoint-md)");
    }

    #[test]
    fn category_for_property() {
        assert_eq!(Category::for_property("background"), Some(Category::Color));
        assert_eq!(Category::for_property("padding"), Some(Category::Spacing));
        assert_eq!(Category::for_property("row-gap"), Some(Category::Spacing));
        assert_eq!(Category::for_property("border-radius"), Some(Category::Radius));
        assert_eq!(Category::for_property("font-size"), Some(Category::FontSize));
        assert_eq!(Category::for_property("box-shadow"), Some(Category::Shadow));
        assert_eq!(Category::for_property("border-width"), None);
        assert_eq!(Category::for_property("max-width"), Some(Category::Breakpoint));
    }
}
