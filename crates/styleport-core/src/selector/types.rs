//! Selector type definitions.

use std::fmt;

use crate::{Error, Result};

/// A parsed compound selector.
///
/// The selector is decomposed into the pieces the grouping stage cares about:
/// a base name used for component/variant classification, an optional
/// pseudo-state that nests under the base rule, and the trailing combinator
/// chain for selectors the component model cannot claim (those fall into the
/// ungrouped bucket).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Original selector text, whitespace-normalized.
    pub raw: String,
    /// Base name of the first compound, without the `.`/`#` sigil.
    pub base: String,
    /// Pseudo-state attached to the first compound, if any.
    pub pseudo: Option<PseudoState>,
    /// Remaining combinator chain parts (`>` / `+` / `~` / descendant),
    /// kept as raw text. Empty for simple selectors.
    pub chain: Vec<String>,
}

impl Selector {
    /// Parse a single comma-free selector string.
    ///
    /// Returns `Err` for constructs the model cannot represent (attribute
    /// selectors, unknown pseudo-classes, bare combinators). Callers treat
    /// this as a recoverable condition: the rule is skipped with a warning.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = normalize_whitespace(input);
        if raw.is_empty() {
            return Err(Error::invalid_selector(input, "empty selector"));
        }
        if raw.contains('[') {
            return Err(Error::invalid_selector(
                &raw,
                "attribute selectors are not supported",
            ));
        }

        let mut parts = split_compounds(&raw);
        let first = parts.remove(0);
        if matches!(first.as_str(), ">" | "+" | "~") {
            return Err(Error::invalid_selector(&raw, "selector starts with a combinator"));
        }

        let (base, pseudo) = parse_compound(&first, &raw)?;
        Ok(Self {
            raw,
            base,
            pseudo,
            chain: parts,
        })
    }

    /// Whether this selector is a single compound with no combinator chain.
    pub fn is_simple(&self) -> bool {
        self.chain.is_empty()
    }

    /// The selector with the pseudo-state removed (the base rule's selector).
    pub fn without_pseudo(&self) -> Self {
        Self {
            raw: match &self.pseudo {
                Some(p) => self
                    .raw
                    .replacen(&p.css_suffix(), "", 1),
                None => self.raw.clone(),
            },
            base: self.base.clone(),
            pseudo: None,
            chain: self.chain.clone(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Split a normalized selector into compounds and combinator tokens.
fn split_compounds(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Decompose one compound into (base name, pseudo-state).
fn parse_compound(compound: &str, raw: &str) -> Result<(String, Option<PseudoState>)> {
    // `:root` is a selector in its own right, not a pseudo-state on a base.
    if compound == ":root" {
        return Ok(("root".to_string(), None));
    }

    let (head, pseudo_text) = match compound.find(':') {
        Some(0) => {
            return Err(Error::invalid_selector(raw, "bare pseudo-class selector"));
        }
        Some(idx) => (&compound[..idx], Some(compound[idx..].to_string())),
        None => (compound, None),
    };

    let base = head.trim_start_matches(['.', '#']).to_string();
    if base.is_empty() {
        return Err(Error::invalid_selector(raw, "missing selector name"));
    }
    if !base
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(Error::invalid_selector(
            raw,
            format!("unsupported characters in selector name '{base}'"),
        ));
    }

    let pseudo = match pseudo_text {
        Some(text) => Some(PseudoState::from_css(&text).ok_or_else(|| {
            Error::invalid_selector(raw, format!("unsupported pseudo-class '{text}'"))
        })?),
        None => None,
    };

    Ok((base, pseudo))
}

/// Collapse whitespace and pad top-level combinators so `.card>.title` and
/// `.card > .title` read the same. Parenthesized expressions (`:nth-child(2n+1)`)
/// are left untouched.
fn normalize_whitespace(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut padded = String::with_capacity(collapsed.len() + 4);
    let mut depth = 0usize;
    for ch in collapsed.chars() {
        match ch {
            '(' => {
                depth += 1;
                padded.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                padded.push(ch);
            }
            '>' | '+' | '~' if depth == 0 => {
                padded.push(' ');
                padded.push(ch);
                padded.push(' ');
            }
            _ => padded.push(ch),
        }
    }
    padded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pseudo-state attached to a selector's base compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoState {
    /// `:hover`
    Hover,
    /// `:active`
    Active,
    /// `:focus`
    Focus,
    /// `:focus-within`
    FocusWithin,
    /// `:disabled`
    Disabled,
    /// `:checked`
    Checked,
    /// `:visited`
    Visited,
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:nth-child(expr)` with the expression kept verbatim.
    NthChild(String),
    /// `::before`
    Before,
    /// `::after`
    After,
    /// `::placeholder`
    Placeholder,
}

impl PseudoState {
    /// Parse from the `:`-prefixed selector suffix (e.g. `:hover`, `::before`).
    pub fn from_css(text: &str) -> Option<Self> {
        let name = text.trim_start_matches(':');
        match name {
            "hover" => Some(Self::Hover),
            "active" => Some(Self::Active),
            "focus" => Some(Self::Focus),
            "focus-within" => Some(Self::FocusWithin),
            "disabled" => Some(Self::Disabled),
            "checked" => Some(Self::Checked),
            "visited" => Some(Self::Visited),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "placeholder" => Some(Self::Placeholder),
            _ => {
                let expr = name
                    .strip_prefix("nth-child(")
                    .and_then(|rest| rest.strip_suffix(')'))?;
                Some(Self::NthChild(expr.trim().to_string()))
            }
        }
    }

    /// Whether this is a pseudo-element (`::` form) rather than a pseudo-class.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Before | Self::After | Self::Placeholder)
    }

    /// The CSS suffix as it appears in a selector (`:hover`, `::before`).
    pub fn css_suffix(&self) -> String {
        let colons = if self.is_element() { "::" } else { ":" };
        format!("{colons}{self}")
    }
}

impl fmt::Display for PseudoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hover => write!(f, "hover"),
            Self::Active => write!(f, "active"),
            Self::Focus => write!(f, "focus"),
            Self::FocusWithin => write!(f, "focus-within"),
            Self::Disabled => write!(f, "disabled"),
            Self::Checked => write!(f, "checked"),
            Self::Visited => write!(f, "visited"),
            Self::FirstChild => write!(f, "first-child"),
            Self::LastChild => write!(f, "last-child"),
            Self::NthChild(expr) => write!(f, "nth-child({expr})"),
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}
