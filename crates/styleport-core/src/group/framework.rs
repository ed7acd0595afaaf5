//! Framework signature detection and the classifier seam.

/// CSS frameworks recognizable by their class-naming signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Bootstrap,
    Tailwind,
    Bulma,
    Foundation,
}

impl Framework {
    /// Stable lowercase name for reports.
    pub fn name(self) -> &'static str {
        match self {
            Framework::Bootstrap => "bootstrap",
            Framework::Tailwind => "tailwind",
            Framework::Bulma => "bulma",
            Framework::Foundation => "foundation",
        }
    }

    /// Scan stylesheet text for framework signatures.
    pub fn detect(css: &str) -> Option<Framework> {
        let lower = css.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["bootstrap", ".btn-", ".card-", ".navbar-"]) {
            Some(Framework::Bootstrap)
        } else if has(&["@tailwind", "tailwind", ".prose-"]) {
            Some(Framework::Tailwind)
        } else if has(&["bulma", ".is-primary", ".has-"]) {
            Some(Framework::Bulma)
        } else if has(&["foundation", ".callout", ".orbit"]) {
            Some(Framework::Foundation)
        } else {
            None
        }
    }

    /// Component prefixes this framework's convention uses, longest first.
    fn component_prefixes(self) -> &'static [&'static str] {
        match self {
            Framework::Bootstrap => &[
                "list-group", "dropdown", "navbar", "modal", "badge", "alert", "input", "table",
                "card", "form", "btn", "nav",
            ],
            // Tailwind is utility-first; there is no component prefix to strip.
            Framework::Tailwind => &[],
            Framework::Bulma => &[
                "notification", "message", "navbar", "button", "card", "tag",
            ],
            Framework::Foundation => &["callout", "button", "orbit"],
        }
    }
}

/// Result of recognizing a framework naming convention on a selector base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Which framework's convention matched.
    pub framework: Framework,
    /// The component part (the convention prefix).
    pub component: String,
    /// The remainder after the prefix, if any — taken as the variant
    /// wholesale, bypassing the generic vocabulary check.
    pub variant: Option<String>,
}

/// Pluggable selector classifier consumed by the grouping stage.
pub trait FrameworkClassifier {
    /// Classify a selector base name under a known convention.
    fn classify(&self, base: &str) -> Option<Classification>;

    /// The framework this classifier represents, for reports.
    fn framework(&self) -> Option<Framework> {
        None
    }
}

/// Null object: no framework convention in play.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

impl FrameworkClassifier for NullClassifier {
    fn classify(&self, _base: &str) -> Option<Classification> {
        None
    }
}

/// Classifier keyed off a detected framework's component prefixes.
#[derive(Debug, Clone, Copy)]
pub struct SignatureClassifier {
    framework: Framework,
}

impl SignatureClassifier {
    pub fn new(framework: Framework) -> Self {
        Self { framework }
    }

    /// Build a classifier by scanning the stylesheet for signatures.
    pub fn for_stylesheet(css: &str) -> Option<Self> {
        Framework::detect(css).map(Self::new)
    }
}

impl FrameworkClassifier for SignatureClassifier {
    fn classify(&self, base: &str) -> Option<Classification> {
        for prefix in self.framework.component_prefixes() {
            let Some(rest) = base.strip_prefix(prefix) else {
                continue;
            };
            if rest.is_empty() {
                return Some(Classification {
                    framework: self.framework,
                    component: prefix.to_string(),
                    variant: None,
                });
            }
            if let Some(variant) = rest.strip_prefix(['-', '_'])
                && !variant.is_empty()
            {
                return Some(Classification {
                    framework: self.framework,
                    component: prefix.to_string(),
                    variant: Some(variant.to_string()),
                });
            }
        }
        None
    }

    fn framework(&self) -> Option<Framework> {
        Some(self.framework)
    }
}
