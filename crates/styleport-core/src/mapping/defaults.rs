//! Built-in default mapping layer.
//!
//! Covers the common Bootstrap-era palette and the px/rem spacing, radius,
//! and typography scales, mapping literals onto `var(--token)` references.
//! Constructed once at first use and never mutated; user overlays shadow
//! individual entries without touching this layer.

use std::sync::LazyLock;

use super::table::{Category, MappingLayer};

static DEFAULTS: LazyLock<MappingLayer> = LazyLock::new(build);

/// The shared default layer.
pub fn layer() -> &'static MappingLayer {
    &DEFAULTS
}

fn build() -> MappingLayer {
    let mut layer = MappingLayer::new();

    let colors = [
        ("#007bff", "var(--color-primary)"),
        ("#0056b3", "var(--color-primary-hover)"),
        ("#004085", "var(--color-primary-active)"),
        ("#6c757d", "var(--color-text-secondary)"),
        ("#545b62", "var(--color-secondary-hover)"),
        ("#4e555b", "var(--color-secondary-active)"),
        ("#28a745", "var(--color-success)"),
        ("#1e7e34", "var(--color-success-hover)"),
        ("#dc3545", "var(--color-error)"),
        ("#c82333", "var(--color-error-hover)"),
        ("#ffc107", "var(--color-warning)"),
        ("#e0a800", "var(--color-warning-hover)"),
        ("#212529", "var(--color-text-primary)"),
        ("#adb5bd", "var(--color-border-hover)"),
        ("#ffffff", "var(--color-background)"),
        ("#f8f9fa", "var(--color-surface)"),
        ("#e9ecef", "var(--color-surface-hover)"),
        ("#dee2e6", "var(--color-border)"),
        ("white", "var(--color-background)"),
        ("black", "var(--color-text-primary)"),
    ];
    for (from, to) in colors {
        layer.insert(Category::Color, from, to);
    }

    let spacing = [
        ("2px", "var(--spacing-xs)"),
        ("4px", "var(--spacing-xs)"),
        ("8px", "var(--spacing-sm)"),
        ("12px", "var(--spacing-md)"),
        ("16px", "var(--spacing-md)"),
        ("20px", "var(--spacing-lg)"),
        ("24px", "var(--spacing-lg)"),
        ("32px", "var(--spacing-xl)"),
        ("40px", "var(--spacing-xxl)"),
        ("48px", "var(--spacing-xxl)"),
        ("0.125rem", "var(--spacing-xs)"),
        ("0.25rem", "var(--spacing-xs)"),
        ("0.5rem", "var(--spacing-sm)"),
        ("0.75rem", "var(--spacing-md)"),
        ("1rem", "var(--spacing-md)"),
        ("1.25rem", "var(--spacing-lg)"),
        ("1.5rem", "var(--spacing-lg)"),
        ("2rem", "var(--spacing-xl)"),
        ("2.5rem", "var(--spacing-xxl)"),
        ("3rem", "var(--spacing-xxl)"),
    ];
    for (from, to) in spacing {
        layer.insert(Category::Spacing, from, to);
    }

    let radius = [
        ("2px", "var(--border-radius-sm)"),
        ("4px", "var(--border-radius-sm)"),
        ("6px", "var(--border-radius-md)"),
        ("8px", "var(--border-radius-md)"),
        ("12px", "var(--border-radius-lg)"),
        ("16px", "var(--border-radius-lg)"),
        ("9999px", "var(--border-radius-full)"),
        ("0.125rem", "var(--border-radius-sm)"),
        ("0.25rem", "var(--border-radius-sm)"),
        ("0.375rem", "var(--border-radius-md)"),
        ("0.5rem", "var(--border-radius-md)"),
        ("0.75rem", "var(--border-radius-lg)"),
        ("1rem", "var(--border-radius-lg)"),
    ];
    for (from, to) in radius {
        layer.insert(Category::Radius, from, to);
    }

    let font_sizes = [
        ("12px", "var(--font-size-xs)"),
        ("14px", "var(--font-size-sm)"),
        ("16px", "var(--font-size-md)"),
        ("18px", "var(--font-size-lg)"),
        ("20px", "var(--font-size-xl)"),
        ("24px", "var(--font-size-xxl)"),
        ("0.75rem", "var(--font-size-xs)"),
        ("0.875rem", "var(--font-size-sm)"),
        ("1rem", "var(--font-size-md)"),
        ("1.125rem", "var(--font-size-lg)"),
        ("1.25rem", "var(--font-size-xl)"),
        ("1.5rem", "var(--font-size-xxl)"),
    ];
    for (from, to) in font_sizes {
        layer.insert(Category::FontSize, from, to);
    }

    let font_weights = [
        ("300", "var(--font-weight-light)"),
        ("400", "var(--font-weight-normal)"),
        ("500", "var(--font-weight-medium)"),
        ("600", "var(--font-weight-semibold)"),
        ("700", "var(--font-weight-bold)"),
        ("800", "var(--font-weight-extrabold)"),
        ("light", "var(--font-weight-light)"),
        ("normal", "var(--font-weight-normal)"),
        ("medium", "var(--font-weight-medium)"),
        ("semibold", "var(--font-weight-semibold)"),
        ("bold", "var(--font-weight-bold)"),
    ];
    for (from, to) in font_weights {
        layer.insert(Category::FontWeight, from, to);
    }

    let shadows = [
        ("0 1px 3px rgba(0,0,0,0.1)", "var(--shadow-sm)"),
        ("0 4px 6px rgba(0,0,0,0.1)", "var(--shadow-md)"),
        ("0 10px 15px rgba(0,0,0,0.1)", "var(--shadow-lg)"),
        ("0 20px 25px rgba(0,0,0,0.1)", "var(--shadow-xl)"),
    ];
    for (from, to) in shadows {
        layer.insert(Category::Shadow, from, to);
    }

    let transitions = [
        ("0.15s", "var(--transition-fast)"),
        ("0.2s", "var(--transition-fast)"),
        ("0.3s", "var(--transition-normal)"),
        ("0.5s", "var(--transition-slow)"),
        ("150ms", "var(--transition-fast)"),
        ("200ms", "var(--transition-fast)"),
        ("300ms", "var(--transition-normal)"),
        ("500ms", "var(--transition-slow)"),
    ];
    for (from, to) in transitions {
        layer.insert(Category::Transition, from, to);
    }

    let breakpoints = [
        ("576px", "var(--breakpoint-sm)"),
        ("768px", "var(--breakpoint-md)"),
        ("992px", "var(--breakpoint-lg)"),
        ("1200px", "var(--breakpoint-xl)"),
        ("1400px", "var(--breakpoint-xxl)"),
    ];
    for (from, to) in breakpoints {
        layer.insert(Category::Breakpoint, from, to);
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let layer = layer();
        assert!(!layer.is_empty());
        assert_eq!(
            layer.exact(Category::Color, "#007bff"),
            Some("var(--color-primary)")
        );
        assert_eq!(
            layer.exact(Category::Shadow, "0 4px 6px rgba(0,0,0,0.1)"),
            Some("var(--shadow-md)")
        );
    }

    #[test]
    fn spacing_and_radius_scales_disagree_on_purpose() {
        // 4px is extra-small spacing but a small radius; the property-driven
        // category pick keeps them apart.
        let layer = layer();
        assert_eq!(layer.exact(Category::Spacing, "4px"), Some("var(--spacing-xs)"));
        assert_eq!(
            layer.exact(Category::Radius, "4px"),
            Some("var(--border-radius-sm)")
        );
    }
}
