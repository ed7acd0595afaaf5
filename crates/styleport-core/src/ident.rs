//! Rust identifier derivation from CSS names.

/// Keywords that cannot be used as function or module names.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

/// Convert an arbitrary CSS name into a valid Rust identifier.
///
/// Lowercases, collapses runs of non-alphanumeric characters into a single
/// underscore, escapes a leading digit, and suffixes Rust keywords. The result
/// is never empty.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return "style".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "style_");
    }
    if RUST_KEYWORDS.contains(&out.as_str()) {
        out.push_str("_style");
    }
    out
}

/// Check whether a string already is a valid Rust identifier.
pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !RUST_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_simple_name() {
        assert_eq!(sanitize("button"), "button");
        assert_eq!(sanitize("Button"), "button");
    }

    #[test]
    fn sanitize_collapses_separator_runs() {
        assert_eq!(sanitize("btn--primary"), "btn_primary");
        assert_eq!(sanitize("navbar-brand"), "navbar_brand");
    }

    #[test]
    fn sanitize_strips_sigils_and_edges() {
        assert_eq!(sanitize(".card"), "card");
        assert_eq!(sanitize("#main-"), "main");
    }

    #[test]
    fn sanitize_escapes_leading_digit() {
        assert_eq!(sanitize("3d-card"), "style_3d_card");
    }

    #[test]
    fn sanitize_escapes_keywords() {
        assert_eq!(sanitize("loop"), "loop_style");
        assert_eq!(sanitize("type"), "type_style");
    }

    #[test]
    fn sanitize_at_rule_leftover() {
        // `@media` must never escape into a module name verbatim.
        assert_eq!(sanitize("@media"), "media");
    }

    #[test]
    fn sanitize_never_empty() {
        assert_eq!(sanitize(""), "style");
        assert_eq!(sanitize("---"), "style");
    }

    #[test]
    fn validity_check() {
        assert!(is_valid("button_primary"));
        assert!(!is_valid("3d"));
        assert!(!is_valid("fn"));
        assert!(!is_valid("a-b"));
    }
}
