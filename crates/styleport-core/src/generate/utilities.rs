//! Fixed library of framework-agnostic helper constructors.

/// Utility constructors appended when `include_utilities` is requested.
/// Independent of the input stylesheet.
pub(crate) const UTILITIES: &[(&str, &[&str])] = &[
    (
        "flex_center",
        &[
            "display: flex;",
            "align-items: center;",
            "justify-content: center;",
        ],
    ),
    ("flex_column", &["display: flex;", "flex-direction: column;"]),
    ("flex_row", &["display: flex;", "flex-direction: row;"]),
    (
        "absolute_center",
        &[
            "position: absolute;",
            "top: 50%;",
            "left: 50%;",
            "transform: translate(-50%, -50%);",
        ],
    ),
    ("full_width", &["width: 100%;"]),
    ("full_height", &["height: 100%;"]),
    ("hidden", &["display: none;"]),
    ("visible", &["display: block;"]),
];
