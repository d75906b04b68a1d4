//! Helpers for the style editor.

const IMPORTANT: &str = " !important";

/// Mark every declaration in `rules` as `!important`.
///
/// Existing ` !important` markers are dropped first so that running this twice
/// does not stack them. A marker goes before every `;`; text after the last
/// `;` is left alone.
///
/// ```
/// use turnstyle_content::editor::append_importants;
///
/// assert_eq!(
///     append_importants("p { color: red; margin: 0 !important; }"),
///     "p { color: red !important; margin: 0 !important; }",
/// );
/// ```
#[must_use]
pub fn append_importants(rules: &str) -> String {
    if rules.is_empty() {
        return String::new();
    }
    rules
        .replace(IMPORTANT, "")
        .split(';')
        .collect::<Vec<_>>()
        .join(&format!("{IMPORTANT};"))
}
