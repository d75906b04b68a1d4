//! Tests for the style editor helpers.

use pretty_assertions::assert_eq;
use turnstyle_content::editor::append_importants;

#[test]
fn test_append_importants_marks_every_declaration() {
    assert_eq!(
        append_importants("a { color: red; top: 0; }"),
        "a { color: red !important; top: 0 !important; }"
    );
}

#[test]
fn test_append_importants_does_not_stack() {
    let once = append_importants("p { margin: 0; }");
    assert_eq!(append_importants(&once), once);
}

#[test]
fn test_append_importants_leaves_text_without_semicolons() {
    assert_eq!(append_importants("p { margin: 0 }"), "p { margin: 0 }");
    assert_eq!(append_importants(""), "");
}
