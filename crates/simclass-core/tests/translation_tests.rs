use std::collections::HashMap;

use simclass_core::{parse_with_translations, Value};

fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn translation_references_resolve_in_values_and_arrays() {
    let translations = table(&[
        ("STR_CLASS_TITLE", "Test Class"),
        ("STR_TRANSLATED", "Translated text"),
    ]);
    let result = parse_with_translations(
        r#"
        class testClass {
            title = $STR_CLASS_TITLE;
            values[] = {0,1};
            texts[] = {$STR_UNTRANSLATED, $STR_TRANSLATED};
            default = 1;
        };
    "#,
        &translations,
    )
    .unwrap();

    let class = result.get("testClass").and_then(Value::as_class).unwrap();
    assert_eq!(class.get("title"), Some(&Value::from("Test Class")));
    assert_eq!(
        class.get("texts"),
        Some(&Value::Array(vec![
            Value::from("STR_UNTRANSLATED"),
            Value::from("Translated text"),
        ]))
    );
    assert_eq!(class.get("default"), Some(&Value::Integer(1)));
}

#[test]
fn unknown_key_passes_through_as_its_literal_text() {
    let translations = table(&[("STR_X", "Hi")]);
    let result = parse_with_translations("t=$STR_X;", &translations).unwrap();
    assert_eq!(result.get("t"), Some(&Value::from("Hi")));

    let result = parse_with_translations("t=$STR_Y;", &translations).unwrap();
    assert_eq!(result.get("t"), Some(&Value::from("STR_Y")));
}

#[test]
fn whitespace_after_translation_key_is_accepted() {
    let translations = table(&[
        ("STR_CLASS_TITLE", "Translated title"),
        ("STR_CLASS_TEXT", "Translated text"),
    ]);
    let result = parse_with_translations(
        r#"
        class testClass {
            title = $STR_CLASS_TITLE ;
            texts[] = {$STR_CLASS_TEXT };};
    "#,
        &translations,
    )
    .unwrap();

    let class = result.get("testClass").and_then(Value::as_class).unwrap();
    assert_eq!(class.get("title"), Some(&Value::from("Translated title")));
    assert_eq!(
        class.get("texts"),
        Some(&Value::Array(vec![Value::from("Translated text")]))
    );
}

#[test]
fn whitespace_inside_translation_key_is_an_error() {
    let translations = table(&[("STR_CLASS_TITLE", "Translated title")]);

    let err = parse_with_translations(
        r#"
        class testClass {
            title = $STR_CLA SS_TITLE;
        };
    "#,
        &translations,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Syntax error"), "got: {err}");

    let err = parse_with_translations(
        r#"
        class testClass {
            texts[] = {$STR_CLA SS_TEXT};
        };
    "#,
        &translations,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Syntax error"), "got: {err}");
}

#[test]
fn eof_inside_translation_key_is_an_error() {
    let translations = table(&[("STR_CLASS_TEXT", "Translated text")]);
    let err = parse_with_translations(
        r#"
        class testClass {
            texts[] = {$STR_CLA"#,
        &translations,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Syntax error"), "got: {err}");
}

#[test]
fn marker_without_str_prefix_is_an_error() {
    let translations = table(&[]);
    let err = parse_with_translations("t=$FOO_X;", &translations).unwrap_err();
    assert!(
        err.to_string().contains("Invalid translation string beginning"),
        "got: {err}"
    );

    // Case-sensitive: `str` does not qualify.
    let err = parse_with_translations("t=$str_x;", &translations).unwrap_err();
    assert!(
        err.to_string().contains("Invalid translation string beginning"),
        "got: {err}"
    );
}

#[test]
fn translation_without_table_passes_key_through() {
    let result = simclass_core::parse("t=$STR_SOMETHING;").unwrap();
    assert_eq!(result.get("t"), Some(&Value::from("STR_SOMETHING")));
}
