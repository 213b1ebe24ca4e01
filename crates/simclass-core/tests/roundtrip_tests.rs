use simclass_core::{generate, parse, search, Document, Value};

/// Assert that a document survives generate → parse unchanged, and that the
/// generated text is a fixed point of parse → generate.
fn assert_roundtrip(doc: &Document) {
    let text = generate(doc);
    let reparsed = parse(&text).unwrap_or_else(|err| {
        panic!("generated text failed to parse: {err}\n---\n{text}\n---");
    });
    assert_eq!(&reparsed, doc, "roundtrip mismatch for:\n{text}");
    assert_eq!(generate(&reparsed), text, "generation is not idempotent");
}

fn doc(entries: Vec<(&str, Value)>) -> Document {
    entries.into_iter().collect()
}

// ============================================================================
// Constructed documents
// ============================================================================

#[test]
fn roundtrip_scalars() {
    assert_roundtrip(&doc(vec![
        ("i", Value::Integer(42)),
        ("n", Value::Integer(-42)),
        ("f", Value::Float(12.5)),
        ("t", Value::Boolean(true)),
        ("x", Value::Boolean(false)),
        ("s", Value::from("hello world")),
    ]));
}

#[test]
fn roundtrip_empty_document() {
    assert_roundtrip(&Document::new());
}

#[test]
fn roundtrip_string_edge_cases() {
    assert_roundtrip(&doc(vec![
        ("empty", Value::from("")),
        ("quotes", Value::from(r#"say "hi" and "bye""#)),
        ("newlines", Value::from("line1\nline2\nline3")),
        ("mixed", Value::from("a \"b\"\nc")),
        ("semicolons", Value::from("kick (_this select 0);")),
        ("numeric_text", Value::from("12")),
        ("boolean_text", Value::from("true")),
    ]));
}

#[test]
fn roundtrip_arrays() {
    assert_roundtrip(&doc(vec![
        ("empty", Value::Array(vec![])),
        (
            "flat",
            Value::Array(vec![Value::Integer(1), Value::Float(2.5), Value::from("x")]),
        ),
        (
            "nested",
            Value::Array(vec![
                Value::Array(vec![]),
                Value::Array(vec![Value::from("foo")]),
                Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
            ]),
        ),
    ]));
}

#[test]
fn roundtrip_nested_array_matrix() {
    assert_roundtrip(&doc(vec![(
        "kickTimeout",
        Value::Array(vec![
            Value::Array(vec![Value::Integer(0), Value::Integer(-1)]),
            Value::Array(vec![Value::Integer(1), Value::Integer(180)]),
            Value::Array(vec![Value::Integer(2), Value::Integer(180)]),
            Value::Array(vec![Value::Integer(3), Value::Integer(180)]),
        ]),
    )]));
}

#[test]
fn roundtrip_nested_classes() {
    assert_roundtrip(&doc(vec![(
        "Session",
        Value::Class(doc(vec![
            (
                "Player1",
                Value::Class(doc(vec![
                    ("name", Value::from("Lord DK")),
                    ("killsInfantry", Value::Integer(4)),
                    ("killsTotal", Value::Integer(4)),
                ])),
            ),
            (
                "Player2",
                Value::Class(doc(vec![
                    ("name", Value::from("XiviD")),
                    ("killsInfantry", Value::Integer(3)),
                ])),
            ),
        ])),
    )]));
}

#[test]
fn integral_float_collapses_to_integer_across_roundtrip() {
    // The one deliberate loss: numeric kind is not preserved for
    // integral-valued floats.
    let original = doc(vec![("x", Value::Float(150.0))]);
    let reparsed = parse(&generate(&original)).unwrap();
    assert_eq!(reparsed, doc(vec![("x", Value::Integer(150))]));
}

// ============================================================================
// Parsed inputs
// ============================================================================

#[test]
fn roundtrip_parsed_scenarios() {
    for input in [
        "class Moo {};",
        "x=-1.5e-2;",
        r#"foo="bar ""haha"";";"#,
        "class Foo { delete Moo; };",
        "var[]={1, 2, 3};",
        "class Moo { foo[]={{}, {\"foo\"}, {1, 2}}; };",
    ] {
        let first = parse(input).unwrap();
        assert_roundtrip(&first);
    }
}

#[test]
fn roundtrip_server_cfg() {
    let raw = include_str!("fixtures/server.cfg");
    let parsed = parse(raw).unwrap();

    // Spot-check the parse before round-tripping.
    assert_eq!(
        parsed.get("hostname"),
        Some(&Value::from("Fun and Test Server"))
    );
    assert_eq!(parsed.get("voteThreshold"), Some(&Value::Float(0.33)));
    assert_eq!(
        search(&parsed, "Missions>>TestMission01>>template"),
        Some(&Value::from("MP_Marksmen_01.Altis"))
    );
    assert_eq!(
        parsed.get("motd").and_then(Value::as_array).map(|a| a.len()),
        Some(10)
    );

    assert_roundtrip(&parsed);
}

#[test]
fn whitespace_and_comment_insertion_does_not_change_the_parse() {
    let baseline = parse("class Moo { foo[]={1,2}; bar=\"x\"; };").unwrap();
    let noisy = parse(
        "  /* head */ class /* a */ Moo \t {\n // line\n foo /* b */ [] = { 1 , /* c */ 2 } ; \r\n bar = \"x\" ; // tail\n } ; ",
    )
    .unwrap();
    assert_eq!(baseline, noisy);
}
