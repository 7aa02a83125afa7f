use serde_json::json;

use rjg_core::{DirectiveKind, Prefix, Template, TemplateError, VariableStore};

#[test]
fn json_text_is_parsed_into_templates() {
    let store = VariableStore::from_raw(
        [("name", "\"Alice\""), ("age", "42"), ("flag", "$bool")],
        Prefix::default(),
    )
    .expect("build store");

    assert_eq!(store.len(), 3);
    assert_eq!(store.get("name"), Some(&Template::Literal(json!("Alice"))));
    assert_eq!(store.get("age"), Some(&Template::Literal(json!(42))));
}

#[test]
fn unparseable_text_falls_back_to_string() {
    let store =
        VariableStore::from_raw([("city", "Lisbon")], Prefix::default()).expect("build store");
    assert_eq!(store.get("city"), Some(&Template::Literal(json!("Lisbon"))));
}

#[test]
fn fallback_string_may_still_reference_directives() {
    let store = VariableStore::from_raw([("flag", "$bool")], Prefix::default()).expect("store");
    assert!(matches!(
        store.get("flag"),
        Some(Template::Directive(node)) if node.kind == DirectiveKind::Bool
    ));
}

#[test]
fn stored_objects_are_compiled_with_store_prefix() {
    let prefix = Prefix::new("%").expect("prefix");
    let store = VariableStore::from_raw([("pick", r#"{"%oneof": [1, 2]}"#)], prefix)
        .expect("build store");
    assert!(matches!(
        store.get("pick"),
        Some(Template::Directive(node)) if node.kind == DirectiveKind::OneOf
    ));
    assert_eq!(store.prefix().as_str(), "%");
}

#[test]
fn ambiguous_variable_template_is_fatal() {
    let result = VariableStore::from_raw(
        [("bad", r#"{"$i": 1, "$bool": 1}"#)],
        Prefix::default(),
    );
    assert!(matches!(result, Err(TemplateError::AmbiguousDirective { .. })));
}

#[test]
fn empty_or_prefixed_names_are_rejected() {
    let mut store = VariableStore::new(Prefix::default());
    assert!(matches!(
        store.insert("", &json!(1)),
        Err(TemplateError::InvalidVariableName(_))
    ));
    assert!(matches!(
        store.insert("$name", &json!(1)),
        Err(TemplateError::InvalidVariableName(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn later_values_replace_earlier_ones() {
    let store = VariableStore::from_raw([("n", "1"), ("n", "2")], Prefix::default())
        .expect("build store");
    assert_eq!(store.get("n"), Some(&Template::Literal(json!(2))));
    assert_eq!(store.names().collect::<Vec<_>>(), vec!["n"]);
}
