use serde_json::json;

use rjg_core::{DirectiveKind, Params, Prefix, Template, TemplateError};

fn compile(value: serde_json::Value) -> Result<Template, TemplateError> {
    Template::compile(&value, &Prefix::default())
}

#[test]
fn single_directive_key_becomes_directive_node() {
    let template = compile(json!({"$int": {"min": 1, "max": 5}})).expect("compile");
    let Template::Directive(node) = template else {
        panic!("expected directive node");
    };
    assert_eq!(node.kind, DirectiveKind::Int);
    let Params::Value(params) = node.params else {
        panic!("expected object params");
    };
    assert_eq!(
        params.field("min"),
        Some(&Template::Literal(json!(1)))
    );
    assert_eq!(
        params.field("max"),
        Some(&Template::Literal(json!(5)))
    );
}

#[test]
fn bare_directive_string_has_no_params() {
    let template = compile(json!("$bool")).expect("compile");
    assert!(matches!(
        template,
        Template::Directive(ref node)
            if node.kind == DirectiveKind::Bool && node.params == Params::Absent
    ));
    assert!(!template.is_object_form());
}

#[test]
fn unknown_prefixed_string_is_variable_reference() {
    let template = compile(json!("$customer")).expect("compile");
    assert_eq!(template, Template::Variable("customer".to_string()));
}

#[test]
fn unprefixed_directive_name_is_literal() {
    let template = compile(json!({"int": "bool"})).expect("compile");
    assert!(template.is_static());
    assert_eq!(template.field("int"), Some(&Template::Literal(json!("bool"))));
}

#[test]
fn two_directive_keys_are_rejected() {
    let result = compile(json!({"$int": {"min": 1, "max": 2}, "$bool": null}));
    match result {
        Err(TemplateError::AmbiguousDirective { keys }) => {
            assert_eq!(keys, vec!["$bool".to_string(), "$int".to_string()]);
        }
        other => panic!("expected ambiguous directive error, got {other:?}"),
    }
}

#[test]
fn mixed_object_with_one_directive_keeps_the_directive() {
    let template = compile(json!({"$digit": null, "note": "ignored"})).expect("compile");
    assert!(matches!(
        template,
        Template::Directive(ref node) if node.kind == DirectiveKind::Digit
    ));
}

#[test]
fn list_parameters_compile_element_templates() {
    let template = compile(json!({"$oneof": ["$i", "plain", [1, "$i"]]})).expect("compile");
    let Template::Directive(node) = template else {
        panic!("expected directive node");
    };
    let Params::List(items) = node.params else {
        panic!("expected list params");
    };
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], Template::Directive(ref inner) if inner.kind == DirectiveKind::Iteration));
    assert_eq!(items[1], Template::Literal(json!("plain")));
    assert_eq!(items[2], Template::Literal(json!([1, "$i"])));
}

#[test]
fn option_array_parameter_stays_literal() {
    let template = compile(json!({"$option": [1, "$i"]})).expect("compile");
    let Template::Directive(node) = template else {
        panic!("expected directive node");
    };
    assert_eq!(
        node.params,
        Params::Value(Box::new(Template::Literal(json!([1, "$i"]))))
    );
}

#[test]
fn literal_arrays_are_kept_verbatim() {
    let template = compile(json!({"tags": ["$bool", {"$int": {"min": 0, "max": 1}}]})).expect("compile");
    assert_eq!(
        template.field("tags"),
        Some(&Template::Literal(json!(["$bool", {"$int": {"min": 0, "max": 1}}])))
    );
}

#[test]
fn nested_ambiguity_is_reported_from_parameters() {
    let result = compile(json!({"$arr": {"len": 2, "val": {"$i": 1, "$u8": 1}}}));
    assert!(matches!(result, Err(TemplateError::AmbiguousDirective { .. })));
}

#[test]
fn custom_prefix_changes_token_recognition() {
    let prefix = Prefix::new("@").expect("prefix");
    let template = Template::parse(r#"{"a": "@i", "b": "$i"}"#, &prefix).expect("compile");
    assert!(matches!(
        template.field("a"),
        Some(Template::Directive(node)) if node.kind == DirectiveKind::Iteration
    ));
    assert_eq!(template.field("b"), Some(&Template::Literal(json!("$i"))));
}

#[test]
fn invalid_json_text_is_an_error() {
    let result = Template::parse("{not json", &Prefix::default());
    assert!(matches!(result, Err(TemplateError::Json(_))));
}
