//! End-to-end generation from resolver JSON.

use vize_esquisse::{
    generate_preview_sources, generate_value, to_source, ComponentAnalysis, GenerateOptions,
    InvocationEditor,
};
use vize_glyph::{is_valid_expression, is_valid_script, FormatOptions};

const TODO_LIST: &str = r#"{
    "propsType": { "kind": "name", "name": "/src/TodoList.tsx:TodoListProps" },
    "types": {
        "/src/TodoList.tsx:TodoListProps": {
            "type": {
                "kind": "object",
                "fields": [
                    { "name": "title", "type": { "kind": "string" }, "optional": false },
                    { "name": "items", "type": { "kind": "array", "items": { "kind": "name", "name": "/src/TodoList.tsx:Todo" } }, "optional": false },
                    { "name": "filter", "type": { "kind": "name", "name": "/src/TodoList.tsx:Filter" }, "optional": false },
                    { "name": "onToggle", "type": { "kind": "function", "returnType": { "kind": "void" } }, "optional": false },
                    { "name": "loadMore", "type": { "kind": "function", "returnType": { "kind": "promise", "type": { "kind": "number" } } }, "optional": true },
                    { "name": "footer", "type": { "kind": "node" }, "optional": true }
                ]
            },
            "parameters": []
        },
        "/src/TodoList.tsx:Todo": {
            "type": {
                "kind": "object",
                "fields": [
                    { "name": "id", "type": { "kind": "number" }, "optional": false },
                    { "name": "label", "type": { "kind": "string" }, "optional": false },
                    { "name": "done", "type": { "kind": "boolean" }, "optional": false },
                    { "name": "subtasks", "type": { "kind": "array", "items": { "kind": "name", "name": "/src/TodoList.tsx:Todo" } }, "optional": false }
                ]
            },
            "parameters": []
        },
        "/src/TodoList.tsx:Filter": {
            "type": {
                "kind": "union",
                "types": [
                    { "kind": "literal", "value": "all" },
                    { "kind": "literal", "value": "open" },
                    { "kind": "literal", "value": "done" }
                ]
            },
            "parameters": []
        }
    },
    "argsKeys": ["title"]
}"#;

#[test]
fn test_todo_list_sources() {
    let analysis = ComponentAnalysis::from_json(TODO_LIST).unwrap();
    let sources = analysis.preview_sources(&GenerateOptions::default());

    let ts = FormatOptions::typescript();
    assert!(is_valid_script(&sources.type_declarations_source, &ts));
    assert!(sources.type_declarations_source.starts_with("declare let properties: TodoListProps;"));
    assert!(sources.type_declarations_source.contains("type Todo = {"));
    assert!(sources.type_declarations_source.contains("type Filter = \"all\" | \"open\" | \"done\";"));

    let js = FormatOptions::default();
    assert!(is_valid_expression(&sources.default_props_source, &js));
    assert!(sources.default_props_source.contains("onToggle"));
    assert!(sources.default_props_source.contains("loadMore"));
    assert!(sources.default_props_source.contains("Promise.reject()"));

    let invocation = &sources.default_invocation_source;
    assert!(is_valid_script(invocation, &js));
    assert!(invocation.contains("items"));
    assert!(invocation.contains("filter"));
    assert!(invocation.contains("subtasks"));
    for excluded in ["title", "onToggle", "loadMore", "footer"] {
        assert!(!invocation.contains(excluded), "{excluded} in {invocation}");
    }
}

#[test]
fn test_random_sources_are_valid() {
    let analysis = ComponentAnalysis::from_json(TODO_LIST).unwrap();
    let js = FormatOptions::default();
    for seed in 0..32 {
        let sources = analysis.preview_sources(&GenerateOptions::random(Some(seed)));
        assert!(is_valid_script(&sources.default_invocation_source, &js));
        assert!(is_valid_expression(&sources.default_props_source, &js));

        let props = generate_value(&analysis.props_type, &analysis.types, &GenerateOptions::random(Some(seed)));
        assert!(is_valid_expression(&to_source(&props), &js));
    }
}

#[test]
fn test_editor_round_trip() {
    let analysis = ComponentAnalysis::from_json(TODO_LIST).unwrap();
    let sources = generate_preview_sources(&analysis.props_type, &analysis.types, &analysis.args_keys);
    let mut editor = InvocationEditor::new(sources);

    editor.edit("properties = { items: [] };");
    editor.reset();
    assert_eq!(editor.invocation(), editor.sources().default_invocation_source);
}

#[test]
fn test_empty_dictionary_degrades() {
    let analysis = ComponentAnalysis::from_json(r#"{ "propsType": { "kind": "object", "fields": [
        { "name": "config", "type": { "kind": "name", "name": "Config" }, "optional": false }
    ] } }"#)
    .unwrap();
    assert!(analysis.types.is_empty());

    let sources = analysis.preview_sources(&GenerateOptions::default());
    assert!(sources.default_invocation_source.contains("config"));
    assert!(sources.type_declarations_source.contains("type Config = any;"));
}
