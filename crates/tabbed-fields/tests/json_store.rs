//! Resolution against a file-backed store.

use std::io::Write;

use pretty_assertions::assert_eq;
use tabbed_fields::{
    FieldSchema, ItemId, JsonMetaStore, Layout, Resolver, SchemaProvider, TabbedContentSchema,
};

const META: &str = r#"{
    "10": {
        "tabs": "2",
        "tabs_0_title": "A",
        "tabs_0_content": "hi",
        "tabs_0_tabs": 1,
        "tabs_0_tabs_0_title": "Sub",
        "tabs_0_tabs_0_content": "x",
        "tabs_1_title": "B",
        "tabs_1_content": ""
    },
    "11": {
        "page_sections": ["text", "gallery", "text"],
        "page_sections_0_body": "First",
        "page_sections_1_images": 3,
        "page_sections_2_body": "Last"
    }
}"#;

fn write_store() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(META.as_bytes()).unwrap();
    file
}

#[test]
fn resolves_tabs_from_file() {
    let file = write_store();
    let store = JsonMetaStore::from_path(file.path()).unwrap();
    let schema = TabbedContentSchema::new();

    let resolution = Resolver::new(&store).resolve(ItemId(10), schema.fields());
    assert!(resolution.issues.is_empty());

    let json = serde_json::to_value(&resolution.tree).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "tabs": [
                {
                    "title": "A",
                    "content": "hi",
                    "tabs": [{ "title": "Sub", "content": "x" }]
                },
                { "title": "B", "content": "" }
            ]
        })
    );
}

#[test]
fn resolves_flexible_sections_from_file() {
    let file = write_store();
    let store = JsonMetaStore::from_path(file.path()).unwrap();
    let schema = vec![FieldSchema::flexible(
        "page_sections",
        vec![
            Layout::new("text", vec![FieldSchema::scalar("body")]),
            Layout::new("gallery", vec![FieldSchema::scalar("images")]),
        ],
    )];

    let tree = Resolver::new(&store).resolve(ItemId(11), &schema).into_tree();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "page_sections": [
                { "layoutType": "text", "body": "First" },
                { "layoutType": "gallery", "images": 3 },
                { "layoutType": "text", "body": "Last" }
            ]
        })
    );
}

#[test]
fn schema_loaded_from_export_matches_builtin() {
    let export = r#"[{
        "key": "field_59c02db106f90",
        "label": "Tabs",
        "name": "tabs",
        "type": "repeater",
        "sub_fields": [
            { "label": "Title", "name": "title", "type": "text", "required": 1 },
            { "label": "Content", "name": "content", "type": "wysiwyg" },
            {
                "label": "Child Tabs",
                "name": "tabs",
                "type": "repeater",
                "sub_fields": [
                    { "label": "Title", "name": "title", "type": "text" },
                    { "label": "Content", "name": "content", "type": "wysiwyg" }
                ]
            }
        ]
    }]"#;
    let loaded: Vec<FieldSchema> = serde_json::from_str(export).unwrap();
    assert_eq!(loaded.as_slice(), TabbedContentSchema::new().fields());
}
