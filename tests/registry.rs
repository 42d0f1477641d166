use std::collections::BTreeSet;

use xmldoc_lsp::registry::{Registry, RegistryError, default_elements, registry};
use xmldoc_lsp::{AttributeDefinition, ElementDefinition, ElementNameContext, ElementUsage};

fn names(elements: &[&ElementDefinition]) -> Vec<String> {
    elements.iter().map(|e| e.display_text().to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ─── Catalog ────────────────────────────────────────────────────────────────

#[test]
fn test_builtin_catalog_has_fifteen_elements() {
    let registry = registry();
    assert_eq!(registry.len(), 15);

    let all: Vec<&str> = registry.all_definitions().map(|e| e.display_text()).collect();
    assert_eq!(
        all,
        vec![
            "AttachedEventComments",
            "AttachedPropertyComments",
            "code",
            "conceptualLink",
            "event",
            "list",
            "note",
            "overloads",
            "preliminary",
            "revision",
            "revisionHistory",
            "see",
            "seealso",
            "threadsafety",
            "token",
        ]
    );
}

#[test]
fn test_lookup_by_display_text() {
    let code = registry().lookup("code").expect("code should be registered");
    assert_eq!(code.usage, ElementUsage::Nested);
    assert_eq!(code.text_before_caret.as_deref(), Some("language=\""));
    assert!(code.find_attribute("removeRegionMarkers").is_some());
    assert!(registry().lookup("summary").is_none());
}

#[test]
fn test_revision_is_confined_to_revision_history() {
    let revision = registry().lookup("revision").unwrap();
    assert_eq!(revision.child_of, set(&["revisionHistory"]));
}

#[test]
fn test_single_use_top_level_elements() {
    let single_use: Vec<&str> = registry()
        .all_definitions()
        .filter(|e| e.is_single_use)
        .map(|e| e.display_text())
        .collect();
    assert_eq!(
        single_use,
        vec![
            "AttachedEventComments",
            "AttachedPropertyComments",
            "overloads",
            "preliminary",
            "revisionHistory",
            "threadsafety",
        ]
    );
    assert!(
        registry()
            .all_definitions()
            .filter(|e| e.is_single_use)
            .all(|e| e.usage == ElementUsage::TopLevel)
    );
}

// ─── Construction ───────────────────────────────────────────────────────────

#[test]
fn test_duplicate_display_text_is_rejected() {
    let result = Registry::from_definitions([
        ElementDefinition::new("see", ElementUsage::Nested),
        ElementDefinition::new("seeAlt", ElementUsage::Nested).with_display_text("  see "),
    ]);
    assert_eq!(
        result.unwrap_err(),
        RegistryError::DuplicateDisplayText("see".to_string())
    );
}

#[test]
fn test_same_name_with_distinct_display_text_is_allowed() {
    let registry = Registry::from_definitions([
        ElementDefinition::new("code", ElementUsage::Nested),
        ElementDefinition::new("code", ElementUsage::Nested)
            .with_display_text("code (C#)")
            .text_before_caret("language=\"cs"),
    ])
    .unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup("code (C#)").unwrap().name, "code");
}

#[test]
fn test_blank_display_text_falls_back_to_name() {
    let element = ElementDefinition::new("note", ElementUsage::Nested).with_display_text("   ");
    assert_eq!(element.display_text(), "note");
}

#[test]
fn test_duplicate_attribute_is_rejected() {
    let result = Registry::from_definitions([ElementDefinition::new("list", ElementUsage::Nested)
        .attribute(AttributeDefinition::new("type").values(["bullet"]))
        .attribute(AttributeDefinition::new("type").values(["number"]))]);
    assert_eq!(
        result.unwrap_err(),
        RegistryError::DuplicateAttribute {
            element: "list".to_string(),
            attribute: "type".to_string(),
        }
    );
}

#[test]
fn test_builtin_seed_is_valid() {
    assert!(Registry::from_definitions(default_elements()).is_ok());
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[test]
fn test_attribute_candidates_exclude_existing_names() {
    let attrs = registry().attribute_candidates("code", &set(&["language", "title"]));
    let attr_names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
    assert!(!attr_names.contains(&"language"));
    assert!(!attr_names.contains(&"title"));
    assert!(attr_names.contains(&"source"));
    assert_eq!(attr_names.len(), 7);
}

#[test]
fn test_attribute_candidates_are_case_sensitive() {
    let attrs = registry().attribute_candidates("code", &set(&["Language"]));
    assert!(attrs.iter().any(|a| a.name == "language"));
}

#[test]
fn test_attribute_candidates_for_unknown_element() {
    assert!(registry().attribute_candidates("para", &BTreeSet::new()).is_empty());
    assert!(registry().attribute_candidates("token", &BTreeSet::new()).is_empty());
}

#[test]
fn test_code_language_values() {
    let values: BTreeSet<&str> = registry()
        .attribute_value_candidates("code", "language")
        .iter()
        .map(String::as_str)
        .collect();
    let expected: BTreeSet<&str> = [
        "cs",
        "cpp",
        "c",
        "fs",
        "javascript",
        "vb",
        "vbnet",
        "html",
        "xml",
        "xsl",
        "xaml",
        "sql",
        "py",
        "pshell",
        "bat",
        "none",
    ]
    .into_iter()
    .collect();
    assert_eq!(values, expected);
}

#[test]
fn test_free_form_attribute_has_no_values() {
    assert!(registry().attribute_value_candidates("code", "title").is_empty());
    assert!(registry().attribute_value_candidates("code", "missing").is_empty());
    assert!(registry().attribute_value_candidates("missing", "title").is_empty());
}

#[test]
fn test_element_candidates_at_empty_root() {
    let context = ElementNameContext {
        at_root: true,
        ..ElementNameContext::default()
    };
    let found = names(&registry().element_candidates(&context));
    assert_eq!(
        found,
        vec![
            "AttachedEventComments",
            "AttachedPropertyComments",
            "conceptualLink",
            "event",
            "overloads",
            "preliminary",
            "revisionHistory",
            "threadsafety",
            "token",
        ]
    );
}

#[test]
fn test_single_use_elements_already_present_are_excluded() {
    let context = ElementNameContext {
        at_root: true,
        existing_top_level_names: set(&["preliminary", "event", "summary"]),
        ..ElementNameContext::default()
    };
    let found = names(&registry().element_candidates(&context));
    assert!(!found.contains(&"preliminary".to_string()));
    assert!(
        found.contains(&"event".to_string()),
        "repeatable elements stay available. Got: {:?}",
        found
    );
}

#[test]
fn test_child_of_elements_need_a_matching_parent() {
    let nested = ElementNameContext {
        allows_unrestricted_nested: true,
        parent_names: set(&["remarks"]),
        ..ElementNameContext::default()
    };
    let found = names(&registry().element_candidates(&nested));
    assert_eq!(
        found,
        vec!["code", "conceptualLink", "list", "note", "see", "seealso", "token"]
    );

    let history = ElementNameContext {
        allows_unrestricted_nested: true,
        parent_names: set(&["revisionHistory"]),
        ..ElementNameContext::default()
    };
    let found = names(&registry().element_candidates(&history));
    assert!(found.contains(&"revision".to_string()));
}

#[test]
fn test_both_usage_elements_are_always_offered() {
    let found = names(&registry().element_candidates(&ElementNameContext::default()));
    assert_eq!(found, vec!["conceptualLink", "token"]);
}
