// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_catalog_order() {
    let catalog = TemplateCatalog::default();
    assert_eq!(
        catalog.names(),
        vec!["Python Coder", "Security Researcher", "DevOps Engineer", "Data Analyst"]
    );
}

#[test]
fn get_is_exact() {
    let catalog = TemplateCatalog::default();
    assert!(catalog.get("DevOps Engineer").is_some());
    assert!(catalog.get("devops engineer").is_none());
    assert!(!catalog.contains("Game Designer"));
}

#[test]
fn find_ignores_case() {
    let catalog = TemplateCatalog::default();
    let found = catalog.find("devops engineer").unwrap();
    assert_eq!(found.name, "DevOps Engineer");
}

#[test]
fn catalog_deserializes_from_list() {
    let catalog: TemplateCatalog =
        serde_json::from_str(r#"[{"name": "Tester"}, {"name": "Ops", "description": "d"}]"#)
            .unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("Tester").unwrap().description, "");
}
