// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent template catalog.

use serde::{Deserialize, Serialize};

/// A named agent role an operator can provision from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Template {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

/// Closed, ordered list of templates available for provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Case-insensitive lookup, for operator input.
    pub fn find(&self, name: &str) -> Option<&Template> {
        self.get(name).or_else(|| self.templates.iter().find(|t| t.name.eq_ignore_ascii_case(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new(vec![
            Template::new(
                "Python Coder",
                "Data processing, script generation and automation tasks.",
            ),
            Template::new(
                "Security Researcher",
                "Network analysis tools and vulnerability scanners. Strict sandbox enforcement.",
            ),
            Template::new(
                "DevOps Engineer",
                "CI/CD pipelines, container configuration and system orchestration.",
            ),
            Template::new(
                "Data Analyst",
                "Large dataset queries and report generation. High memory profile recommended.",
            ),
        ])
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
