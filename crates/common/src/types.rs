//! Fixture records

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A RealWorld account used to drive the UI.
///
/// Built per test; persistence is the application's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Article content typed into the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Article {
    /// Tags in the order they are entered into the editor
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
