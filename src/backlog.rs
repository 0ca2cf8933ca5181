//! The product backlog handed to ceremonies during initialization.
//!
//! Items are kept in priority order: the first item is the most important
//! one and is the first to be pulled into a sprint.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CadenceError;

/// A single entry of the product backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogItem {
    pub id: String,
    pub title: String,
    /// Relative effort, in story points.
    #[serde(default)]
    pub estimate: u32,
}

impl BacklogItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimate: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBacklog {
    #[serde(default)]
    items: Vec<BacklogItem>,
}

impl ProductBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<BacklogItem>) -> Self {
        Self { items }
    }

    /// Reads a backlog from a JSON file of the form `{"items": [...]}`.
    pub fn load(path: &Path) -> Result<Self, CadenceError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn push(&mut self, item: BacklogItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[BacklogItem] {
        &self.items
    }

    /// The `n` highest-priority items, or fewer if the backlog is shorter.
    pub fn top(&self, n: usize) -> &[BacklogItem] {
        &self.items[..n.min(self.items.len())]
    }
}
