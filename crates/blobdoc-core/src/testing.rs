//! Shared fixtures for unit tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;
use crate::store::DocumentStore;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Task {
    pub fn new(title: &str, status: &str) -> Self {
        Self {
            id: String::new(),
            title: title.to_string(),
            status: Some(status.to_string()),
        }
    }
}

impl Document for Task {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.id).filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "Id", default)]
    pub id: Uuid,
    pub amount: u64,
}

impl Document for Invoice {
    type Id = Uuid;

    fn id(&self) -> Option<&Uuid> {
        Some(&self.id).filter(|id| !id.is_nil())
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

/// An in-memory store with one empty container named `container`.
pub async fn store_with(container: &str) -> DocumentStore {
    let store = DocumentStore::in_memory();
    store.create_container(container).await.unwrap();
    store
}
