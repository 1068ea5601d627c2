//! Template loading and rendering
//!
//! The store resolves a template identifier to source lines, the engine
//! substitutes `{{placeholder}}` markers from a [`TemplateContext`].

pub mod engine;
pub mod store;

pub use engine::{PlaceholderPolicy, TemplateEngine};
pub use store::{FileTemplateStore, InMemoryTemplateStore, TemplateStore, TemplateStoreError};

use crate::domain::TemplateRef;
use crate::error::{DispatchError, Result};
use std::sync::Arc;

/// Loads a template from its store and renders it
#[derive(Clone)]
pub struct TemplateRenderer {
    store: Arc<dyn TemplateStore>,
    engine: TemplateEngine,
}

impl TemplateRenderer {
    pub fn new(store: Arc<dyn TemplateStore>, engine: TemplateEngine) -> Self {
        Self { store, engine }
    }

    pub async fn render(&self, template: &TemplateRef) -> Result<String> {
        let lines = self.store.load(&template.id).await.map_err(|e| match e {
            TemplateStoreError::NotFound(id) => DispatchError::TemplateNotFound(id),
            TemplateStoreError::Unreadable { id, source } => {
                tracing::warn!(template = %id, error = %source, "Template could not be read");
                DispatchError::TemplateNotFound(id)
            }
        })?;

        self.engine.render(&template.id, &lines, &template.context)
    }
}
