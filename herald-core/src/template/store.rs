//! Template sources

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template store error types
#[derive(Error, Debug)]
pub enum TemplateStoreError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template '{id}' could not be read: {source}")]
    Unreadable {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves a template identifier to its source lines
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn load(&self, id: &str) -> Result<Vec<String>, TemplateStoreError>;
}

/// Loads `<dir>/<id>.<extension>` from the filesystem
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    dir: PathBuf,
    extension: String,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map an identifier to a file inside the template directory.
    ///
    /// Identifiers that could escape the directory resolve to nothing.
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.contains("..") || id.contains('/') || id.contains('\\') {
            return None;
        }
        Some(self.dir.join(format!("{}.{}", id, self.extension)))
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn load(&self, id: &str) -> Result<Vec<String>, TemplateStoreError> {
        let path = self
            .resolve(id)
            .ok_or_else(|| TemplateStoreError::NotFound(id.to_string()))?;

        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => TemplateStoreError::NotFound(id.to_string()),
                _ => TemplateStoreError::Unreadable {
                    id: id.to_string(),
                    source: e,
                },
            })?;

        tracing::debug!(template = %id, path = %path.display(), "Loaded template");
        Ok(source.lines().map(str::to_string).collect())
    }
}

/// Templates held in memory, e.g. compiled into the binary
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<String, Vec<String>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: impl Into<String>, source: &str) -> Self {
        self.templates
            .insert(id.into(), source.lines().map(str::to_string).collect());
        self
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn load(&self, id: &str) -> Result<Vec<String>, TemplateStoreError> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| TemplateStoreError::NotFound(id.to_string()))
    }
}
