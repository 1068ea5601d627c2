//! Common test utilities

use async_trait::async_trait;
use herald_core::config::Config;
use herald_core::domain::Message;
use herald_core::template::{FileTemplateStore, TemplateStore};
use herald_core::transport::{Transport, TransportError};
use herald_core::bootstrap::Services;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Transport that records every message it is asked to send
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Message>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Wire services around a recording transport and a template directory
pub fn services(template_dir: &Path, config: Config) -> (Services, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let store: Arc<dyn TemplateStore> = Arc::new(FileTemplateStore::new(template_dir, "html"));
    let services = Services::with_parts(&config, transport.clone(), store);
    (services, transport)
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
