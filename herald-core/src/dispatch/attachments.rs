//! Attachment assembly

use crate::domain::Attachment;
use crate::error::{DispatchError, Result};
use std::path::{Path, PathBuf};

/// Read every path into an attachment, in order.
///
/// All-or-nothing: the first unreadable path fails the whole set and the
/// parts read so far are dropped.
pub async fn assemble(paths: &[PathBuf]) -> Result<Vec<Attachment>> {
    let mut attachments = Vec::with_capacity(paths.len());

    for path in paths {
        let name = display_name(path).ok_or_else(|| DispatchError::AttachmentNotFound {
            path: path.clone(),
            source: None,
        })?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| DispatchError::AttachmentNotFound {
                path: path.clone(),
                source: Some(e),
            })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "Attachment loaded");
        attachments.push(Attachment::new(name, content, content_type_for(path)));
    }

    Ok(attachments)
}

fn display_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Guess a MIME type from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") | Some("log") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
