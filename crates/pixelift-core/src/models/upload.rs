use serde::{Deserialize, Serialize};

/// A file captured for upload: the dropped file's name, declared content
/// type, and bytes.
#[derive(Debug, Clone)]
pub struct SelectedFileData {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFileData {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Normalized outcome of one upload-and-enhance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceResult {
    pub original_url: String,
    pub enhanced_url: String,
    pub run_id: String,
    /// Diagnostic plot URLs the backend may attach; empty when omitted.
    #[serde(default)]
    pub plots: Vec<String>,
}
