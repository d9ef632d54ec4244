use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enhancement::Enhancement;

/// One gallery record: an original upload or an enhanced result.
///
/// `key` is the backend's opaque identifier and the sole removal handle.
/// `url` may be time-limited (signed) and is never unique, so it must not
/// be used to identify an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub key: String,
    pub url: String,
    #[serde(default)]
    pub enhancements: Vec<Enhancement>,
    /// Creation time. The backend listing omits it, in which case the
    /// fetch time stands in.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl GalleryImage {
    pub fn new(key: impl Into<String>, url: impl Into<String>, enhancements: Vec<Enhancement>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            enhancements,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_listing_shape() {
        // The listing carries only url, key, enhancements.
        let raw = r#"{"key": "r1_enhanced", "url": "https://cdn/x.png", "enhancements": ["face", "text"]}"#;
        let image: GalleryImage = serde_json::from_str(raw).unwrap();
        assert_eq!(image.key, "r1_enhanced");
        assert_eq!(image.enhancements, vec![Enhancement::Face, Enhancement::Text]);
    }

    #[test]
    fn missing_enhancements_default_to_empty() {
        let raw = r#"{"key": "r1_original", "url": "https://cdn/y.png"}"#;
        let image: GalleryImage = serde_json::from_str(raw).unwrap();
        assert!(image.enhancements.is_empty());
    }
}
