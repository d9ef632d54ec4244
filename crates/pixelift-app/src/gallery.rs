//! In-memory gallery bookkeeping for the upload form.
//!
//! Each completed run appends a pair of entries sharing the run id as key
//! prefix: the original (untagged) first, then the enhanced result tagged
//! with the toggles that were active at submission. Entries are identified
//! by key alone; URLs are not unique and never used for removal.

use pixelift_core::models::{EnhanceResult, EnhancementSelection, GalleryImage};

#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<GalleryImage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.images.iter().any(|i| i.key == key)
    }

    /// Append the original/enhanced pair for one completed run.
    pub fn append_run(&mut self, result: &EnhanceResult, selection: &EnhancementSelection) {
        self.images.push(GalleryImage::new(
            format!("{}_original", result.run_id),
            result.original_url.clone(),
            Vec::new(),
        ));
        self.images.push(GalleryImage::new(
            format!("{}_enhanced", result.run_id),
            result.enhanced_url.clone(),
            selection.active(),
        ));
    }

    /// Remove exactly the entry with the given key. Returns whether an
    /// entry was removed.
    pub fn remove_by_key(&mut self, key: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|i| i.key != key);
        self.images.len() < before
    }

    /// Install a server-authoritative listing.
    pub fn replace(&mut self, images: Vec<GalleryImage>) {
        self.images = images;
    }
}
