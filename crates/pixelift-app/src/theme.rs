//! Persisted dark/light theme preference.

use std::sync::Arc;

use pixelift_core::{AppError, KeyValueStore, KEY_DARK_MODE};

pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
}

impl ThemePreference {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Light theme unless a dark preference has been persisted.
    pub fn is_dark(&self) -> Result<bool, AppError> {
        Ok(self.store.get(KEY_DARK_MODE)?.as_deref() == Some("true"))
    }

    pub fn set_dark(&self, dark: bool) -> Result<(), AppError> {
        self.store
            .set(KEY_DARK_MODE, if dark { "true" } else { "false" })
    }

    /// Flip the preference and return the new value.
    pub fn toggle(&self) -> Result<bool, AppError> {
        let dark = !self.is_dark()?;
        self.set_dark(dark)?;
        Ok(dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelift_core::MemoryStore;

    #[test]
    fn defaults_to_light_and_toggles() {
        let theme = ThemePreference::new(Arc::new(MemoryStore::new()));
        assert!(!theme.is_dark().unwrap());
        assert!(theme.toggle().unwrap());
        assert!(theme.is_dark().unwrap());
        assert!(!theme.toggle().unwrap());
    }
}
