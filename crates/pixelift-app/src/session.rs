//! Upload-session state machine.
//!
//! The upload form moves through explicit phases so that illegal
//! combinations (processing with no selected file, a result without a
//! selection) are unrepresentable. The inline error message lives beside
//! the phase rather than inside it: a validation error legitimately
//! coexists with both `Empty` (a rejected drop) and `Selected` (a failed
//! enhancement whose selection is kept for retry).

use pixelift_core::models::{EnhancementSelection, SelectedFileData};
use pixelift_core::validation::is_image_content_type;
use pixelift_core::AppError;

use crate::preview::Preview;

pub const ERR_NOT_IMAGE: &str = "Please select a valid image file";
pub const ERR_NO_FILE: &str = "Please select an image first";
pub const ERR_NO_ENHANCEMENT: &str = "Please select at least one enhancement option";
pub const ERR_ALREADY_PROCESSING: &str = "Enhancement already in progress";

/// A selected file together with its live preview.
#[derive(Debug)]
pub struct Selection {
    pub file: SelectedFileData,
    pub preview: Preview,
}

/// Where the upload form currently is.
#[derive(Debug)]
pub enum SessionPhase {
    Empty,
    Selected { selection: Selection },
    Processing { selection: Selection },
    Done { selection: Selection, enhanced_url: String },
}

/// One upload session: phase, enhancement toggles, inline error.
#[derive(Debug)]
pub struct UploadSession {
    phase: SessionPhase,
    pub toggles: EnhancementSelection,
    error: Option<String>,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Empty,
            toggles: EnhancementSelection::default(),
            error: None,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn selected_file(&self) -> Option<&SelectedFileData> {
        match &self.phase {
            SessionPhase::Empty => None,
            SessionPhase::Selected { selection }
            | SessionPhase::Processing { selection }
            | SessionPhase::Done { selection, .. } => Some(&selection.file),
        }
    }

    pub fn enhanced_url(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Done { enhanced_url, .. } => Some(enhanced_url),
            _ => None,
        }
    }

    /// Accept a dropped file. A non-image declared type is rejected with a
    /// validation error and leaves the current phase untouched; a valid
    /// file replaces any prior selection, releasing its preview.
    pub fn select(&mut self, file: SelectedFileData) -> Result<(), AppError> {
        if !is_image_content_type(&file.content_type) {
            self.error = Some(ERR_NOT_IMAGE.to_string());
            return Err(AppError::Validation(ERR_NOT_IMAGE.to_string()));
        }

        let preview = Preview::acquire(&file)?;
        // Replacing the phase drops the old selection and its preview.
        self.phase = SessionPhase::Selected {
            selection: Selection { file, preview },
        };
        self.error = None;
        Ok(())
    }

    /// Move into `Processing`. Valid from `Selected` and `Done` (retry with
    /// the same file); rejected while already processing or with nothing
    /// selected.
    pub fn begin_processing(&mut self) -> Result<(), AppError> {
        match std::mem::replace(&mut self.phase, SessionPhase::Empty) {
            SessionPhase::Selected { selection } | SessionPhase::Done { selection, .. } => {
                self.phase = SessionPhase::Processing { selection };
                Ok(())
            }
            SessionPhase::Processing { selection } => {
                self.phase = SessionPhase::Processing { selection };
                Err(AppError::Validation(ERR_ALREADY_PROCESSING.to_string()))
            }
            SessionPhase::Empty => {
                self.error = Some(ERR_NO_FILE.to_string());
                Err(AppError::Validation(ERR_NO_FILE.to_string()))
            }
        }
    }

    /// Processing succeeded: store the enhanced URL and clear any error.
    pub fn complete(&mut self, enhanced_url: String) {
        if let SessionPhase::Processing { selection } =
            std::mem::replace(&mut self.phase, SessionPhase::Empty)
        {
            self.phase = SessionPhase::Done {
                selection,
                enhanced_url,
            };
            self.error = None;
        }
    }

    /// Processing failed: show the message and return to `Selected` so the
    /// user can retry with the same file.
    pub fn fail(&mut self, message: impl Into<String>) {
        if let SessionPhase::Processing { selection } =
            std::mem::replace(&mut self.phase, SessionPhase::Empty)
        {
            self.phase = SessionPhase::Selected { selection };
        }
        self.error = Some(message.into());
    }

    /// Explicit removal: back to `Empty`, all derived state cleared. The
    /// preview is released when the selection drops.
    pub fn remove(&mut self) {
        self.phase = SessionPhase::Empty;
        self.toggles = EnhancementSelection::default();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> SelectedFileData {
        SelectedFileData::new("photo.jpg", "image/jpeg", vec![1, 2, 3])
    }

    #[test]
    fn non_image_drop_is_rejected_with_error() {
        let mut session = UploadSession::new();
        let err = session
            .select(SelectedFileData::new("doc.pdf", "application/pdf", vec![]))
            .unwrap_err();
        assert!(err.to_string().contains("image file"));
        assert!(matches!(session.phase(), SessionPhase::Empty));
        assert!(session.error().unwrap().contains("image file"));
    }

    #[test]
    fn valid_drop_selects_and_clears_error() {
        let mut session = UploadSession::new();
        session.set_error("stale");
        session.select(image()).unwrap();
        assert!(matches!(session.phase(), SessionPhase::Selected { .. }));
        assert_eq!(session.error(), None);
        assert_eq!(session.selected_file().unwrap().name, "photo.jpg");
    }

    #[test]
    fn replacing_selection_releases_previous_preview() {
        let mut session = UploadSession::new();
        session.select(image()).unwrap();
        let first_path = match session.phase() {
            SessionPhase::Selected { selection } => selection.preview.path().to_path_buf(),
            _ => unreachable!(),
        };
        assert!(first_path.exists());

        session.select(image()).unwrap();
        assert!(!first_path.exists());
    }

    #[test]
    fn processing_requires_a_selection() {
        let mut session = UploadSession::new();
        let err = session.begin_processing().unwrap_err();
        assert_eq!(err.to_string(), ERR_NO_FILE);
        assert_eq!(session.error(), Some(ERR_NO_FILE));
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut session = UploadSession::new();
        session.select(image()).unwrap();
        session.begin_processing().unwrap();
        let err = session.begin_processing().unwrap_err();
        assert_eq!(err.to_string(), ERR_ALREADY_PROCESSING);
        assert!(matches!(session.phase(), SessionPhase::Processing { .. }));
    }

    #[test]
    fn failure_returns_to_selected_keeping_the_file() {
        let mut session = UploadSession::new();
        session.select(image()).unwrap();
        session.begin_processing().unwrap();
        session.fail("gpu offline");
        assert!(matches!(session.phase(), SessionPhase::Selected { .. }));
        assert_eq!(session.error(), Some("gpu offline"));
        assert!(session.selected_file().is_some());

        // Retry is possible from here.
        session.begin_processing().unwrap();
        session.complete("https://store/enhanced.jpg".to_string());
        assert_eq!(session.enhanced_url(), Some("https://store/enhanced.jpg"));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn done_allows_resubmission() {
        let mut session = UploadSession::new();
        session.select(image()).unwrap();
        session.begin_processing().unwrap();
        session.complete("https://store/e1.jpg".to_string());
        session.begin_processing().unwrap();
        assert!(matches!(session.phase(), SessionPhase::Processing { .. }));
    }

    #[test]
    fn remove_clears_everything() {
        let mut session = UploadSession::new();
        session.select(image()).unwrap();
        session.toggles.face = true;
        session.set_error("stale");
        let path = match session.phase() {
            SessionPhase::Selected { selection } => selection.preview.path().to_path_buf(),
            _ => unreachable!(),
        };

        session.remove();
        assert!(matches!(session.phase(), SessionPhase::Empty));
        assert!(session.toggles.is_empty());
        assert_eq!(session.error(), None);
        assert!(!path.exists());
    }
}
