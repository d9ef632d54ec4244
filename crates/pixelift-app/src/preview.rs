//! Preview resource lifecycle.
//!
//! A preview is a scoped copy of the selected file on disk. It is acquired
//! when a file is selected and released when the selection is cleared or
//! replaced: the backing temp file is deleted on drop, so previews cannot
//! accumulate across many selections in one session.

use std::io::Write;
use std::path::Path;

use pixelift_core::models::SelectedFileData;
use pixelift_core::AppError;
use tempfile::NamedTempFile;

/// A live preview of the selected file. Dropping it deletes the file.
#[derive(Debug)]
pub struct Preview {
    file: NamedTempFile,
}

impl Preview {
    /// Write the selected bytes to a fresh temp file.
    pub fn acquire(data: &SelectedFileData) -> Result<Self, AppError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&data.bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Location of the preview on disk, valid for this preview's lifetime.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
