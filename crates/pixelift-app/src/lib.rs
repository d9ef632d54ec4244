//! PixeLift application layer.
//!
//! Owns everything between raw user input and the backend client: the
//! upload-session state machine, the in-memory gallery the upload form
//! appends to, the local credits meter and its polling loop, the preview
//! resource lifecycle, and the persisted theme preference.

pub mod credits;
pub mod gallery;
pub mod preview;
pub mod session;
pub mod theme;
pub mod workspace;

pub use credits::{CreditsMeter, CreditsSnapshot};
pub use gallery::Gallery;
pub use preview::Preview;
pub use session::{SessionPhase, UploadSession};
pub use theme::ThemePreference;
pub use workspace::{EnhanceBackend, Workspace};
