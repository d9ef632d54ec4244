//! Upload-form orchestrator.
//!
//! `Workspace` owns the session state machine, the in-memory gallery, the
//! credits meter, the login gate, and the modal state of the gallery view
//! (lightbox, two-phase delete confirmation). The backend sits behind the
//! `EnhanceBackend` seam so flows can be exercised without a network.

use std::sync::Arc;

use async_trait::async_trait;
use pixelift_api_client::ApiClient;
use pixelift_core::models::{
    AuthUser, EnhanceResult, EnhancementSelection, GalleryImage, SelectedFileData,
};
use pixelift_core::{AppError, KeyValueStore};
use tracing::{info, warn};

use crate::credits::CreditsMeter;
use crate::gallery::Gallery;
use crate::session::{UploadSession, ERR_NO_ENHANCEMENT, ERR_NO_FILE};

/// Backend operations the orchestrator needs.
#[async_trait]
pub trait EnhanceBackend: Send + Sync {
    async fn upload_and_enhance(
        &self,
        file: &SelectedFileData,
        email: &str,
        selection: &EnhancementSelection,
    ) -> Result<EnhanceResult, AppError>;

    async fn fetch_gallery(&self, email: &str) -> Result<Vec<GalleryImage>, AppError>;

    async fn delete_gallery_image(
        &self,
        email: &str,
        key: &str,
    ) -> Result<Vec<GalleryImage>, AppError>;
}

#[async_trait]
impl EnhanceBackend for ApiClient {
    async fn upload_and_enhance(
        &self,
        file: &SelectedFileData,
        email: &str,
        selection: &EnhancementSelection,
    ) -> Result<EnhanceResult, AppError> {
        ApiClient::upload_and_enhance(self, file, email, selection).await
    }

    async fn fetch_gallery(&self, email: &str) -> Result<Vec<GalleryImage>, AppError> {
        ApiClient::fetch_gallery(self, email).await
    }

    async fn delete_gallery_image(
        &self,
        email: &str,
        key: &str,
    ) -> Result<Vec<GalleryImage>, AppError> {
        ApiClient::delete_gallery_image(self, email, key).await
    }
}

pub struct Workspace<B: EnhanceBackend> {
    backend: B,
    user: Option<AuthUser>,
    pub session: UploadSession,
    gallery: Gallery,
    credits: CreditsMeter,
    login_requested: bool,
    lightbox: Option<String>,
    pending_delete: Option<String>,
}

impl<B: EnhanceBackend> Workspace<B> {
    pub fn new(backend: B, user: Option<AuthUser>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            user,
            session: UploadSession::new(),
            gallery: Gallery::new(),
            credits: CreditsMeter::new(store),
            login_requested: false,
            lightbox: None,
            pending_delete: None,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<AuthUser>) {
        self.user = user;
    }

    pub fn gallery(&self) -> &[GalleryImage] {
        self.gallery.images()
    }

    pub fn credits(&self) -> &CreditsMeter {
        &self.credits
    }

    pub fn credits_mut(&mut self) -> &mut CreditsMeter {
        &mut self.credits
    }

    /// True when an action hit the login gate. Cleared once the login
    /// screen has been shown.
    pub fn login_requested(&self) -> bool {
        self.login_requested
    }

    pub fn clear_login_request(&mut self) {
        self.login_requested = false;
    }

    fn require_user(&mut self) -> Result<AuthUser, AppError> {
        match &self.user {
            Some(user) => Ok(user.clone()),
            None => {
                self.login_requested = true;
                Err(AppError::AuthRequired)
            }
        }
    }

    /// Accept a dropped file. Without a logged-in user this opens the
    /// login gate and sets no error message; with one, a non-image type is
    /// rejected with an inline validation error.
    pub fn select_file(&mut self, data: SelectedFileData) -> Result<(), AppError> {
        self.require_user()?;
        self.session.select(data)
    }

    /// Clear the current selection and everything derived from it.
    pub fn remove_selection(&mut self) {
        self.session.remove();
    }

    /// Run the enhancement for the current selection.
    ///
    /// Preconditions, checked in order and reported specifically: a file
    /// must be selected, the user must be logged in, and at least one
    /// enhancement toggle must be on. The backend is only reached once all
    /// three hold. On success two gallery entries are appended (original
    /// first, then the enhanced result tagged with the active toggles) and
    /// one local credit is spent; on failure the selection is kept and the
    /// error is shown for retry.
    pub async fn enhance(&mut self) -> Result<EnhanceResult, AppError> {
        let file = match self.session.selected_file() {
            Some(file) => file.clone(),
            None => {
                self.session.set_error(ERR_NO_FILE);
                return Err(AppError::Validation(ERR_NO_FILE.to_string()));
            }
        };
        let user = self.require_user()?;
        if self.session.toggles.is_empty() {
            self.session.set_error(ERR_NO_ENHANCEMENT);
            return Err(AppError::Validation(ERR_NO_ENHANCEMENT.to_string()));
        }

        let toggles = self.session.toggles;
        self.session.begin_processing()?;
        info!(file = %file.name, "starting enhancement run");

        match self
            .backend
            .upload_and_enhance(&file, &user.email, &toggles)
            .await
        {
            Ok(result) => {
                info!(run_id = %result.run_id, "enhancement run completed");
                self.session.complete(result.enhanced_url.clone());
                self.gallery.append_run(&result, &toggles);
                self.credits.spend();
                Ok(result)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%message, "enhancement run failed");
                self.session.fail(message);
                Err(err)
            }
        }
    }

    /// Replace the in-memory gallery with the backend listing.
    pub async fn refresh_gallery(&mut self) -> Result<(), AppError> {
        let user = self.require_user()?;
        let images = self.backend.fetch_gallery(&user.email).await?;
        self.gallery.replace(images);
        Ok(())
    }

    /// Delete one entry on the backend and install the confirmed listing.
    pub async fn delete_remote(&mut self, key: &str) -> Result<(), AppError> {
        let user = self.require_user()?;
        let images = self.backend.delete_gallery_image(&user.email, key).await?;
        self.gallery.replace(images);
        Ok(())
    }

    // Gallery view modal state.

    pub fn open_lightbox(&mut self, key: &str) {
        if self.gallery.contains_key(key) {
            self.lightbox = Some(key.to_string());
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    pub fn lightbox(&self) -> Option<&str> {
        self.lightbox.as_deref()
    }

    /// First phase of deletion: remember the key pending confirmation.
    pub fn request_delete(&mut self, key: &str) {
        if self.gallery.contains_key(key) {
            self.pending_delete = Some(key.to_string());
        }
    }

    /// Abandon the pending deletion with no side effect.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Second phase: remove the pending entry from the in-memory list by
    /// key. Returns whether an entry was removed.
    pub fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(key) => self.gallery.remove_by_key(&key),
            None => false,
        }
    }
}
