//! Domain methods for the PixeLift backend client.
//!
//! The enhancement protocol is two sequential calls against a fixed
//! backend contract: a multipart upload that yields a stored `file_url`
//! and a server-issued `run_id`, then a JSON enhance call that yields the
//! original/enhanced URL pair. The two calls are never collapsed into one.

use crate::{server_error_message, ApiClient};
use pixelift_core::models::{flag_str, EnhanceResult, EnhancementSelection, GalleryImage, SelectedFileData};
use pixelift_core::AppError;
use serde::Deserialize;
use tracing::debug;

const UPLOAD_FAILED: &str = "Upload failed";
const ENHANCE_FAILED: &str = "Enhancement failed";
const NON_JSON: &str = "Server returned non-JSON";
const MISSING_DATA: &str = "Missing enhancement data from server";
const GALLERY_FAILED: &str = "Failed to load gallery";

/// Upload step response. Both fields are read tolerantly; only `file_url`
/// is required to proceed.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_url: Option<String>,
    run_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    data: Option<EnhanceData>,
    #[serde(default)]
    plots: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EnhanceData {
    original_url: Option<String>,
    enhanced_url: Option<String>,
    run_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GalleryResponse {
    images: Option<Vec<GalleryImage>>,
}

impl ApiClient {
    /// Run the full two-step enhancement protocol for one file.
    ///
    /// Step one uploads the file with the enhancement flags as literal
    /// "true"/"false" multipart fields; step two requests the enhancement
    /// against the stored `file_url`. Failures at either step surface the
    /// most specific message available and nothing is retried.
    pub async fn upload_and_enhance(
        &self,
        file: &SelectedFileData,
        email: &str,
        selection: &EnhancementSelection,
    ) -> Result<EnhanceResult, AppError> {
        let upload = self.upload(file, email, selection).await?;
        self.enhance(&upload, email, selection).await
    }

    async fn upload(
        &self,
        file: &SelectedFileData,
        email: &str,
        selection: &EnhancementSelection,
    ) -> Result<UploadResponse, AppError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("email", email.to_string())
            .text("face", flag_str(selection.face))
            .text("background", flag_str(selection.background))
            .text("text", flag_str(selection.text))
            .text("colorization", flag_str(selection.colorization));

        let response = self
            .client()
            .post(self.build_url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        debug!(%status, "upload response received");

        if !status.is_success() {
            return Err(AppError::Api(server_error_message(&body, UPLOAD_FAILED)));
        }

        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|_| AppError::Api(UPLOAD_FAILED.to_string()))?;
        let usable = parsed.file_url.as_deref().is_some_and(|u| !u.is_empty());
        if usable {
            Ok(parsed)
        } else {
            Err(AppError::Api(UPLOAD_FAILED.to_string()))
        }
    }

    async fn enhance(
        &self,
        upload: &UploadResponse,
        email: &str,
        selection: &EnhancementSelection,
    ) -> Result<EnhanceResult, AppError> {
        let body = serde_json::json!({
            "file_url": upload.file_url,
            "email": email,
            "run_id": upload.run_id.clone().unwrap_or_default(),
            "face": selection.face,
            "background": selection.background,
            "text": selection.text,
            "colorization": selection.colorization,
        });

        let response = self
            .client()
            .post(self.build_url("/enhance"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        debug!(%status, "enhance response received");

        if !status.is_success() {
            return Err(AppError::Api(server_error_message(&text, ENHANCE_FAILED)));
        }

        let parsed: EnhanceResponse =
            serde_json::from_str(&text).map_err(|_| AppError::Api(NON_JSON.to_string()))?;

        let data = parsed.data.ok_or_else(|| AppError::Api(MISSING_DATA.to_string()))?;
        let (original_url, enhanced_url, run_id) = match (data.original_url, data.enhanced_url, data.run_id) {
            (Some(o), Some(e), Some(r)) => (o, e, r),
            _ => return Err(AppError::Api(MISSING_DATA.to_string())),
        };

        // Anything other than an array of strings collapses to empty.
        let plots = parsed
            .plots
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|p| p.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(EnhanceResult {
            original_url,
            enhanced_url,
            run_id,
            plots,
        })
    }

    /// Fetch the user's gallery listing.
    pub async fn fetch_gallery(&self, email: &str) -> Result<Vec<GalleryImage>, AppError> {
        let response = self
            .client()
            .get(self.build_url("/gallery"))
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.gallery_listing(response).await
    }

    /// Delete one gallery entry by its opaque key and return the updated,
    /// server-authoritative listing. There is no optimistic local removal:
    /// callers wait for this list.
    pub async fn delete_gallery_image(
        &self,
        email: &str,
        key: &str,
    ) -> Result<Vec<GalleryImage>, AppError> {
        let response = self
            .client()
            .delete(self.build_url("/gallery"))
            .json(&serde_json::json!({ "email": email, "key": key }))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.gallery_listing(response).await
    }

    async fn gallery_listing(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<GalleryImage>, AppError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        debug!(%status, "gallery response received");

        if !status.is_success() {
            return Err(AppError::Api(server_error_message(&body, GALLERY_FAILED)));
        }

        let parsed: GalleryResponse =
            serde_json::from_str(&body).map_err(|_| AppError::Api(GALLERY_FAILED.to_string()))?;
        parsed
            .images
            .ok_or_else(|| AppError::Api(GALLERY_FAILED.to_string()))
    }
}
