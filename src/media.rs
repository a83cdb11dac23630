use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{
    config::MediaConfig,
    error::{AppError, AppResult},
};

/// Client for the Cloudinary-style image host. Uploads go through the signed
/// REST endpoint; only the returned URL is ever persisted.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Upload one image into `{root_folder}/{subfolder}` and return its
    /// public URL and id. Any transport or host error surfaces as a generic
    /// upload failure.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        subfolder: &str,
    ) -> AppResult<UploadedImage> {
        let folder = format!("{}/{}", self.config.folder, subfolder);
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", &folder), ("timestamp", &timestamp)]);

        let form = Form::new()
            .part(
                "file",
                Part::bytes(bytes).file_name(filename.to_string()),
            )
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        );
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "image upload rejected");
            return Err(AppError::Upload(format!("media host returned {status}")));
        }

        response
            .json::<UploadedImage>()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))
    }

    /// Remove a previously uploaded image, identified by its stored URL.
    pub async fn destroy(&self, image_url: &str) -> AppResult<()> {
        let public_id = extract_public_id(image_url)
            .ok_or_else(|| AppError::Upload(format!("not a media host URL: {image_url}")))?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", &public_id), ("timestamp", &timestamp)]);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/destroy",
            self.config.cloud_name
        );
        let response = self
            .http
            .post(&url)
            .form(&[
                ("public_id", public_id.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature_algorithm", "sha256"),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?;

        let body = response
            .json::<DestroyResponse>()
            .await
            .map_err(|err| AppError::Upload(err.to_string()))?;
        if body.result != "ok" && body.result != "not found" {
            return Err(AppError::Upload(format!("destroy failed: {}", body.result)));
        }
        Ok(())
    }

    /// SHA-256 signature over the sorted `key=value` parameter string plus
    /// the API secret, per the host's signed-request scheme.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(key, _)| *key);
        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Pull the public id (including folder path) out of a delivery URL:
/// `https://res.example.com/demo/image/upload/v123/ecommerce/products/abc.webp`
/// yields `ecommerce/products/abc`.
pub fn extract_public_id(image_url: &str) -> Option<String> {
    let (_, rest) = image_url.split_once("/upload/")?;
    let rest = rest
        .split_once('/')
        .filter(|(head, _)| {
            head.len() > 1 && head.starts_with('v') && head[1..].chars().all(|c| c.is_ascii_digit())
        })
        .map(|(_, tail)| tail)
        .unwrap_or(rest);
    if rest.is_empty() {
        return None;
    }
    let public_id = match rest.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => stem,
        _ => rest,
    };
    Some(public_id.to_string())
}
