//! File upload to the backend's media store.

use crate::error::{ClientError, Result};
use crate::http::{read_text, send};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Upload client for the audiobook backend.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Upload a file from disk.
    ///
    /// # Returns
    /// The server-assigned media URL.
    pub async fn upload_file(&self, file_path: &Path) -> Result<String> {
        if !file_path.exists() {
            return Err(ClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_name_of(file_path);

        debug!(file = %file_path.display(), "Reading file for upload");

        let mut file = File::open(file_path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        self.upload_bytes(&file_name, contents, mime_type_for_file(file_path))
            .await
    }

    /// Upload an in-memory file.
    ///
    /// # Returns
    /// The server-assigned media URL.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        mime_type: &str,
    ) -> Result<String> {
        let file_size = contents.len();

        let file_part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", file_part);

        let url = format!("{}/generatePath", self.base_url);
        debug!(url = %url, file = %file_name, size = file_size, "Uploading file");

        let response = send(self.http.post(&url).multipart(form)).await?;
        let media_url = read_text(response).await?.trim().to_string();

        info!(file = %file_name, size = file_size, url = %media_url, "File uploaded");
        Ok(media_url)
    }
}

/// File name component of a path, for display and upload metadata.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

/// MIME type derived from the file extension.
pub fn mime_type_for_file(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("m4a" | "aac") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Whether the path looks like an image by extension.
pub fn is_image_file(path: &Path) -> bool {
    mime_type_for_file(path).starts_with("image/")
}
