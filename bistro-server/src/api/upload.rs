//! Image upload: multipart → validate → write under the upload dir
//!
//! Files are served back from `/uploads/<name>`.

use std::path::Path;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use image::ImageFormat;
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};

use crate::state::AppState;
use crate::util::upload_file_name;

use super::ApiResult;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Multipart field carrying the file
const FILE_FIELD: &str = "image";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub image_url: String,
}

/// Check name and content; returns the lowercased extension to store under
pub fn check_image(file_name: &str, data: &[u8]) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::NoFileProvided));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {MAX_FILE_SIZE})", data.len()),
        ));
    }

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            "Only images are allowed (jpg, jpeg, png, webp)",
        ));
    }

    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP) => Ok(ext),
        Ok(other) => Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!("Unsupported image content: {other:?}"),
        )),
        Err(_) => Err(AppError::new(ErrorCode::InvalidImageFile)),
    }
}

/// POST /api/upload
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<UploadPayload> {
    let mut multipart = multipart.map_err(AppError::from)?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
        })?;
        upload = Some((file_name, data.to_vec()));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    let ext = check_image(&file_name, &data)?;

    let image_url = store_image(&state.upload_dir, &ext, &data).await?;
    Ok(ApiResponse::success_with_message(
        "Image uploaded",
        UploadPayload { image_url },
    ))
}

/// Write a checked image under `dir`; returns its public URL
pub async fn store_image(dir: &Path, ext: &str, data: &[u8]) -> Result<String, AppError> {
    let stored_name = upload_file_name(shared::util::now_millis(), ext);
    let path = dir.join(&stored_name);
    tokio::fs::write(&path, data).await.map_err(|e| {
        tracing::error!(path = %path.display(), "Failed to store upload: {e}");
        AppError::new(ErrorCode::FileStorageFailed)
    })?;

    tracing::info!(file = %stored_name, size = data.len(), "Image uploaded");
    Ok(format!("/uploads/{stored_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_accepts_png() {
        assert_eq!(check_image("Terrace.PNG", PNG_MAGIC).unwrap(), "png");
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let err = check_image("menu.pdf", PNG_MAGIC).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
    }

    #[test]
    fn test_rejects_non_image_content() {
        let err = check_image("photo.jpg", b"definitely not an image").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[test]
    fn test_rejects_oversized_file() {
        let mut data = PNG_MAGIC.to_vec();
        data.resize(MAX_FILE_SIZE + 1, 0);
        let err = check_image("big.png", &data).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
    }

    #[tokio::test]
    async fn test_store_image_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = store_image(dir.path(), "png", PNG_MAGIC).await.unwrap();

        let name = url.strip_prefix("/uploads/").unwrap();
        assert!(name.ends_with(".png"));
        let written = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(written, PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_store_image_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = store_image(&missing, "png", PNG_MAGIC).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileStorageFailed);
    }

    #[test]
    fn test_rejects_empty_file() {
        let err = check_image("empty.png", &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoFileProvided);
    }
}
