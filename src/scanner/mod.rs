//! ローカル画像の読み込み
//!
//! MIMEタイプは拡張子から推定する。画像かどうかの判定はワークフロー側で行うため、
//! ここでは非画像ファイルもそのまま読み込む。

use crate::error::{InteriorStyleError, Result};
use interior_style_common::FileHandle;
use std::path::Path;
use std::sync::Arc;

/// メモリ上に読み込んだファイル
#[derive(Debug, Clone)]
pub struct LocalImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<Vec<u8>>,
}

impl FileHandle for LocalImage {
    fn name(&self) -> String {
        self.file_name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("avif", "image/avif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// 拡張子からMIMEタイプを推定（大文字小文字は区別しない）
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if let Some((_, mime)) = IMAGE_TYPES.iter().find(|(e, _)| *e == ext) {
        return mime;
    }
    match ext.as_str() {
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

pub fn load_image(path: &Path) -> Result<LocalImage> {
    if !path.is_file() {
        return Err(InteriorStyleError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LocalImage {
        file_name,
        mime_type: mime_from_path(path).to_string(),
        bytes: Arc::new(bytes),
    })
}
