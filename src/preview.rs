//! ローカルプレビュー
//!
//! ブラウザの FileReader.readAsDataURL に相当する。CLIでは画像をデコードして
//! サイズを確認し、Data URL を作る。

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::scanner::LocalImage;

#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

pub fn decode_preview(file: &LocalImage) -> Result<Preview, String> {
    let decoded = image::load_from_memory(&file.bytes).map_err(|e| e.to_string())?;

    Ok(Preview {
        width: decoded.width(),
        height: decoded.height(),
        data_url: to_data_url(&file.mime_type, &file.bytes),
    })
}

pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn local(name: &str, mime: &str, bytes: Vec<u8>) -> LocalImage {
        LocalImage {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            bytes: Arc::new(bytes),
        }
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_decode_preview() {
        let preview = decode_preview(&local("room.png", "image/png", png_bytes(4, 3))).unwrap();
        assert_eq!((preview.width, preview.height), (4, 3));
        assert!(preview.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_decode_preview_corrupt() {
        let corrupt = local("room.jpg", "image/jpeg", b"not an image".to_vec());
        assert!(decode_preview(&corrupt).is_err());
    }
}
