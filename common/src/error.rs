//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 必須フィールドの欠落・型不一致など、レスポンスの契約違反
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_invalid_response() {
        let error = Error::InvalidResponse("missing field `style_title`".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid response: missing field `style_title`"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidResponse("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidResponse"));
        assert!(debug.contains("テスト"));
    }
}
