//! APIレスポンスパーサー
//!
//! /upload のレスポンスは外部の未検証な契約として扱う。
//! 必須フィールドが欠けていれば `Error::InvalidResponse` を返し、
//! 未定義の値を描画することはない。

use serde::Deserialize;
use serde_json::error::Category;

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// 成功レスポンス（2xx）のボディをパース
///
/// # Arguments
/// * `body` - レスポンスボディ（JSON文字列）
///
/// # Returns
/// * `Ok(AnalysisResult)` - パース成功
/// * `Err(Error::InvalidResponse)` - 必須フィールドの欠落・型不一致
/// * `Err(Error::Json)` - JSONとして不正
///
/// # Examples
/// ```
/// use interior_style_common::parse_analysis_response;
///
/// let body = r#"{"style_title":"Bohemian","style_description":"Eclectic mix"}"#;
/// let result = parse_analysis_response(body).unwrap();
/// assert_eq!(result.style_title, "Bohemian");
/// assert!(result.palette().is_empty());
/// ```
pub fn parse_analysis_response(body: &str) -> Result<AnalysisResult> {
    serde_json::from_str::<AnalysisResult>(body.trim()).map_err(|e| match e.classify() {
        Category::Data => Error::InvalidResponse(e.to_string()),
        _ => Error::Json(e),
    })
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// エラーレスポンスから `{"detail": "..."}` を取り出す
pub fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorDetail>(body.trim())
        .ok()
        .map(|d| d.detail)
        .filter(|d| !d.trim().is_empty())
}

/// 非2xxレスポンスの通知メッセージ
///
/// ステータスコードは必ず含める。サーバが detail を返した場合は後ろに付ける。
pub fn http_failure_message(status: u16, body: &str) -> String {
    match parse_error_detail(body) {
        Some(detail) => format!("Server responded with {}: {}", status, detail),
        None => format!("Server responded with {}", status),
    }
}
