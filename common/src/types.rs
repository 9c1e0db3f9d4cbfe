//! ワークフローで扱う型の定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedFile: 選択中の画像（1枚のみ）
//! - AnalysisResult: /upload のレスポンス
//! - WorkflowState: 画面の状態

use serde::{Deserialize, Serialize};

/// 入力元ファイルのハンドル
///
/// ブラウザでは `web_sys::File`、CLIではメモリ上のバイト列をラップする。
pub trait FileHandle: Clone {
    /// ファイル名（表示用）
    fn name(&self) -> String;

    /// MIMEタイプ（例: "image/jpeg"）
    fn mime_type(&self) -> String;
}

/// 画像の入力元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Picker,
    Drop,
    Camera,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::Picker => "picker",
            InputSource::Drop => "drop",
            InputSource::Camera => "camera",
        }
    }
}

/// 非同期処理（プレビュー生成・送信）の識別子
///
/// 古いチケットを持つ完了イベントは破棄される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// 選択中の画像
#[derive(Debug, Clone)]
pub struct SelectedFile<F> {
    pub file: F,
    pub name: String,
    pub mime_type: String,
    pub source: InputSource,
    /// プレビュー生成のチケット
    pub ticket: Ticket,
}

/// MIMEタイプが画像かどうか
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// パレットの1色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub hex: String,
    pub name: String,
}

/// 解析結果（/upload のJSONレスポンス）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub style_title: String,

    pub style_description: String,

    /// 受信順のまま描画する。省略・null・空配列はいずれも「パレットなし」
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ColorEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// サーバ側で保存されたファイル名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl AnalysisResult {
    /// タイトルに "Error" を含むレスポンスはエラーペイロードとして扱う
    pub fn is_error_payload(&self) -> bool {
        self.style_title.contains("Error")
    }

    pub fn palette(&self) -> &[ColorEntry] {
        self.colors.as_deref().unwrap_or(&[])
    }
}

/// 画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    PreviewReady,
    Submitting,
    ResultShown,
    ErrorShown,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::PreviewReady => "preview-ready",
            WorkflowState::Submitting => "submitting",
            WorkflowState::ResultShown => "result-shown",
            WorkflowState::ErrorShown => "error-shown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/jpeg"));
        assert!(is_image_mime("image/png"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime(""));
        assert!(!is_image_mime("application/image"));
    }

    #[test]
    fn test_error_payload_detection() {
        let result = AnalysisResult {
            style_title: "Error: too dark".to_string(),
            style_description: "Image too dark to analyze".to_string(),
            ..Default::default()
        };
        assert!(result.is_error_payload());

        let result = AnalysisResult {
            style_title: "Bohemian".to_string(),
            ..Default::default()
        };
        assert!(!result.is_error_payload());
    }

    #[test]
    fn test_palette_absent_is_empty() {
        let result = AnalysisResult::default();
        assert!(result.palette().is_empty());
    }

    #[test]
    fn test_analysis_result_serialize_skips_absent_fields() {
        let result = AnalysisResult {
            style_title: "Japandi".to_string(),
            style_description: "Calm".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"style_title\":\"Japandi\""));
        assert!(!json.contains("colors"));
        assert!(!json.contains("filename"));
    }

    #[test]
    fn test_state_default_is_idle() {
        assert_eq!(WorkflowState::default(), WorkflowState::Idle);
        assert_eq!(WorkflowState::Submitting.as_str(), "submitting");
    }
}
