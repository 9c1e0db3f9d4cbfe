use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteriorStyleError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    /// 画像として受け付けられなかった
    #[error("選択が拒否されました: {0}")]
    Rejected(String),

    /// ワークフローが ErrorShown で終わった
    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error(transparent)]
    Common(#[from] interior_style_common::Error),
}

pub type Result<T> = std::result::Result<T, InteriorStyleError>;
