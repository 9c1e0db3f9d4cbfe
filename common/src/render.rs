//! 結果表示モデル
//!
//! 結果領域に描画する内容。前回の結果とマージせず、毎回まるごと置き換える。
//! 文字列はすべてプレーンテキストとして描画すること（マークアップとして解釈しない）。

use crate::types::AnalysisResult;

/// パレット1件の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub hex: String,
    pub name: String,
    /// スウォッチの塗り。CSSの16進カラーとして正しい場合のみ Some
    pub swatch: Option<String>,
}

/// 結果領域の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// エラーペイロード: 説明文のみをエラーメッセージとして表示
    ErrorMessage(String),
    Style {
        title: String,
        description: String,
        palette: Vec<PaletteEntry>,
    },
}

impl ResultView {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::ErrorMessage(_))
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        match self {
            ResultView::Style { palette, .. } => palette,
            ResultView::ErrorMessage(_) => &[],
        }
    }
}

/// 解析結果を表示モデルに変換
pub fn render_result(result: &AnalysisResult) -> ResultView {
    if result.is_error_payload() {
        return ResultView::ErrorMessage(result.style_description.clone());
    }

    let palette = result
        .palette()
        .iter()
        .map(|color| PaletteEntry {
            hex: color.hex.clone(),
            name: color.name.clone(),
            swatch: sanitize_hex(&color.hex),
        })
        .collect();

    ResultView::Style {
        title: result.style_title.clone(),
        description: result.style_description.clone(),
        palette,
    }
}

/// `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa` のみ通す
pub fn sanitize_hex(hex: &str) -> Option<String> {
    let hex = hex.trim();
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 3 | 4 | 6 | 8) {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(hex.to_string())
}
