//! 解析結果のターミナル表示

use interior_style_common::{PaletteEntry, ResultView};

/// 結果を表示用の行に変換
///
/// `color` が true の場合、スウォッチを24bitカラーの背景で描く。
pub fn format_result(result: &ResultView, color: bool) -> Vec<String> {
    match result {
        ResultView::ErrorMessage(message) => vec![format!("✖ {}", message)],
        ResultView::Style {
            title,
            description,
            palette,
        } => {
            let mut lines = vec![format!("🛋  {}", title), format!("   {}", description)];
            if !palette.is_empty() {
                lines.push(String::new());
                lines.push("   カラーパレット:".to_string());
                lines.extend(palette.iter().map(|entry| format_entry(entry, color)));
            }
            lines
        }
    }
}

fn format_entry(entry: &PaletteEntry, color: bool) -> String {
    let swatch = match (color, entry.swatch.as_deref().and_then(parse_rgb)) {
        (true, Some((r, g, b))) => format!("\x1b[48;2;{};{};{}m    \x1b[0m", r, g, b),
        _ => "    ".to_string(),
    };
    format!("   {} {:<9} {}", swatch, entry.hex, entry.name)
}

/// `#rgb` / `#rrggbb`（アルファ付きも可）をRGBに変換
fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 | 4 => {
            let expand = |c: &str| channel(&c.repeat(2));
            Some((expand(&digits[0..1])?, expand(&digits[1..2])?, expand(&digits[2..3])?))
        }
        6 | 8 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}
