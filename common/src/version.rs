//! バージョン表示

use serde::{Deserialize, Deserializer, Serialize};

/// ページに埋め込まれるバージョン情報（`APP_VERSION`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(deserialize_with = "text_or_number")]
    pub version: String,
    #[serde(deserialize_with = "text_or_number")]
    pub build: String,
}

/// ビルド番号は数値で埋め込まれることがある
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Int(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
    })
}

impl VersionInfo {
    /// 埋め込み値がない場合のフォールバック
    pub fn fallback(version: &str) -> Self {
        Self {
            version: version.to_string(),
            build: "dev".to_string(),
        }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} (build {})", self.version, self.build)
    }
}
