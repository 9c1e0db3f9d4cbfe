use crate::error::{InteriorStyleError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 解析サーバのURLを上書きする環境変数
pub const ENDPOINT_ENV: &str = "INTERIOR_STYLE_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".into(),
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InteriorStyleError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("interior-style").join("config.json"))
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        self.endpoint = validate_endpoint(&endpoint)?;
        self.save()
    }

    /// 送信先を決める（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_endpoint(&self, cli: Option<&str>, env: Option<String>) -> Result<String> {
        let endpoint = cli
            .map(str::to_string)
            .or(env.filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| self.endpoint.clone());
        validate_endpoint(&endpoint)
    }
}

/// http(s) のURLのみ受け付け、末尾のスラッシュは落とす
fn validate_endpoint(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(InteriorStyleError::Config(format!(
            "エンドポイントは http:// または https:// で始まる必要があります: {}",
            endpoint
        )));
    }
    Ok(endpoint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"endpoint":"https://styles.example"}"#).unwrap();
        assert_eq!(config.endpoint, "https://styles.example");
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_resolve_endpoint_priority() {
        let config = Config::default();

        let endpoint = config
            .resolve_endpoint(Some("http://cli:1/"), Some("http://env:2".into()))
            .unwrap();
        assert_eq!(endpoint, "http://cli:1");

        let endpoint = config.resolve_endpoint(None, Some("http://env:2".into())).unwrap();
        assert_eq!(endpoint, "http://env:2");

        let endpoint = config.resolve_endpoint(None, Some("  ".into())).unwrap();
        assert_eq!(endpoint, "http://localhost:8000");
    }

    #[test]
    fn test_resolve_endpoint_rejects_other_schemes() {
        let config = Config::default();
        let err = config.resolve_endpoint(Some("ftp://host"), None).unwrap_err();
        assert!(matches!(err, InteriorStyleError::Config(_)));
    }
}
