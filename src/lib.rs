//! インテリア写真スタイル解析クライアント
//!
//! ブラウザ版と同じワークフロー（interior-style-common）をCLIから実行する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod preview;
pub mod report;
pub mod scanner;
pub mod session;

use interior_style_common::VersionInfo;

/// ビルド時に埋め込まれるバージョン情報
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: option_env!("BUILD_NUMBER").unwrap_or("dev").to_string(),
    }
}
