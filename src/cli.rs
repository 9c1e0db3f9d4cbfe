use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interior-style")]
#[command(about = "インテリア写真のスタイル解析クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信してスタイルを解析
    Analyze {
        /// 画像ファイル（複数指定時は先頭のみ使用）
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 解析サーバのURL（例: http://localhost:8000）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// 確認せずに送信
        #[arg(short, long)]
        yes: bool,

        /// レスポンスをJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定の表示・変更
    Config {
        /// 解析サーバのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(short, long)]
        show: bool,
    },

    /// バージョン情報を表示
    Version,
}
