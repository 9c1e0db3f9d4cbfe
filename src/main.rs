use std::io::IsTerminal;

use clap::Parser;
use interior_style::{cli, client, config, error, report, session, version_info};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { files, endpoint, yes, json } => {
            // --json のときは標準出力をJSON専用にする
            let messages = if json {
                session::MessageTarget::Stderr
            } else {
                session::MessageTarget::Stdout
            };
            messages.line("🛋  interior-style - スタイル解析\n");

            let endpoint = config.resolve_endpoint(
                endpoint.as_deref(),
                std::env::var(config::ENDPOINT_ENV).ok(),
            )?;
            let client = client::UploadClient::new(&endpoint, config.timeout_seconds)?;
            tracing::debug!("endpoint: {}", endpoint);

            let options = session::SessionOptions {
                assume_yes: yes,
                progress: std::io::stderr().is_terminal(),
                messages,
            };
            let outcome = session::run_analyze(&files, &client, &options).await?;

            if json {
                if let Some(analysis) = &outcome.analysis {
                    println!("{}", serde_json::to_string_pretty(analysis)?);
                }
            } else if let Some(result) = &outcome.result {
                println!();
                let color = std::io::stdout().is_terminal();
                for line in report::format_result(result, color) {
                    println!("{}", line);
                }
            }

            let outcome = outcome.into_result()?;
            if outcome.submitted {
                messages.line("\n✅ 解析完了");
            }
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }

        Commands::Version => {
            let version = version_info();
            println!("Version {}", version.version);
            println!("Build {}", version.build);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
