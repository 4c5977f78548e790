//! ROFL Logger Client CLI

use clap::{Parser, Subcommand};
use rofl_logger_client::RoflClient;
use rofl_logger_common::config::DEFAULT_APP_ID;
use tracing_subscriber::EnvFilter;

/// ROFL Loggerサーバーへ認証付きリクエストを送るCLI
#[derive(Debug, Parser)]
#[command(name = "rofl-logger-client", version, about)]
struct Cli {
    /// サーバーのベースURL
    #[arg(
        long,
        env = "ROFL_LOGGER_ENDPOINT",
        default_value = "http://127.0.0.1:8000"
    )]
    endpoint: String,

    /// アプリケーションID
    #[arg(long, env = "ROFL_LOGGER_APP_ID", default_value = DEFAULT_APP_ID)]
    app_id: String,

    /// 申告するオリジン
    #[arg(
        long,
        env = "ROFL_LOGGER_ORIGIN",
        default_value = "oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk"
    )]
    origin: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// チャットログを認証付きで保存する
    Store {
        /// ユーザー名
        #[arg(long)]
        user: String,
        /// 質問
        #[arg(long)]
        question: String,
        /// 回答
        #[arg(long)]
        answer: String,
    },
    /// サーバーの死活確認
    Health,
    /// サーバーのアイデンティティ情報を表示
    Info,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = match RoflClient::new(&cli.endpoint, &cli.app_id, &cli.origin) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Store {
            user,
            question,
            answer,
        } => client
            .store_chat_log(&user, &question, &answer)
            .await
            .and_then(|response| {
                serde_json::to_string_pretty(&response)
                    .map_err(|e| rofl_logger_common::error::LoggerError::Internal(e.to_string()))
            }),
        Commands::Health => client.health_check().await.and_then(|response| {
            serde_json::to_string_pretty(&response)
                .map_err(|e| rofl_logger_common::error::LoggerError::Internal(e.to_string()))
        }),
        Commands::Info => client.rofl_info().await.and_then(|response| {
            serde_json::to_string_pretty(&response)
                .map_err(|e| rofl_logger_common::error::LoggerError::Internal(e.to_string()))
        }),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
