//! サーバー設定管理
//!
//! すべて環境変数から読み込む。バックエンド選択はプロセス起動時に
//! 一度だけ行い、以後は変更しない。

use rofl_logger_common::config::{
    get_env_with_fallback_or, get_env_with_fallback_parse, is_production_runtime,
};
use std::path::PathBuf;
use std::time::Duration;

/// デフォルトの鮮度ウィンドウ（秒）
const DEFAULT_MAX_SKEW_SECS: u64 = 300;

/// サーバー待ち受け設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 待ち受けホスト
    pub host: String,
    /// 待ち受けポート
    pub port: u16,
}

impl ServerConfig {
    /// 環境変数から待ち受け設定を読み込む
    pub fn from_env() -> Self {
        let host = get_env_with_fallback_or("ROFL_LOGGER_HOST", "SERVER_HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("ROFL_LOGGER_PORT", "SERVER_PORT", 8000u16);
        Self { host, port }
    }

    /// バインドアドレス文字列を返す
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 認証ゲートウェイ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthConfig {
    /// エンベロープタイムスタンプの許容ずれ（鮮度ウィンドウ）
    pub freshness_window: Duration,
}

impl AuthConfig {
    /// 環境変数からゲートウェイ設定を読み込む
    ///
    /// `ROFL_LOGGER_MAX_SKEW_SECS`（旧: `ROFL_MAX_SKEW_SECS`）。
    /// デフォルトは300秒。
    pub fn from_env() -> Self {
        let secs = get_env_with_fallback_parse(
            "ROFL_LOGGER_MAX_SKEW_SECS",
            "ROFL_MAX_SKEW_SECS",
            DEFAULT_MAX_SKEW_SECS,
        );
        Self {
            freshness_window: Duration::from_secs(secs),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(DEFAULT_MAX_SKEW_SECS),
        }
    }
}

/// ログストア設定
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// チャットログファイルのパス
    pub log_file: PathBuf,
}

impl StoreConfig {
    /// 環境変数からストア設定を読み込む
    pub fn from_env() -> Self {
        let path =
            get_env_with_fallback_or("ROFL_LOGGER_LOG_FILE", "LOG_FILE", "logs/chatlogs.json");
        Self {
            log_file: PathBuf::from(path),
        }
    }
}

/// ランタイムバックエンド設定
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// 本番ランタイムを使うか（falseならモック）
    pub production: bool,
    /// appdランタイムのベースURL（本番のみ使用）
    pub appd_url: String,
    /// サブコールのタイムアウト
    pub subcall_timeout: Duration,
}

impl RuntimeConfig {
    /// 環境変数からバックエンド設定を読み込む
    ///
    /// 選択はプロセス起動時の一度きり。リクエストごとの切り替えや
    /// 実行中のフォールバックは行わない。
    pub fn from_env() -> Self {
        let appd_url = get_env_with_fallback_or(
            "ROFL_LOGGER_APPD_URL",
            "ROFL_APPD_URL",
            "http://127.0.0.1:8899",
        );
        let timeout_secs = get_env_with_fallback_parse(
            "ROFL_LOGGER_SUBCALL_TIMEOUT_SECS",
            "ROFL_SUBCALL_TIMEOUT_SECS",
            10u64,
        );
        Self {
            production: is_production_runtime(),
            appd_url,
            subcall_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
