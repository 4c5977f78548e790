//! ROFL Logger Server
//!
//! オリジン認証付きチャットログ保存サービス

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 設定管理（環境変数）
pub mod config;

/// 認証ゲートウェイ（リクエスト検証の単一チョークポイント）
pub mod gateway;

/// ランタイムバックエンド（mock / simulated / production）
pub mod runtime;

/// ログ永続化
pub mod store;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 認証ゲートウェイ
    pub gateway: Arc<gateway::AuthGateway>,
    /// ログストア
    pub store: Arc<dyn store::LogStore>,
}
