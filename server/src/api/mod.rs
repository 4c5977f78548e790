//! REST APIハンドラー
//!
//! ログ保存、ヘルスチェック、アイデンティティ情報

/// APIエラーレスポンス型
pub mod error;

/// ログ保存エンドポイント
pub mod store;

/// ヘルス・アイデンティティ情報エンドポイント
pub mod system;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
///
/// `/store-public`は意図的に認証を通さない独立ルート。認証失敗時の
/// フォールバック先ではない。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/store", post(store::store_log))
        .route("/store-public", post(store::store_log_public))
        .route("/health", get(system::health))
        .route("/rofl-info", get(system::rofl_info))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
