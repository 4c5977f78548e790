//! ヘルス・アイデンティティ情報エンドポイント

use crate::AppState;
use axum::{extract::State, Json};
use rofl_logger_common::protocol::{HealthResponse, RoflInfoResponse};

/// GET /health
///
/// 認証不要の死活確認。
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /rofl-info
///
/// 起動時に確定したアイデンティティを返す読み取り専用API。
pub async fn rofl_info(State(state): State<AppState>) -> Json<RoflInfoResponse> {
    Json(RoflInfoResponse {
        identity: state.gateway.identity().clone(),
    })
}
