//! ログ保存エンドポイント
//!
//! `/store`は認証ゲートウェイを通過したリクエストのみ受け付ける。
//! `/store-public`は明示的な公開ルートで、バックエンドには一切
//! 触れない。

use super::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use chrono::Utc;
use rofl_logger_common::error::{LoggerError, RejectReason};
use rofl_logger_common::protocol::StoreResponse;
use rofl_logger_common::types::ChatLog;
use tracing::info;

/// POST /store
///
/// 認証チェーン（資格情報→ペイロード→鮮度→署名→オリジン認可）を
/// すべて通過した場合のみ、サーバー側タイムスタンプを付与して
/// ストアへ転送する。
pub async fn store_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StoreResponse>, AppError> {
    let auth = state.gateway.authenticate_request(&headers, &body).await?;

    let entry = parse_chat_log(&body)?;
    state
        .store
        .append(entry.into_stored_entry(Utc::now()))
        .await?;

    info!(
        "Stored chat log: origin={} method={}",
        auth.origin, auth.method
    );
    Ok(Json(StoreResponse::authenticated(auth.method)))
}

/// POST /store-public
///
/// 認証なしの明示的な公開エンドポイント。同じペイロード形式を無条件で
/// 保存する。RuntimeBackendは呼ばない。
pub async fn store_log_public(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoreResponse>, AppError> {
    let entry = parse_chat_log(&body)?;
    state
        .store
        .append(entry.into_stored_entry(Utc::now()))
        .await?;

    info!("Stored chat log via public endpoint");
    Ok(Json(StoreResponse::public()))
}

/// ボディをChatLogとして解釈する
fn parse_chat_log(body: &Bytes) -> Result<ChatLog, AppError> {
    serde_json::from_slice(body)
        .map_err(|_| AppError(LoggerError::Rejected(RejectReason::PayloadError)))
}
