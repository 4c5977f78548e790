//! 認証ゲートウェイ
//!
//! 受信リクエストのヘッダー抽出からバックエンド認可までを一本の
//! チェーンとして実行する、セキュリティ境界の単一チョークポイント。
//! 拒否はすべて`RejectReason`の値として返し、例外的な失敗として
//! 扱うのはランタイム到達不能のみ。

use crate::config::AuthConfig;
use crate::runtime::RuntimeBackend;
use axum::http::HeaderMap;
use chrono::Utc;
use rofl_logger_common::authenticator::OriginAuthenticator;
use rofl_logger_common::error::{LoggerError, LoggerResult, RejectReason};
use rofl_logger_common::protocol::{HEADER_ORIGIN, HEADER_SIGNATURE, HEADER_TIMESTAMP};
use rofl_logger_common::types::{AuthResult, Identity};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// リクエスト認証ゲートウェイ
pub struct AuthGateway {
    authenticator: OriginAuthenticator,
    backend: Arc<dyn RuntimeBackend>,
    config: AuthConfig,
}

impl AuthGateway {
    /// 新しいAuthGatewayを作成
    ///
    /// `app_id`はバックエンドのアイデンティティから取るため、署名の
    /// 再計算とバックエンド認可が必ず同じアプリIDを見る。
    pub fn new(backend: Arc<dyn RuntimeBackend>, config: AuthConfig) -> Self {
        let authenticator = OriginAuthenticator::new(backend.identity().app_id.clone());
        Self {
            authenticator,
            backend,
            config,
        }
    }

    /// アプリのアイデンティティを返す
    pub fn identity(&self) -> &Identity {
        self.backend.identity()
    }

    /// 受信リクエストを認証する
    ///
    /// 1. `X-ROFL-Origin` / `X-ROFL-Signature` の欠落 → `MissingCredentials`
    ///    （バックエンドは呼ばない）
    /// 2. ボディがJSONでない → `PayloadError`
    /// 3. タイムスタンプが鮮度ウィンドウ外 → `StaleRequest`
    /// 4. 署名不一致 → `SignatureMismatch`
    /// 5. バックエンド非認可 → `OriginNotAuthorized`
    ///
    /// 5段すべて通過した場合のみ`authorized:true`の結果を返す。
    /// 拒否ログにはオリジンと理由のみ残し、署名・ペイロードは出さない。
    pub async fn authenticate_request(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> LoggerResult<AuthResult> {
        // 1. 資格情報ヘッダーの抽出
        let origin = header_str(headers, HEADER_ORIGIN);
        let signature = header_str(headers, HEADER_SIGNATURE);
        let (origin, signature) = match (origin, signature) {
            (Some(origin), Some(signature)) => (origin, signature),
            _ => {
                warn!("Rejected request: reason={}", RejectReason::MissingCredentials);
                return Err(LoggerError::Rejected(RejectReason::MissingCredentials));
            }
        };

        // 2. ペイロードの解釈（認可チェックより前）
        let payload: Value = match serde_json::from_slice(raw_body) {
            Ok(payload) => payload,
            Err(_) => {
                warn!(
                    "Rejected request: origin={} reason={}",
                    origin,
                    RejectReason::PayloadError
                );
                return Err(LoggerError::Rejected(RejectReason::PayloadError));
            }
        };

        // 3. 鮮度チェック。署名スキームにはノンスが無いため、
        //    タイムスタンプでリプレイ可能期間を制限する。
        if !self.is_fresh(headers) {
            warn!(
                "Rejected request: origin={} reason={}",
                origin,
                RejectReason::StaleRequest
            );
            return Err(LoggerError::Rejected(RejectReason::StaleRequest));
        }

        // 4. 署名検証（定数時間比較）
        if !self.authenticator.verify(origin, signature, &payload) {
            warn!(
                "Rejected request: origin={} reason={}",
                origin,
                RejectReason::SignatureMismatch
            );
            return Err(LoggerError::Rejected(RejectReason::SignatureMismatch));
        }

        // 5. バックエンドによるオリジン認可
        let result = self.backend.check_authorized_origin(origin, raw_body).await?;
        if !result.authorized {
            warn!(
                "Rejected request: origin={} reason={} method={}",
                origin,
                RejectReason::OriginNotAuthorized,
                result.method
            );
            return Err(LoggerError::Rejected(RejectReason::OriginNotAuthorized));
        }

        debug!("Authenticated request: origin={} method={}", origin, result.method);
        Ok(result)
    }

    /// タイムスタンプヘッダーが鮮度ウィンドウ内か判定する
    ///
    /// ヘッダーの欠落・解釈不能は鮮度を確認できないためstale扱い。
    fn is_fresh(&self, headers: &HeaderMap) -> bool {
        let Some(timestamp) = header_str(headers, HEADER_TIMESTAMP).and_then(|v| v.parse::<i64>().ok())
        else {
            return false;
        };

        let skew = (Utc::now().timestamp() - timestamp).unsigned_abs();
        skew <= self.config.freshness_window.as_secs()
    }
}

/// ヘッダー値を文字列として取得する
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
