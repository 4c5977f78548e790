//! 本番バックエンド
//!
//! 外部appdランタイムのensureAuthorizedOriginケイパビリティへHTTPで
//! 委譲する。ランタイムの拒否は`authorized:false`として返し、到達
//! 失敗のみ`RuntimeUnavailable`にする。実行中にモックへフォール
//! バックすることはない（選択は起動時の一度きり）。

use super::RuntimeBackend;
use crate::config::RuntimeConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use rofl_logger_common::error::{LoggerError, LoggerResult};
use rofl_logger_common::types::{AuthMethod, AuthResult, BackendKind, Identity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// appdのアイデンティティレスポンス
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    app_id: String,
    node_id: String,
    enclave_id: String,
}

/// ensureAuthorizedOriginサブコールのリクエスト
#[derive(Debug, Serialize)]
struct EnsureAuthorizedOriginRequest<'a> {
    origin: &'a str,
    /// リクエストボディのbase64表現
    data: String,
}

/// ensureAuthorizedOriginサブコールのレスポンス
#[derive(Debug, Deserialize)]
struct EnsureAuthorizedOriginResponse {
    authorized: bool,
    app_id: String,
}

/// 外部appdランタイムへ委譲するバックエンド
pub struct ProductionBackend {
    http_client: Client,
    appd_url: String,
    identity: Identity,
}

impl ProductionBackend {
    /// appdランタイムへ接続し、アイデンティティを取得して初期化する
    ///
    /// ここで失敗した場合、解決済みバックエンドなしでは起動できない
    /// ため呼び出し側はプロセスを中断する。
    pub async fn connect(config: &RuntimeConfig) -> LoggerResult<Self> {
        let http_client = Client::builder()
            .timeout(config.subcall_timeout)
            .build()
            .map_err(|e| LoggerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let url = format!("{}/rofl/v1/identity", config.appd_url);
        debug!("Fetching runtime identity: {}", url);

        let response = http_client.get(&url).send().await.map_err(|e| {
            LoggerError::RuntimeUnavailable(format!("Failed to reach appd runtime: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(LoggerError::RuntimeUnavailable(format!(
                "Runtime identity request failed: HTTP {}",
                response.status()
            )));
        }

        let identity: IdentityResponse = response.json().await.map_err(|e| {
            LoggerError::RuntimeUnavailable(format!("Failed to parse identity response: {}", e))
        })?;

        Ok(Self {
            http_client,
            appd_url: config.appd_url.clone(),
            identity: Identity {
                app_id: identity.app_id,
                node_id: identity.node_id,
                enclave_id: identity.enclave_id,
                backend_kind: BackendKind::Production,
            },
        })
    }

    /// サブコールを1回実行する
    async fn subcall(
        &self,
        origin: &str,
        payload: &[u8],
    ) -> Result<EnsureAuthorizedOriginResponse, reqwest::Error> {
        let url = format!("{}/rofl/v1/ensure-authorized-origin", self.appd_url);
        let request = EnsureAuthorizedOriginRequest {
            origin,
            data: STANDARD.encode(payload),
        };

        self.http_client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<EnsureAuthorizedOriginResponse>()
            .await
    }
}

#[async_trait]
impl RuntimeBackend for ProductionBackend {
    async fn check_authorized_origin(
        &self,
        origin: &str,
        payload: &[u8],
    ) -> LoggerResult<AuthResult> {
        // 接続断・タイムアウトに限り1回だけ再試行する。
        // authorized:false は確定回答なので再試行しない。
        let response = match self.subcall(origin, payload).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                warn!("Runtime subcall failed transiently, retrying once: {}", e);
                self.subcall(origin, payload).await.map_err(|e| {
                    LoggerError::RuntimeUnavailable(format!("Runtime subcall failed: {}", e))
                })?
            }
            Err(e) => {
                return Err(LoggerError::RuntimeUnavailable(format!(
                    "Runtime subcall failed: {}",
                    e
                )));
            }
        };

        Ok(AuthResult {
            authorized: response.authorized,
            origin: origin.to_string(),
            app_id: response.app_id,
            method: AuthMethod::Production,
        })
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }
}
