//! ROFL Logger Client
//!
//! 認証エンベロープを付与してログ保存APIを呼び出すクライアント

#![warn(missing_docs)]

use rofl_logger_common::authenticator::OriginAuthenticator;
use rofl_logger_common::error::{LoggerError, LoggerResult};
use rofl_logger_common::protocol::{HealthResponse, RoflInfoResponse, StoreResponse};
use rofl_logger_common::types::ChatLog;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// ログ保存リクエストのタイムアウト
const STORE_TIMEOUT: Duration = Duration::from_secs(30);
/// ヘルスチェックのタイムアウト
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// ROFL Loggerサーバーへの認証付きクライアント
pub struct RoflClient {
    endpoint: String,
    origin: String,
    authenticator: OriginAuthenticator,
    http_client: Client,
}

impl RoflClient {
    /// 新しいRoflClientを作成
    ///
    /// # Arguments
    /// * `endpoint` - サーバーのベースURL（例: "http://127.0.0.1:8000"）
    /// * `app_id` - アプリケーションID（サーバーと一致している必要がある）
    /// * `origin` - このクライアントが申告するオリジン
    pub fn new(
        endpoint: impl Into<String>,
        app_id: impl Into<String>,
        origin: impl Into<String>,
    ) -> LoggerResult<Self> {
        let http_client = Client::builder()
            .timeout(STORE_TIMEOUT)
            .build()
            .map_err(|e| LoggerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            origin: origin.into(),
            authenticator: OriginAuthenticator::new(app_id),
            http_client,
        })
    }

    /// チャットログを認証付きで保存する
    ///
    /// ペイロードに署名した4つの`X-ROFL-*`ヘッダーを付与して
    /// `POST /store`を呼ぶ。
    pub async fn store_chat_log(
        &self,
        user: &str,
        question: &str,
        answer: &str,
    ) -> LoggerResult<StoreResponse> {
        let payload = ChatLog {
            user: user.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        };

        let envelope = self.authenticator.create_envelope(&self.origin, &payload)?;

        let url = format!("{}/store", self.endpoint);
        debug!("Storing chat log: {}", url);

        let mut request = self.http_client.post(&url).json(&payload);
        for (name, value) in envelope.header_pairs() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LoggerError::Http(format!("Store request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LoggerError::Http(format!(
                "Store request failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<StoreResponse>()
            .await
            .map_err(|e| LoggerError::Http(format!("Failed to parse store response: {}", e)))
    }

    /// サーバーの死活確認
    pub async fn health_check(&self) -> LoggerResult<HealthResponse> {
        let url = format!("{}/health", self.endpoint);
        debug!("Checking server health: {}", url);

        let response = self
            .http_client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| LoggerError::Http(format!("Health check failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LoggerError::Http(format!(
                "Health check failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| LoggerError::Http(format!("Failed to parse health response: {}", e)))
    }

    /// サーバーのアイデンティティ情報を取得
    pub async fn rofl_info(&self) -> LoggerResult<RoflInfoResponse> {
        let url = format!("{}/rofl-info", self.endpoint);

        let response = self
            .http_client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| LoggerError::Http(format!("Info request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LoggerError::Http(format!(
                "Info request failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<RoflInfoResponse>()
            .await
            .map_err(|e| LoggerError::Http(format!("Failed to parse info response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_APP_ID: &str = "rofl1qpuexjnfplvvwzdcm9vajanphs8mfzp9sqw9yz87";
    const TEST_ORIGIN: &str = "oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk";

    #[tokio::test]
    async fn store_chat_log_sends_all_auth_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/store"))
            .and(header_exists("X-ROFL-Origin"))
            .and(header_exists("X-ROFL-Signature"))
            .and(header_exists("X-ROFL-Timestamp"))
            .and(header_exists("X-ROFL-App-ID"))
            .and(body_json(json!({
                "user": "alice",
                "question": "q",
                "answer": "a",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "auth_method": "mock",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RoflClient::new(server.uri(), TEST_APP_ID, TEST_ORIGIN).unwrap();
        let response = client.store_chat_log("alice", "q", "a").await.unwrap();

        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn store_chat_log_surfaces_rejection_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/store"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "reason": "origin_not_authorized",
                "message": "Origin not authorized",
            })))
            .mount(&server)
            .await;

        let client = RoflClient::new(server.uri(), TEST_APP_ID, "oasis1bad").unwrap();
        let result = client.store_chat_log("alice", "q", "a").await;

        assert!(matches!(result, Err(LoggerError::Http(_))));
    }

    #[tokio::test]
    async fn health_check_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "version": "0.1.0",
            })))
            .mount(&server)
            .await;

        let client = RoflClient::new(server.uri(), TEST_APP_ID, TEST_ORIGIN).unwrap();
        let health = client.health_check().await.unwrap();

        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn endpoint_trailing_slash_is_normalized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "version": "0.1.0",
            })))
            .mount(&server)
            .await;

        let endpoint = format!("{}/", server.uri());
        let client = RoflClient::new(endpoint, TEST_APP_ID, TEST_ORIGIN).unwrap();
        assert!(client.health_check().await.is_ok());
    }
}
