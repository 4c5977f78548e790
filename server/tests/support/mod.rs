//! 統合テスト用ヘルパー
//!
//! 一時ディレクトリのログストアとスタブバックエンドでアプリを組み立てる。

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use rofl_logger_common::authenticator::OriginAuthenticator;
use rofl_logger_common::config::get_app_id;
use rofl_logger_common::error::LoggerResult;
use rofl_logger_common::types::{AuthResult, Identity};
use rofl_logger_server::config::AuthConfig;
use rofl_logger_server::gateway::AuthGateway;
use rofl_logger_server::runtime::{RuntimeBackend, SimulatedBackend};
use rofl_logger_server::store::FileLogStore;
use rofl_logger_server::{api, AppState};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// モック/シミュレート許可リストに載っているオリジン
pub const ALLOWED_ORIGIN: &str = "oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk";

/// バックエンド呼び出し回数を数えるラッパー
///
/// 「このエンドポイントはバックエンドに触れない」系の検証に使う。
pub struct CountingBackend {
    inner: SimulatedBackend,
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self {
            inner: SimulatedBackend::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RuntimeBackend for CountingBackend {
    async fn check_authorized_origin(
        &self,
        origin: &str,
        payload: &[u8],
    ) -> LoggerResult<AuthResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.check_authorized_origin(origin, payload).await
    }

    fn identity(&self) -> &Identity {
        self.inner.identity()
    }
}

/// テスト用アプリを組み立てる
///
/// シミュレートバックエンド + 一時ファイルストア。
pub async fn create_test_app() -> (Router, TempDir, PathBuf) {
    create_test_app_with_backend(Arc::new(SimulatedBackend::new())).await
}

/// バックエンドを指定してテスト用アプリを組み立てる
pub async fn create_test_app_with_backend(
    backend: Arc<dyn RuntimeBackend>,
) -> (Router, TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let log_file = dir.path().join("chatlogs.json");

    let store = FileLogStore::new(&log_file).await.expect("create log store");
    let gateway = AuthGateway::new(backend, AuthConfig::default());

    let state = AppState {
        gateway: Arc::new(gateway),
        store: Arc::new(store),
    };

    (api::create_router(state), dir, log_file)
}

/// 署名済みのPOST /storeリクエストを構築する
pub fn signed_store_request(origin: &str, payload: &Value) -> Request<Body> {
    let authenticator = OriginAuthenticator::new(get_app_id());
    let envelope = authenticator
        .create_envelope(origin, payload)
        .expect("create envelope");

    let mut builder = Request::builder()
        .method("POST")
        .uri("/store")
        .header("content-type", "application/json");
    for (name, value) in envelope.header_pairs() {
        builder = builder.header(name, value);
    }

    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

/// 保存済みログ配列を読み出す
pub fn read_stored_entries(path: &PathBuf) -> Vec<Value> {
    match std::fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("log file should be a JSON array"),
        Err(_) => Vec::new(),
    }
}
