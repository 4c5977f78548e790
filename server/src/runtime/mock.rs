//! モックバックエンド
//!
//! コンパイル時許可リストでオリジンを判定する。外部システムには一切
//! 接続しない。本番フラグが立っていない限りこの実装が選ばれる。

use super::RuntimeBackend;
use async_trait::async_trait;
use rofl_logger_common::config;
use rofl_logger_common::error::LoggerResult;
use rofl_logger_common::types::{AuthMethod, AuthResult, BackendKind, Identity};

/// ローカル判定で認可するオリジンの固定リスト
pub const AUTHORIZED_ORIGINS: &[&str] = &["oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk"];

/// モック用ノードID
const MOCK_NODE_ID: &str = "1owPK3eT21k0ajRG7VfHRgp4JPXobCQtzuglz6ZSJis=";
/// モック用エンクレーブID
const MOCK_ENCLAVE_ID: &str = "EmZmEyPSO+GuZrhy2J/4CujH3a1GEz2JXOJ460ZX44Y=";

/// ローカル開発・テスト用バックエンド
#[derive(Debug, Clone)]
pub struct MockBackend {
    identity: Identity,
}

impl MockBackend {
    /// 新しいMockBackendを作成
    pub fn new() -> Self {
        Self {
            identity: Identity {
                app_id: config::get_app_id(),
                node_id: MOCK_NODE_ID.to_string(),
                enclave_id: MOCK_ENCLAVE_ID.to_string(),
                backend_kind: BackendKind::Mock,
            },
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeBackend for MockBackend {
    async fn check_authorized_origin(
        &self,
        origin: &str,
        _payload: &[u8],
    ) -> LoggerResult<AuthResult> {
        // 許可リストにあるオリジンのみ認可する。リスト外に対して
        // authorized:true を返すことは決してない。
        let authorized = AUTHORIZED_ORIGINS.contains(&origin);

        Ok(AuthResult {
            authorized,
            origin: origin.to_string(),
            app_id: self.identity.app_id.clone(),
            method: AuthMethod::Mock,
        })
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }
}
