//! シミュレートバックエンド
//!
//! 本番と同じ形のレスポンスをインプロセスで返すスタブ。本番ランタイム
//! なしで統合テストを回すために使う。`method: simulated`を返すので、
//! テスト側はどのコードパスが実行されたかを検証できる。
//! 環境変数では選択されない（テストコードが直接構築する）。

use super::{mock::AUTHORIZED_ORIGINS, RuntimeBackend};
use async_trait::async_trait;
use rofl_logger_common::config;
use rofl_logger_common::error::LoggerResult;
use rofl_logger_common::types::{AuthMethod, AuthResult, BackendKind, Identity};
use std::collections::HashMap;

/// 統合テスト用のスタブバックエンド
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    identity: Identity,
    answers: HashMap<String, bool>,
}

impl SimulatedBackend {
    /// デフォルトの許可リストを使うスタブを作成
    pub fn new() -> Self {
        let answers = AUTHORIZED_ORIGINS
            .iter()
            .map(|origin| (origin.to_string(), true))
            .collect();
        Self::with_canned_answers(answers)
    }

    /// オリジンごとの固定回答を指定してスタブを作成
    ///
    /// マップに無いオリジンは常に非認可。
    pub fn with_canned_answers(answers: HashMap<String, bool>) -> Self {
        Self {
            identity: Identity {
                app_id: config::get_app_id(),
                node_id: "sim-node".to_string(),
                enclave_id: "sim-enclave".to_string(),
                backend_kind: BackendKind::Production,
            },
            answers,
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeBackend for SimulatedBackend {
    async fn check_authorized_origin(
        &self,
        origin: &str,
        _payload: &[u8],
    ) -> LoggerResult<AuthResult> {
        let authorized = self.answers.get(origin).copied().unwrap_or(false);

        Ok(AuthResult {
            authorized,
            origin: origin.to_string(),
            app_id: self.identity.app_id.clone(),
            method: AuthMethod::Simulated,
        })
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }
}
