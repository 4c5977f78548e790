//! ランタイムバックエンド
//!
//! 「このオリジンは認可されているか」「自分のアイデンティティは何か」に
//! 答える外部オラクルの抽象。mock / simulated / production の3実装を
//! 持ち、どれを使うかはプロセス起動時に一度だけ決まる。

/// コンパイル時許可リストによるローカル実装
pub mod mock;

/// 本番appdランタイムへのHTTPサブコール実装
pub mod production;

/// 統合テスト向けインプロセススタブ実装
pub mod simulated;

pub use mock::MockBackend;
pub use production::ProductionBackend;
pub use simulated::SimulatedBackend;

use crate::config::RuntimeConfig;
use async_trait::async_trait;
use rofl_logger_common::error::LoggerResult;
use rofl_logger_common::types::{AuthResult, Identity};
use std::sync::Arc;
use tracing::info;

/// 認可・アイデンティティオラクル
///
/// ゲートウェイと認証器はこの境界だけを見る。実装を差し替えても
/// 呼び出し側には手を入れない。
#[async_trait]
pub trait RuntimeBackend: Send + Sync {
    /// オリジンが認可されているか判定する
    ///
    /// 認可されない場合も`AuthResult{authorized: false}`を返す
    /// （確定的な回答はエラーではない）。ランタイムへの到達自体に
    /// 失敗した場合のみ`LoggerError::RuntimeUnavailable`を返す。
    async fn check_authorized_origin(
        &self,
        origin: &str,
        payload: &[u8],
    ) -> LoggerResult<AuthResult>;

    /// 起動時に確定したアイデンティティを返す（純粋な読み取り）
    fn identity(&self) -> &Identity;
}

/// 設定に従ってバックエンドを初期化する
///
/// 本番フラグが立っていればappdランタイムへ接続し、アイデンティティを
/// 取得する。接続に失敗した場合はエラーを返す（呼び出し側で起動を
/// 中断する）。フラグが無ければモックを使う。ここでの選択はプロセス
/// 存続中は不変。
pub async fn init_backend(config: &RuntimeConfig) -> LoggerResult<Arc<dyn RuntimeBackend>> {
    if config.production {
        info!("Initializing production runtime backend: {}", config.appd_url);
        let backend = ProductionBackend::connect(config).await?;
        Ok(Arc::new(backend))
    } else {
        info!("Initializing mock runtime backend (set ROFL_LOGGER_RUNTIME=true for production)");
        Ok(Arc::new(MockBackend::new()))
    }
}
