//! ワイヤプロトコル定義
//!
//! 認証ヘッダー名とサーバーAPIのリクエスト/レスポンス

use crate::types::{AuthMethod, Identity};
use serde::{Deserialize, Serialize};

/// 送信元オリジンを示すヘッダー
pub const HEADER_ORIGIN: &str = "X-ROFL-Origin";
/// base64署名を示すヘッダー
pub const HEADER_SIGNATURE: &str = "X-ROFL-Signature";
/// Unix秒タイムスタンプを示すヘッダー
pub const HEADER_TIMESTAMP: &str = "X-ROFL-Timestamp";
/// アプリケーションIDを示すヘッダー
pub const HEADER_APP_ID: &str = "X-ROFL-App-ID";

/// POST /store レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreResponse {
    /// 処理結果（"ok"固定）
    pub status: String,
    /// 認証を行ったコードパス（/store-publicでは省略）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<AuthMethod>,
}

impl StoreResponse {
    /// 認証済み保存のレスポンスを生成
    pub fn authenticated(method: AuthMethod) -> Self {
        Self {
            status: "ok".to_string(),
            auth_method: Some(method),
        }
    }

    /// 公開エンドポイントのレスポンスを生成
    pub fn public() -> Self {
        Self {
            status: "ok".to_string(),
            auth_method: None,
        }
    }
}

/// GET /health レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    /// サービス状態（"ok"固定）
    pub status: String,
    /// サーバーバージョン
    pub version: String,
}

/// GET /rofl-info レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoflInfoResponse {
    /// アプリのアイデンティティ
    pub identity: Identity,
}

/// 拒否レスポンスのボディ
///
/// 機械判読可能なreasonコードを必ず含める。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectionResponse {
    /// 拒否理由コード（snake_case）
    pub reason: String,
    /// 人間向けメッセージ（内部情報は含まない）
    pub message: String,
}
