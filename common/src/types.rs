//! 共通型定義
//!
//! Identity, AuthEnvelope, AuthResult等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// バックエンド種別
///
/// プロセス起動時に一度だけ決定され、以後変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// ローカル開発・テスト用（外部システムに接続しない）
    Mock,
    /// 外部appdランタイムへ委譲
    Production,
}

impl BackendKind {
    /// BackendKindを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 認証を実行したコードパス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// コンパイル時許可リストによるローカル判定
    Mock,
    /// インプロセススタブ（統合テスト用）
    Simulated,
    /// 外部ランタイムのensureAuthorizedOriginサブコール
    Production,
}

impl AuthMethod {
    /// AuthMethodを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Simulated => "simulated",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ROFLアプリのアイデンティティ
///
/// バックエンド初期化時に一度だけ確定し、以後不変。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// アプリケーションID
    pub app_id: String,
    /// ノードID
    pub node_id: String,
    /// エンクレーブID
    pub enclave_id: String,
    /// バックエンド種別
    pub backend_kind: BackendKind,
}

/// 認証エンベロープ
///
/// リクエストごとに構築され、4つの`X-ROFL-*`ヘッダーとして送信される。
/// 受信側のゲートウェイが一度だけ消費する。永続化しない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthEnvelope {
    /// 送信元オリジン
    pub origin: String,
    /// base64エンコードされた署名
    pub signature: String,
    /// Unix秒タイムスタンプ（署名対象には含まれない）
    pub timestamp: i64,
    /// アプリケーションID
    pub app_id: String,
    /// 署名対象のペイロード
    pub payload: Value,
}

/// 認証試行の結果
///
/// 生成後は変更されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResult {
    /// 認可されたか
    pub authorized: bool,
    /// 判定対象のオリジン
    pub origin: String,
    /// アプリケーションID
    pub app_id: String,
    /// 判定を行ったコードパス
    pub method: AuthMethod,
}

/// チャットログエントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatLog {
    /// ユーザー名
    #[serde(default)]
    pub user: String,
    /// 質問
    #[serde(default)]
    pub question: String,
    /// 回答
    #[serde(default)]
    pub answer: String,
}

impl ChatLog {
    /// サーバー側タイムスタンプを付与した保存用エントリに変換する
    pub fn into_stored_entry(self, received_at: DateTime<Utc>) -> Value {
        serde_json::json!({
            "user": self.user,
            "question": self.question,
            "answer": self.answer,
            "timestamp": received_at.to_rfc3339(),
        })
    }
}
