//! ROFL Logger 共通クレート
//!
//! サーバー・クライアント双方で使う型定義、ワイヤプロトコル、
//! 署名コーデック、オリジン認証ロジック

#![warn(missing_docs)]

/// 認証エンベロープ構築・検証
pub mod authenticator;

/// 環境変数ベースの設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// ワイヤプロトコル定義（ヘッダー名、リクエスト/レスポンス）
pub mod protocol;

/// 署名コーデック（正規化・ハッシュ・エンコード）
pub mod signature;

/// コアデータ型
pub mod types;
