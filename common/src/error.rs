//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! リクエストレベルの拒否は`RejectReason`として表現し、例外ではなく
//! 値として呼び出し元へ返す。プロセスを止めてよいのはバックエンド
//! 初期化失敗のみ。

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload could not be encoded into a canonical JSON form
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// リクエスト拒否理由
///
/// 認証チェーンのどの段で弾かれたかを機械判読可能な形で表す。
/// 署名不一致やオリジン未認可は「期待される結果」であり、エラーでは
/// なくこの列挙値で返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// オリジンまたは署名ヘッダーが欠落
    MissingCredentials,
    /// ボディがJSONとして解釈できない
    PayloadError,
    /// タイムスタンプが許容ウィンドウ外（欠落・解釈不能を含む）
    StaleRequest,
    /// 署名の再計算結果が一致しない
    SignatureMismatch,
    /// バックエンドがオリジンを認可しなかった
    OriginNotAuthorized,
}

impl RejectReason {
    /// 拒否理由コードを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::PayloadError => "payload_error",
            Self::StaleRequest => "stale_request",
            Self::SignatureMismatch => "signature_mismatch",
            Self::OriginNotAuthorized => "origin_not_authorized",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ROFL Logger error type
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Request rejected by the authentication chain
    #[error("Request rejected: {0}")]
    Rejected(RejectReason),

    /// External runtime could not be reached
    #[error("Runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// Log store failure
    #[error("Store error: {0}")]
    Store(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LoggerError {
    /// Returns a safe error message for external clients.
    ///
    /// This method returns a generic error message that does not expose
    /// internal implementation details such as runtime endpoints or file
    /// paths. Use this for HTTP responses to external clients.
    ///
    /// For debugging purposes, use the `Display` implementation
    /// (`to_string()`) which includes full error details - but only in
    /// server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Request error",
            Self::Rejected(reason) => match reason {
                RejectReason::MissingCredentials => "Missing authentication headers",
                RejectReason::PayloadError => "Invalid request payload",
                RejectReason::StaleRequest => "Request timestamp outside freshness window",
                RejectReason::SignatureMismatch => "Signature verification failed",
                RejectReason::OriginNotAuthorized => "Origin not authorized",
            },
            Self::RuntimeUnavailable(_) => "Authorization runtime unavailable",
            Self::Store(_) => "Log store error",
            Self::Http(_) => "Backend service unavailable",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// 拒否理由コードを返す（拒否以外はNone）
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// ROFL Logger result type
pub type LoggerResult<T> = Result<T, LoggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reason_codes_are_snake_case() {
        assert_eq!(RejectReason::MissingCredentials.as_str(), "missing_credentials");
        assert_eq!(RejectReason::StaleRequest.as_str(), "stale_request");
        assert_eq!(
            RejectReason::OriginNotAuthorized.as_str(),
            "origin_not_authorized"
        );
    }

    #[test]
    fn external_message_never_exposes_detail() {
        let err = LoggerError::RuntimeUnavailable(
            "connect error: http://127.0.0.1:9999 refused".to_string(),
        );
        assert!(!err.external_message().contains("127.0.0.1"));
    }
}
