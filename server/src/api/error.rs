//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use rofl_logger_common::error::{LoggerError, RejectReason};
use rofl_logger_common::protocol::RejectionResponse;
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub LoggerError);

impl From<LoggerError> for AppError {
    fn from(err: LoggerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Use external_message() to avoid exposing internal details
        // (runtime endpoints, file paths, etc.) in HTTP responses.
        // Full error details are logged separately for debugging.
        if let Some(reason) = self.0.reject_reason() {
            let status = match reason {
                RejectReason::PayloadError => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            };
            let body = RejectionResponse {
                reason: reason.as_str().to_string(),
                message: self.0.external_message().to_string(),
            };
            return (status, Json(body)).into_response();
        }

        let status = match &self.0 {
            LoggerError::RuntimeUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LoggerError::Http(_) => StatusCode::BAD_GATEWAY,
            LoggerError::Common(_) => StatusCode::BAD_REQUEST,
            LoggerError::Store(_) | LoggerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LoggerError::Rejected(_) => unreachable!("handled above"),
        };

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn rejections_map_to_401_with_reason_code() {
        let response =
            AppError(LoggerError::Rejected(RejectReason::SignatureMismatch)).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn payload_error_maps_to_400() {
        let response = AppError(LoggerError::Rejected(RejectReason::PayloadError)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn runtime_unavailable_maps_to_503() {
        let response =
            AppError(LoggerError::RuntimeUnavailable("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
