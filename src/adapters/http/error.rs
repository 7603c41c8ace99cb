//! Error bodies shared by every endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{Timestamp, ValidationError};

/// JSON error body.
///
/// Only `error` is always present; the other fields appear on the
/// endpoints that historically sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
            message: None,
            timestamp: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = Some(Timestamp::now().to_rfc3339());
        self
    }

    pub fn unsuccessful(mut self) -> Self {
        self.success = Some(false);
        self
    }
}

/// API error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input the caller can fix.
    BadRequest(String),
    /// Report generation failed outside the fallback path.
    AnalysisUnavailable,
    /// Risk re-analysis body could not be read.
    ReanalysisRejected,
    /// Market analysis body could not be read.
    MarketAnalysisFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::AnalysisUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to analyze molecule")
                    .with_message("AI analysis service temporarily unavailable")
                    .with_timestamp(),
            ),
            ApiError::ReanalysisRejected => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Failed to process analysis request")
                    .with_message("Invalid request format or processing error")
                    .unsuccessful(),
            ),
            ApiError::MarketAnalysisFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to generate market analysis"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("Missing required field: route")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Missing required field: route"}));
    }

    #[test]
    fn reanalysis_rejection_is_unsuccessful() {
        let body = ErrorResponse::new("x").with_message("y").unsuccessful();
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "y");
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::AnalysisUnavailable.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ReanalysisRejected.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MarketAnalysisFailed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
