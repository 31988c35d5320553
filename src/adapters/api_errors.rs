use {
    crate::domain::{classify, error::GatewayError},
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer. Raw processor and transport detail is logged here and never reaches
/// the client; only validation messages and the classifier's closed set do.
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GatewayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::Processor(detail) => {
                tracing::error!("processor error: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    classify::user_facing_message(detail).to_string(),
                )
            }
            GatewayError::Transport(err) => {
                tracing::error!("transport error: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    classify::user_facing_message(&err.to_string()).to_string(),
                )
            }
            GatewayError::Signature(msg) => {
                tracing::warn!("rejected webhook: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "Signature validation failed.".to_string(),
                )
            }
            GatewayError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "Status": "Failed",
            "Message": message,
        });

        (status, Json(body)).into_response()
    }
}
