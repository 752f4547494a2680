use crate::utils::error::CitiesError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON body returned for any failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub status: u16,
}

impl From<&CitiesError> for ErrorBody {
    fn from(err: &CitiesError) -> Self {
        let (title, message) = match err {
            CitiesError::BadRequest { title, message }
            | CitiesError::DataProcessing { title, message } => (title.clone(), message.clone()),
            other => ("Internal error".to_string(), other.to_string()),
        };

        Self {
            kind: err.type_code().to_string(),
            title,
            message,
            status: err.status_code(),
        }
    }
}

impl IntoResponse for CitiesError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
