use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::ErrorResponse;

pub const VALIDATION_MESSAGE: &str = "All fields are required.";
pub const FAULT_MESSAGE: &str = "Failed to send message.";

/// Every way a contact submission can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{}", VALIDATION_MESSAGE)]
    ValidationFailed,

    /// Provider answered with a non-success status; carries its raw response text.
    #[error("{0}")]
    ProviderRejected(String),

    #[error("{0}")]
    RelayFault(String),
}

impl RelayError {
    pub fn fault() -> Self {
        Self::RelayFault(FAULT_MESSAGE.to_string())
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::ProviderRejected(_) => "ProviderRejected",
            Self::RelayFault(_) => "RelayFault",
        }
    }

    pub fn detail(&self) -> String {
        self.to_string()
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
            Self::ProviderRejected(_) | Self::RelayFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.detail(),
            }),
        )
            .into_response()
    }
}
