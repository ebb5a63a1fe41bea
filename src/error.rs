//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, external::ExternalServiceError, internal_server_error::InternalServerError,
    not_found::NotFoundError, validation::ValidationError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Two transactions in a fixture share the same ID.
    ///
    /// Transaction IDs must be unique within a [crate::TransactionStore].
    #[error("the transaction ID \"{0}\" appears more than once")]
    DuplicateTransactionId(String),

    /// A fixture file could not be read or parsed.
    #[error("could not load fixture: {0}")]
    InvalidFixture(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The lock guarding the current settings was poisoned.
    #[error("could not acquire the settings lock")]
    SettingsLockError,

    /// The user's input was rejected before it was submitted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An external collaborator failed to handle a request.
    #[error(transparent)]
    ExternalService(#[from] ExternalServiceError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Validation(error) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Please check your input".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::ExternalService(error) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: format!("The {} is unavailable", error.service()),
                    details: "Your request was not completed. Please try again later.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
