use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A destructive action was requested without the user's confirmation.
    /// Carries the prompt the client has to show before retrying.
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// The remote store rejected or failed a round trip. The payload is the
    /// underlying cause and is only ever logged.
    #[error("Store error: {0}")]
    Store(String),

    /// A store failure as reported by a page, with its displayable message.
    #[error("{0}")]
    Remote(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::ConfirmationRequired(prompt) = self {
            let body = Json(json!({ "error": "confirmation_required", "confirm": prompt }));
            return (StatusCode::PRECONDITION_REQUIRED, body).into_response();
        }

        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Remote(msg) => (StatusCode::BAD_GATEWAY, msg),
            Error::Store(cause) => {
                tracing::error!(%cause, "Store failure reached the HTTP boundary");
                (
                    StatusCode::BAD_GATEWAY,
                    "Erreur de communication avec la base de données".to_string(),
                )
            }
            Error::Csv(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Export error: {}", err)),
            Error::Xlsx(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Export error: {}", err)),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::Store(format!("migration failed: {}", err))
    }
}

impl Error {
    /// True when the error came out of a store round trip.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
