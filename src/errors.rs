use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors raised while storing or verifying a license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The registry request could not be built, sent, or returned a non-2xx status.
    Transport(String),
    /// The results page has no usable `<ul class="actions">` container.
    MalformedPage(String),
    /// The identity pattern was not found in the collected text.
    NoMatch(String),
    /// The identity matched but no usable `License Status:` line was found.
    MalformedStatus(String),
    /// A status was extracted but no expiration date appears on the page.
    ExpirationNotFound(String),
    /// Persisting the license failed.
    Repository(String),
    /// Bad request error (invalid input).
    BadRequest(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Returns the innermost error, skipping any context wrappers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status reported to API callers for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.root() {
            AppError::NoMatch(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport(msg) => write!(f, "Transport error: {}", msg),
            AppError::MalformedPage(msg) => write!(f, "Malformed page: {}", msg),
            AppError::NoMatch(msg) => write!(f, "No match: {}", msg),
            AppError::MalformedStatus(msg) => write!(f, "Malformed status: {}", msg),
            AppError::ExpirationNotFound(msg) => write!(f, "Expiration not found: {}", msg),
            AppError::Repository(msg) => write!(f, "Repository error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error kind to an HTTP status code and a JSON body.
    ///
    /// Upstream page problems surface as 502 since the registry, not the
    /// caller, produced the unexpected shape.
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.root() {
            AppError::Repository(msg) => tracing::error!("Repository error: {}", msg),
            AppError::NoMatch(_) | AppError::BadRequest(_) => {
                tracing::debug!("Request rejected: {}", self)
            }
            _ => tracing::error!("Verification error: {}", self),
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Repository(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for sqlx::Error to add context
impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::from(e)),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::from(e)),
            context: f(),
        })
    }
}
