use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Where the proxy sends callers that still need to authorize.
pub const LOGIN_PATH: &str = "/login";

/// Failure of a single call to the Spotify accounts service or Web API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("no access token, authorize first")]
    NotAuthenticated,

    #[error("upstream answered {status}")]
    Rejected { status: StatusCode, details: Value },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected upstream payload: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Payload passed through to the client in the `details` field.
    pub fn details(&self) -> Value {
        match self {
            UpstreamError::Rejected { details, .. } => details.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("refresh rejected: {0}")]
    UpstreamRejected(#[source] UpstreamError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Error returned by every route handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated with Spotify")]
    NotAuthenticated,

    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("{0}")]
    MissingInput(&'static str),

    #[error("{context}")]
    Upstream {
        context: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str, source: UpstreamError) -> Self {
        match source {
            UpstreamError::NotAuthenticated => ApiError::NotAuthenticated,
            source => ApiError::Upstream { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NoRefreshToken | ApiError::MissingInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::NoRefreshToken => ApiError::NoRefreshToken,
            RefreshError::UpstreamRejected(source) => {
                ApiError::upstream("Failed to refresh token", source)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotAuthenticated => json!({
                "error": self.to_string(),
                "login_url": LOGIN_PATH,
            }),
            ApiError::Upstream { context, source } => {
                tracing::error!(error = %source, "{context}");
                json!({
                    "error": context,
                    "details": source.details(),
                })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
