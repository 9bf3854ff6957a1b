use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

/// The structured payload the backend returns alongside failing status codes,
/// e.g. `{"error": "Employee not found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub error: String,
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error)
    }
}

/// Errors that can occur when interacting with the employee API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {source}")]
    #[diagnostic(
        code(staffbook::request_error),
        help("Check that the employee API is running and reachable")
    )]
    Request {
        #[source]
        source: reqwest::Error,
        span_trace: SpanTrace,
    },

    #[error("error decoding {entity_type} response from {url}: {source}")]
    #[diagnostic(
        code(staffbook::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError {
        #[source]
        source: serde_json::Error,
        entity_type: String,
        url: String,
        status_code: reqwest::StatusCode,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    #[error("object not found: {entity} (url: {url})")]
    #[diagnostic(
        code(staffbook::not_found),
        help("Verify that the {entity} exists; it may have been deleted")
    )]
    NotFound {
        entity: String,
        url: String,
        status_code: reqwest::StatusCode,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    /// A non-2xx status other than 404. `response` holds the decoded
    /// `{error}` payload when the body had one.
    #[error("unexpected status {status_code} from {url}")]
    #[diagnostic(
        code(staffbook::api_error),
        help("Inspect the response body for details from the backend")
    )]
    Api {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<Response>,
        response_body: Option<String>,
        span_trace: SpanTrace,
    },

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(staffbook::invalid_endpoint),
        help("Check that the API base URL is correctly formatted")
    )]
    InvalidEndpoint,

    #[error("invalid configuration value for {key}: {message}")]
    #[diagnostic(
        code(staffbook::config_error),
        help("Fix or unset the environment variable {key}")
    )]
    Config { key: &'static str, message: String },
}

impl Error {
    /// Builds an [`Error::NotFound`] from the pieces of a 404 response.
    pub(crate) fn not_found(
        entity: impl Into<String>,
        url: impl Into<String>,
        response_body: Option<String>,
    ) -> Self {
        Self::NotFound {
            entity: entity.into(),
            url: url.into(),
            status_code: reqwest::StatusCode::NOT_FOUND,
            response_body,
            span_trace: SpanTrace::capture(),
        }
    }

    /// The span trace captured when the error was created, if any.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Request { span_trace, .. }
            | Self::DeserializationError { span_trace, .. }
            | Self::NotFound { span_trace, .. }
            | Self::Api { span_trace, .. } => Some(span_trace),
            Self::InvalidEndpoint | Self::Config { .. } => None,
        }
    }

    /// The URL of the request that failed, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Request { source, .. } => source.url().map(url::Url::as_str),
            Self::DeserializationError { url, .. }
            | Self::NotFound { url, .. }
            | Self::Api { url, .. } => Some(url),
            Self::InvalidEndpoint | Self::Config { .. } => None,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Request { source, .. } => source.status(),
            Self::DeserializationError { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::Api { status_code, .. } => Some(*status_code),
            Self::InvalidEndpoint | Self::Config { .. } => None,
        }
    }

    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::DeserializationError { response_body, .. }
            | Self::NotFound { response_body, .. }
            | Self::Api { response_body, .. } => response_body.as_deref(),
            Self::Request { .. } | Self::InvalidEndpoint | Self::Config { .. } => None,
        }
    }

    /// The backend's structured error payload, if the response carried one.
    #[must_use]
    pub fn api_response(&self) -> Option<&Response> {
        match self {
            Self::Api { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Request {
            source,
            span_trace: SpanTrace::capture(),
        }
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
