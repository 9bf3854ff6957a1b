//! Sentry integration for staffbook errors.
//!
//! This module provides integration with Sentry for error reporting and breadcrumb capture.
//! It is only available when the `sentry` feature is enabled.
//!
//! # Usage
//!
//! Enable the `sentry` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! staffbook = { version = "0.1", features = ["sentry"] }
//! ```
//!
//! Then set up tracing with `ErrorLayer` and `sentry-tracing`:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())  // Required for SpanTrace capture
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//! ```

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, protocol::Value};

use crate::error::Error;

/// Largest response body forwarded to Sentry.
const MAX_BODY_PREVIEW: usize = 500;

/// Convert a staffbook Error into a Sentry breadcrumb.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let (category, message) = match error {
            Error::Request { source, .. } => ("http.request", format!("HTTP request error: {source}")),
            Error::DeserializationError { entity_type, .. } => (
                "http.response",
                format!("Failed to deserialize {entity_type} response"),
            ),
            Error::NotFound { entity, .. } => ("http.response", format!("{entity} not found")),
            Error::Api { status_code, response, .. } => (
                "staffbook.api",
                match response {
                    Some(response) => format!("API error {status_code}: {response}"),
                    None => format!("API error {status_code}"),
                },
            ),
            Error::InvalidEndpoint => ("staffbook.config", "Invalid endpoint URL".to_string()),
            Error::Config { key, .. } => ("staffbook.config", format!("Invalid value for {key}")),
        };

        let mut data = BTreeMap::new();
        if let Some(url) = error.url() {
            data.insert("url".to_string(), Value::from(url.to_string()));
        }
        if let Some(status) = error.status_code() {
            data.insert("status_code".to_string(), Value::from(status.as_u16()));
        }

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(message),
            data,
            level: sentry_core::Level::Error,
            ..Default::default()
        }
    }
}

/// Convert a staffbook Error into Sentry context data.
///
/// ```ignore
/// use sentry::configure_scope;
/// use staffbook::sentry_integration::error_to_sentry_context;
///
/// if let Err(e) = store.list().await {
///     configure_scope(|scope| {
///         for (key, value) in error_to_sentry_context(&e) {
///             scope.set_extra(&key, value);
///         }
///     });
/// }
/// ```
pub fn error_to_sentry_context(error: &Error) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();

    if let Some(span_trace) = error.span_trace() {
        context.insert(
            "staffbook.span_trace".to_string(),
            Value::from(format!("{span_trace}")),
        );
    }

    if let Some(url) = error.url() {
        context.insert("staffbook.url".to_string(), Value::from(url.to_string()));
    }

    if let Some(status) = error.status_code() {
        context.insert("staffbook.status_code".to_string(), Value::from(status.as_u16()));
    }

    if let Some(body) = error.response_body() {
        let truncated: String = body.chars().take(MAX_BODY_PREVIEW).collect();
        context.insert("staffbook.response_body".to_string(), Value::from(truncated));
    }

    if let Some(response) = error.api_response() {
        context.insert(
            "staffbook.message".to_string(),
            Value::from(response.error.clone()),
        );
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_breadcrumb_carries_url_and_status() {
        let error = Error::not_found(
            "Employee",
            "http://127.0.0.1:3000/api/employees/9",
            Some(r#"{"error":"Employee not found"}"#.to_string()),
        );
        let crumb = Breadcrumb::from(&error);
        assert_eq!(crumb.category.as_deref(), Some("http.response"));
        assert_eq!(crumb.message.as_deref(), Some("Employee not found"));
        assert_eq!(crumb.data.get("status_code"), Some(&Value::from(404u16)));

        let context = error_to_sentry_context(&error);
        assert!(context.contains_key("staffbook.response_body"));
        assert!(context.contains_key("staffbook.span_trace"));
    }
}
