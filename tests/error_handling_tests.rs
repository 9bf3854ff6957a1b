use miette::Diagnostic;
use serde_json::json;
use staffbook::error::{Error, Response as ErrorResponse};

#[test]
fn test_error_payload_deserializes() {
    let error_json = json!({ "error": "Employee not found" });

    let result: Result<ErrorResponse, _> = serde_json::from_value(error_json);
    assert!(
        result.is_ok(),
        "Failed to deserialize error payload: {:?}",
        result.err()
    );
    assert_eq!(result.unwrap().to_string(), "Employee not found");
}

#[test]
fn test_error_payload_requires_message() {
    let result: Result<ErrorResponse, _> = serde_json::from_value(json!({ "message": "nope" }));
    assert!(result.is_err());
}

#[test]
fn test_diagnostic_codes() {
    let cases: Vec<(Error, &str)> = vec![
        (Error::InvalidEndpoint, "staffbook::invalid_endpoint"),
        (
            Error::Config {
                key: "STAFFBOOK_API_URL",
                message: "bad".to_string(),
            },
            "staffbook::config_error",
        ),
    ];

    for (error, code) in cases {
        let actual = error.code().map(|c| c.to_string());
        assert_eq!(actual.as_deref(), Some(code), "wrong code for {error}");
        assert!(error.help().is_some());
        assert!(error.span_trace().is_none());
        assert!(error.url().is_none());
    }
}

#[test]
fn test_config_error_display() {
    let error = Error::Config {
        key: "STAFFBOOK_MOCK_LATENCY_MS",
        message: "\"soon\": invalid digit found in string".to_string(),
    };
    let display_text = format!("{error}");
    assert!(display_text.contains("STAFFBOOK_MOCK_LATENCY_MS"));
    assert!(display_text.contains("invalid digit"));
}

#[tokio::test]
async fn miette_integration_example() -> miette::Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Our Error type is already Diagnostic-compatible, so `?` converts it.
    let result: staffbook::error::Result<()> = Err(Error::InvalidEndpoint);
    if let Err(e) = result {
        let report = miette::Report::new(e);
        assert!(format!("{report:?}").contains("invalid_endpoint"));
    }

    let client = staffbook::Client::new("http://localhost:3000/api")?;
    assert_eq!(client.base_url().path(), "/api/");
    Ok(())
}
