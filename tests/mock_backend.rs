//! Wire-level checks of the mock backend, made with a plain HTTP client.

use std::time::{Duration, Instant};

use miette::{IntoDiagnostic, Result};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn employees_url(env: &test_utils::TestEnv) -> String {
    format!("{}employees", env.server.base_url())
}

#[tokio::test]
async fn list_is_a_bare_array() -> Result<()> {
    test_utils::do_setup();
    let env = test_utils::spawn_backend(test_utils::jane_and_john()).await?;

    let response = reqwest::get(employees_url(&env)).await.into_diagnostic()?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.into_diagnostic()?;

    let employees = body.as_array().ok_or_else(|| miette::miette!("expected array"))?;
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["id"], json!("1"));
    assert_eq!(employees[0]["firstName"], json!("Jane"));
    assert_eq!(employees[1]["hireDate"], json!("2022-03-14"));
    Ok(())
}

#[tokio::test]
async fn create_returns_201_with_wrapped_record() -> Result<()> {
    test_utils::do_setup();
    let env = test_utils::spawn_backend(test_utils::jane_and_john()).await?;

    let response = reqwest::Client::new()
        .post(employees_url(&env))
        .json(&json!({
            "firstName": "Sarah",
            "lastName": "Miller",
            "email": "sarah.miller@example.com",
            "position": "QA Engineer",
            "department": "QA",
            "phoneNumber": "555-222-3333",
            "hireDate": "2023-09-01",
            "id": "999"
        }))
        .send()
        .await
        .into_diagnostic()?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.into_diagnostic()?;
    // A client-supplied id is ignored.
    assert_eq!(body["employee"]["id"], json!("3"));
    assert_eq!(body["employee"]["department"], json!("QA"));
    Ok(())
}

#[tokio::test]
async fn delete_returns_204_then_404() -> Result<()> {
    test_utils::do_setup();
    let env = test_utils::spawn_backend(test_utils::jane_and_john()).await?;
    let client = reqwest::Client::new();
    let url = format!("{}/1", employees_url(&env));

    let response = client.delete(&url).send().await.into_diagnostic()?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.into_diagnostic()?.is_empty());

    let response = client.delete(&url).send().await.into_diagnostic()?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.into_diagnostic()?;
    assert_eq!(body, json!({ "error": "Employee not found" }));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_record_is_404() -> Result<()> {
    test_utils::do_setup();
    let env = test_utils::spawn_backend(Vec::new()).await?;

    let response = reqwest::Client::new()
        .put(format!("{}/5", employees_url(&env)))
        .json(&test_utils::draft("Nobody", "Here"))
        .send()
        .await
        .into_diagnostic()?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.into_diagnostic()?;
    assert_eq!(body["error"], json!("Employee not found"));
    Ok(())
}

#[tokio::test]
async fn latency_delays_every_response() -> Result<()> {
    test_utils::do_setup();
    let latency = Duration::from_millis(150);
    let env = test_utils::spawn_backend_with_latency(Vec::new(), latency).await?;

    let started = Instant::now();
    let response = reqwest::get(employees_url(&env)).await.into_diagnostic()?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= latency);
    Ok(())
}

#[tokio::test]
async fn outage_answers_503() -> Result<()> {
    test_utils::do_setup();
    let env = test_utils::spawn_backend(test_utils::jane_and_john()).await?;
    env.backend.set_outage(true).await;

    let response = reqwest::get(employees_url(&env)).await.into_diagnostic()?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.into_diagnostic()?;
    assert_eq!(body, json!({ "error": "Service unavailable" }));
    Ok(())
}
