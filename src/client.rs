use std::fmt;

use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing_error::SpanTrace;
use url::Url;

use crate::endpoints::{self, EmployeeEndpoint};
use crate::entities::employee::{Employee, EmployeeDraft, ListResponse, SingleResponse};
use crate::error::{self, Error, Result};

/// Environment variable holding the API base URL for [`Client::from_env`].
pub const ENV_API_URL: &str = "STAFFBOOK_API_URL";

const ENTITY: &str = "Employee";

#[derive(Clone, Debug)]
/// This is the client that is used for interacting with the employee API. It owns the
/// HTTP connection pool and the base URL every endpoint is resolved against.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Creates a client for the API rooted at `base_url`, e.g. `http://localhost:3000/api`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a usable base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Self::with_http_client(http, base_url)
    }

    /// Creates a client that sends requests through an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = endpoints::normalize_base_url(base_url)?;
        trace!(%base_url, "created employee api client");
        Ok(Self { http, base_url })
    }

    /// Creates a client from the `STAFFBOOK_API_URL` environment variable, falling back
    /// to [`endpoints::DEFAULT_BASE_URL`] when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_API_URL) {
            Ok(url) => Self::new(&url).map_err(|e| Error::Config {
                key: ENV_API_URL,
                message: e.to_string(),
            }),
            Err(std::env::VarError::NotPresent) => Self::new(endpoints::DEFAULT_BASE_URL),
            Err(e) => Err(Error::Config {
                key: ENV_API_URL,
                message: e.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request object for the given endpoint.
    pub(crate) fn build_request(
        &self,
        method: Method,
        endpoint: &EmployeeEndpoint,
    ) -> Result<RequestBuilder> {
        let url = endpoint.to_url(&self.base_url)?;
        Ok(self.http.request(method, url))
    }

    /// Perform a `GET` request against an endpoint.
    #[instrument(skip(self))]
    pub async fn get<R: DeserializeOwned>(&self, endpoint: EmployeeEndpoint) -> Result<R> {
        trace!(?endpoint, "making GET request");
        let response = self.build_request(Method::GET, &endpoint)?.send().await?;
        Self::handle_response(response).await
    }

    /// Perform a `POST` request with a JSON body.
    #[instrument(skip(self, data))]
    pub async fn post<R: DeserializeOwned, T: Serialize + fmt::Debug>(
        &self,
        endpoint: EmployeeEndpoint,
        data: &T,
    ) -> Result<R> {
        trace!(json = ?serde_json::to_string(data).ok(), ?endpoint, "making POST request");
        let response = self
            .build_request(Method::POST, &endpoint)?
            .json(data)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform a `PUT` request with a JSON body.
    #[instrument(skip(self, data))]
    pub async fn put<R: DeserializeOwned, T: Serialize + fmt::Debug>(
        &self,
        endpoint: EmployeeEndpoint,
        data: &T,
    ) -> Result<R> {
        trace!(json = ?serde_json::to_string(data).ok(), ?endpoint, "making PUT request");
        let response = self
            .build_request(Method::PUT, &endpoint)?
            .json(data)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform a `DELETE` request. Any 2xx status counts as success; the body is ignored.
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: EmployeeEndpoint) -> Result<()> {
        trace!(?endpoint, "making DELETE request");
        let response = self.build_request(Method::DELETE, &endpoint)?.send().await?;

        if response.status().is_success() {
            debug!(status = %response.status(), url = %response.url(), "delete succeeded");
            Ok(())
        } else {
            Self::handle_response::<()>(response).await
        }
    }

    #[instrument(skip(response))]
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
            .to_string();

        debug!(%url, %status, %entity_type, "received response");

        let text = response.text().await?;
        debug!("Response body size: {} bytes", text.len());
        trace!("Response text:\n{}", text);

        match status {
            StatusCode::NOT_FOUND => Err(Error::not_found(ENTITY, url, Some(text))),
            status if status.is_success() => {
                serde_json::from_str(&text).map_err(|source| {
                    error!(
                        "Deserialization error: {}, near column {} of {} response",
                        source,
                        source.column(),
                        entity_type
                    );
                    Error::DeserializationError {
                        source,
                        entity_type,
                        url,
                        status_code: status,
                        response_body: Some(text),
                        span_trace: SpanTrace::capture(),
                    }
                })
            }
            status => {
                error!(%status, %url, "Unexpected status code");
                let response = serde_json::from_str::<error::Response>(&text).ok();
                Err(Error::Api {
                    status_code: status,
                    url,
                    response,
                    response_body: (!text.is_empty()).then_some(text),
                    span_trace: SpanTrace::capture(),
                })
            }
        }
    }

    /// Access the employees API
    #[must_use]
    pub fn employees(&self) -> EmployeesApi<'_> {
        EmployeesApi { client: self }
    }
}

/// API handler for the `/employees` resource.
#[derive(Debug)]
pub struct EmployeesApi<'a> {
    client: &'a Client,
}

impl EmployeesApi<'_> {
    /// Retrieve every employee, in server order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Employee>> {
        let response: ListResponse = self.client.get(EmployeeEndpoint::Employees).await?;
        Ok(response.into())
    }

    /// Retrieve a single employee by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Employee> {
        let response: SingleResponse = self
            .client
            .get(EmployeeEndpoint::Employee(id.to_string()))
            .await?;
        Ok(response.into())
    }

    /// Create an employee; the returned record carries the assigned id.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let response: SingleResponse = self
            .client
            .post(EmployeeEndpoint::Employees, draft)
            .await?;
        Ok(response.into())
    }

    /// Replace the attributes of the employee at `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: &str, draft: &EmployeeDraft) -> Result<Employee> {
        let response: SingleResponse = self
            .client
            .put(EmployeeEndpoint::Employee(id.to_string()), draft)
            .await?;
        Ok(response.into())
    }

    /// Delete the employee at `id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(EmployeeEndpoint::Employee(id.to_string()))
            .await
    }
}
