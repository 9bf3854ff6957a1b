use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/";

/// A typed representation of the employee API endpoints.
///
/// Paths are resolved relative to the client's base URL (which always ends
/// in `/`), so `Employees` against `http://host/api/` becomes
/// `http://host/api/employees`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeEndpoint {
    /// `/employees`: list and create.
    Employees,
    /// `/employees/:id`: fetch, update and delete one record.
    Employee(String),
}

impl EmployeeEndpoint {
    /// Resolves the endpoint against `base`.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join("employees").map_err(|_| Error::InvalidEndpoint)?;
        if let Self::Employee(id) = self {
            url.path_segments_mut()
                .map_err(|()| Error::InvalidEndpoint)?
                .push(id);
        }
        Ok(url)
    }
}

impl fmt::Display for EmployeeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employees => write!(f, "employees"),
            Self::Employee(id) => write!(f, "employees/{id}"),
        }
    }
}

/// Normalizes a base URL so relative endpoint paths join beneath it.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|_| Error::InvalidEndpoint)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidEndpoint);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_endpoint_joins_under_base() {
        let base = normalize_base_url("http://localhost:3000/api").unwrap();
        let url = EmployeeEndpoint::Employees.to_url(&base).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/employees");
    }

    #[test]
    fn record_endpoint_escapes_identifier() {
        let base = normalize_base_url(DEFAULT_BASE_URL).unwrap();
        let url = EmployeeEndpoint::Employee("7".into()).to_url(&base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/employees/7");

        let url = EmployeeEndpoint::Employee("a/b c".into()).to_url(&base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/employees/a%2Fb%20c");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(normalize_base_url("mailto:hr@example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }
}
