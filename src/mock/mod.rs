//! An in-memory stand-in for the employee API.
//!
//! The backend serves the same REST contract the [`Client`](crate::Client) consumes:
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `/api/employees` | 200, array of employees | |
//! | `GET` | `/api/employees/{id}` | 200, `{"employee": ...}` | 404 |
//! | `POST` | `/api/employees` | 201, `{"employee": ...}` | |
//! | `PUT` | `/api/employees/{id}` | 200, `{"employee": ...}` | 404, `{"error": "Employee not found"}` |
//! | `DELETE` | `/api/employees/{id}` | 204 | 404, `{"error": "Employee not found"}` |
//!
//! Identifiers are sequential decimal strings starting at `"1"` and are never
//! reused. Every request is delayed by the configured latency, and
//! [`MockBackend::set_outage`] makes every route answer 503.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::entities::{Employee, EmployeeDraft};
use crate::error::{Error, Result};

mod routes;
pub mod seed;

pub const ENV_ADDR: &str = "STAFFBOOK_MOCK_ADDR";
pub const ENV_LATENCY_MS: &str = "STAFFBOOK_MOCK_LATENCY_MS";
pub const ENV_SEED_COUNT: &str = "STAFFBOOK_MOCK_SEED_COUNT";

const DEFAULT_LATENCY_MS: u64 = 400;

/// Settings for a standalone mock backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockConfig {
    pub addr: SocketAddr,
    /// Delay applied to every request.
    pub latency: Duration,
    /// Number of synthetic employees created at startup.
    pub seed_count: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            seed_count: 10,
        }
    }
}

impl MockConfig {
    /// Reads `STAFFBOOK_MOCK_ADDR`, `STAFFBOOK_MOCK_LATENCY_MS` and
    /// `STAFFBOOK_MOCK_SEED_COUNT`, keeping the default for any that are unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            addr: env_or(ENV_ADDR, defaults.addr)?,
            latency: env_or(ENV_LATENCY_MS, DEFAULT_LATENCY_MS).map(Duration::from_millis)?,
            seed_count: env_or(ENV_SEED_COUNT, defaults.seed_count)?,
        })
    }
}

fn env_or<T>(key: &'static str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| Error::Config {
            key,
            message: format!("{raw:?}: {e}"),
        }),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(Error::Config {
            key,
            message: e.to_string(),
        }),
    }
}

#[derive(Debug, Default)]
struct Db {
    employees: Vec<Employee>,
    last_id: u64,
    outage: bool,
}

impl Db {
    fn insert(&mut self, draft: EmployeeDraft) -> Employee {
        self.last_id += 1;
        let employee = draft.into_employee(self.last_id.to_string());
        self.employees.push(employee.clone());
        employee
    }

    fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }
}

/// Shared handle to one in-memory backend. Clones serve the same data.
#[derive(Clone, Debug)]
pub struct MockBackend {
    db: Arc<Mutex<Db>>,
    latency: Duration,
}

/// A backend serving in a background task.
#[derive(Debug)]
pub struct RunningBackend {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl RunningBackend {
    /// Base URL for [`Client::new`](crate::Client::new), e.g. `http://127.0.0.1:38211/api/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Stops serving. In-flight requests are dropped.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for RunningBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockBackend {
    /// An empty backend.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            db: Arc::new(Mutex::new(Db::default())),
            latency,
        }
    }

    /// A backend holding `drafts`, with ids assigned in order starting at `"1"`.
    #[must_use]
    pub fn with_employees(drafts: impl IntoIterator<Item = EmployeeDraft>, latency: Duration) -> Self {
        let mut db = Db::default();
        for draft in drafts {
            db.insert(draft);
        }
        Self {
            db: Arc::new(Mutex::new(db)),
            latency,
        }
    }

    /// A backend seeded with `config.seed_count` synthetic employees.
    #[must_use]
    pub fn from_config(config: &MockConfig) -> Self {
        Self::with_employees(seed::generate_many(config.seed_count), config.latency)
    }

    /// Inserts a record directly, bypassing HTTP.
    pub async fn insert(&self, draft: EmployeeDraft) -> Employee {
        self.db.lock().await.insert(draft)
    }

    /// The records currently stored, in insertion order.
    pub async fn employees(&self) -> Vec<Employee> {
        self.db.lock().await.employees.clone()
    }

    /// While enabled, every route answers 503 `{"error": "Service unavailable"}`.
    pub async fn set_outage(&self, outage: bool) {
        debug!(outage, "mock backend outage switched");
        self.db.lock().await.outage = outage;
    }

    #[must_use]
    pub fn router(&self) -> axum::Router {
        routes::router(self.clone())
    }

    /// Binds `addr` and serves in a background task. Use port 0 for an ephemeral port.
    pub async fn spawn(&self, addr: SocketAddr) -> std::io::Result<RunningBackend> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let router = self.router();
        info!(%addr, "mock employee backend listening");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("mock backend stopped: {e}");
            }
        });
        Ok(RunningBackend { addr, handle })
    }

    /// Binds `addr` and serves until the task is cancelled or the server fails.
    pub async fn serve(&self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "mock employee backend listening");
        axum::serve(listener, self.router()).await
    }
}
