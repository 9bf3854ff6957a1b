//! The employee collection store.
//!
//! [`EmployeeStore`] owns the single [`Snapshot`] of the collection that every view
//! renders from. Only the four store operations mutate it; views read it through
//! [`EmployeeStore::snapshot`] or follow changes through [`EmployeeStore::subscribe`].
//!
//! All operations share one [`Status`]. When operations overlap, their transitions
//! interleave and the last one to resolve wins.
//!
//! ```no_run
//! use staffbook::{Client, EmployeeStore, Status};
//!
//! # async fn example() -> staffbook::error::Result<()> {
//! let store = EmployeeStore::new(Client::from_env()?);
//! store.list().await?;
//! assert_eq!(store.snapshot().status, Status::Succeeded);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::client::Client;
use crate::entities::{Employee, EmployeeDraft};
use crate::error::{Error, Result};

/// Messages stored in [`Snapshot::error`] when an operation fails.
pub mod messages {
    pub const FETCH_FAILED: &str = "Failed to fetch employees";
    pub const ADD_FAILED: &str = "Failed to add employee";
    pub const UPDATE_FAILED: &str = "Failed to update employee";
    pub const DELETE_FAILED: &str = "Failed to delete employee";
    /// Used instead of the per-operation message when the backend reports the
    /// record as absent.
    pub const NOT_FOUND: &str = "Employee not found";
}

/// Lifecycle of the most recently initiated operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing has been requested yet in this session.
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// The collection as views see it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Records in server order; created records are appended.
    pub employees: Vec<Employee>,
    pub status: Status,
    /// Set whenever `status` is [`Status::Failed`].
    pub error: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn begin(&mut self) {
        self.status = Status::Loading;
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }

    fn fail(&mut self, message: &str) {
        self.status = Status::Failed;
        self.error = Some(message.to_string());
    }
}

/// Picks the snapshot message for a failed operation.
fn failure_message(error: &Error, fallback: &'static str) -> &'static str {
    if error.is_not_found() {
        messages::NOT_FOUND
    } else {
        fallback
    }
}

/// Client-side state container synchronized with the employee API.
///
/// Cloning is cheap and every clone shares the same snapshot, so one store can be
/// handed to each view that needs it. Separate `EmployeeStore::new` calls produce
/// fully isolated containers.
#[derive(Clone, Debug)]
pub struct EmployeeStore {
    client: Client,
    state: Arc<watch::Sender<Snapshot>>,
}

impl EmployeeStore {
    /// Creates a store in the idle state with an empty collection.
    #[must_use]
    pub fn new(client: Client) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            client,
            state: Arc::new(state),
        }
    }

    /// Creates a store whose client is configured from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Client::from_env()?))
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// A copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// A receiver that observes every change to the snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    fn transition(&self, change: impl FnOnce(&mut Snapshot)) {
        self.state.send_modify(|snapshot| {
            let before = snapshot.status;
            change(snapshot);
            debug!(from = ?before, to = ?snapshot.status, records = snapshot.len(), "store transition");
        });
    }

    fn record_failure(&self, error: &Error, message: &'static str) {
        warn!(%error, user_message = message, "employee operation failed");
        self.transition(|snapshot| snapshot.fail(message));
    }

    /// Replaces the collection with the server's list.
    ///
    /// The status becomes `Loading` as soon as the future is first polled. On failure
    /// the previous collection is kept.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn list(&self) -> Result<()> {
        self.transition(Snapshot::begin);
        match self.client.employees().list().await {
            Ok(employees) => {
                self.transition(|snapshot| {
                    snapshot.employees = employees;
                    snapshot.succeed();
                });
                Ok(())
            }
            Err(error) => {
                self.record_failure(&error, messages::FETCH_FAILED);
                Err(error)
            }
        }
    }

    /// Creates a record and appends the server's copy (with its new id).
    #[instrument(skip(self, draft), fields(request_id = %Uuid::new_v4()))]
    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        self.transition(Snapshot::begin);
        match self.client.employees().create(draft).await {
            Ok(employee) => {
                debug!(id = %employee.id, "employee created");
                self.transition(|snapshot| {
                    snapshot.employees.push(employee.clone());
                    snapshot.succeed();
                });
                Ok(employee)
            }
            Err(error) => {
                self.record_failure(&error, messages::ADD_FAILED);
                Err(error)
            }
        }
    }

    /// Updates the record at `id`, replacing the local copy in place.
    ///
    /// If no local record has that id the server change is not reflected locally
    /// until the next [`EmployeeStore::list`].
    #[instrument(skip(self, draft), fields(request_id = %Uuid::new_v4()))]
    pub async fn update(&self, id: &str, draft: &EmployeeDraft) -> Result<Employee> {
        self.transition(Snapshot::begin);
        match self.client.employees().update(id, draft).await {
            Ok(employee) => {
                self.transition(|snapshot| {
                    match snapshot.employees.iter_mut().find(|e| e.id == employee.id) {
                        Some(slot) => *slot = employee.clone(),
                        None => warn!(id = %employee.id, "updated employee is not in the local collection"),
                    }
                    snapshot.succeed();
                });
                Ok(employee)
            }
            Err(error) => {
                self.record_failure(&error, failure_message(&error, messages::UPDATE_FAILED));
                Err(error)
            }
        }
    }

    /// Deletes the record at `id` and drops it from the collection.
    ///
    /// Success leaves status and error as they were, so an earlier failure stays
    /// visible; unlike the other operations it never clears `error`. Failure marks
    /// the store failed.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.client.employees().delete(id).await {
            Ok(()) => {
                self.transition(|snapshot| snapshot.employees.retain(|e| e.id != id));
                Ok(())
            }
            Err(error) => {
                self.record_failure(&error, failure_message(&error, messages::DELETE_FAILED));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_idle_and_empty() {
        let store = EmployeeStore::new(Client::new("http://localhost:1/api").unwrap());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, Status::Idle);
        assert!(snapshot.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn failure_then_success_clears_error() {
        let mut snapshot = Snapshot::default();
        snapshot.begin();
        snapshot.fail(messages::FETCH_FAILED);
        assert_eq!(snapshot.status, Status::Failed);
        assert_eq!(snapshot.error.as_deref(), Some(messages::FETCH_FAILED));

        snapshot.begin();
        assert_eq!(snapshot.status, Status::Loading);
        snapshot.succeed();
        assert_eq!(snapshot.status, Status::Succeeded);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn not_found_overrides_operation_message() {
        let missing = Error::not_found("Employee", "http://localhost/api/employees/9", None);
        assert_eq!(failure_message(&missing, messages::DELETE_FAILED), messages::NOT_FOUND);
        assert_eq!(
            failure_message(&Error::InvalidEndpoint, messages::DELETE_FAILED),
            messages::DELETE_FAILED
        );
    }

    #[test]
    fn clones_share_state_but_new_stores_do_not() {
        let client = Client::new("http://localhost:1/api").unwrap();
        let store = EmployeeStore::new(client.clone());
        let shared = store.clone();
        let isolated = EmployeeStore::new(client);

        store.transition(Snapshot::begin);
        assert_eq!(shared.snapshot().status, Status::Loading);
        assert_eq!(isolated.snapshot().status, Status::Idle);
    }
}
