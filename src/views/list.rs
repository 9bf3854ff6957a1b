use crate::entities::Employee;
use crate::error::Result;
use crate::store::{EmployeeStore, Snapshot, Status};

use super::{EditDialog, SubmitError};

/// Prompt shown before a delete is confirmed.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// What the employee table should display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Failed(String),
    Rows(Vec<Employee>),
}

impl From<&Snapshot> for ListView {
    fn from(snapshot: &Snapshot) -> Self {
        match snapshot.status {
            Status::Loading => Self::Loading,
            Status::Failed => Self::Failed(snapshot.error.clone().unwrap_or_default()),
            Status::Idle | Status::Succeeded => Self::Rows(snapshot.employees.clone()),
        }
    }
}

/// The employee table with its row actions.
#[derive(Debug)]
pub struct EmployeeList {
    store: EmployeeStore,
    pending_delete: Option<String>,
    editor: Option<EditDialog>,
}

impl EmployeeList {
    #[must_use]
    pub fn new(store: EmployeeStore) -> Self {
        Self {
            store,
            pending_delete: None,
            editor: None,
        }
    }

    /// Fetches the collection if nothing has been requested yet this session.
    /// Returns whether a fetch was issued.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) -> Result<bool> {
        if self.store.snapshot().status != Status::Idle {
            return Ok(false);
        }
        self.store.list().await?;
        Ok(true)
    }

    #[must_use]
    pub fn render(&self) -> ListView {
        ListView::from(&self.store.snapshot())
    }

    /// Asks for confirmation before deleting `id`; returns the prompt to show.
    pub fn request_delete(&mut self, id: impl Into<String>) -> &'static str {
        self.pending_delete = Some(id.into());
        DELETE_PROMPT
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the record awaiting confirmation. Returns `false` if none was pending.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self) -> Result<bool> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(false);
        };
        self.store.delete(&id).await?;
        Ok(true)
    }

    /// Opens the edit dialog for the row with `id`, re-seeding it if it was already
    /// showing another record. Returns `None` if the row is not in the collection.
    pub fn edit(&mut self, id: &str) -> Option<&mut EditDialog> {
        let snapshot = self.store.snapshot();
        let employee = snapshot.find(id)?;
        match &mut self.editor {
            Some(dialog) => dialog.reseed(employee),
            None => self.editor = Some(EditDialog::open(employee)),
        }
        self.editor.as_mut()
    }

    #[must_use]
    pub fn editor(&self) -> Option<&EditDialog> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditDialog> {
        self.editor.as_mut()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Submits the open edit dialog and closes it. Returns `Ok(None)` when no
    /// dialog is open.
    pub async fn save_edit(&mut self) -> std::result::Result<Option<Employee>, SubmitError> {
        let Some(dialog) = self.editor.as_mut() else {
            return Ok(None);
        };
        let result = dialog.submit(&self.store).await;
        if !dialog.is_open() {
            self.editor = None;
        }
        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EmployeeDraft, Field};

    #[test]
    fn failed_snapshot_renders_its_message() {
        let snapshot = Snapshot {
            status: Status::Failed,
            error: Some("Failed to fetch employees".into()),
            ..Snapshot::default()
        };
        assert_eq!(
            ListView::from(&snapshot),
            ListView::Failed("Failed to fetch employees".into())
        );
    }

    #[test]
    fn succeeded_snapshot_renders_rows_in_order() {
        let rows = vec![
            EmployeeDraft::default().with(Field::FirstName, "A").into_employee("1"),
            EmployeeDraft::default().with(Field::FirstName, "B").into_employee("2"),
        ];
        let snapshot = Snapshot {
            employees: rows.clone(),
            status: Status::Succeeded,
            error: None,
        };
        assert_eq!(ListView::from(&snapshot), ListView::Rows(rows));
        assert_eq!(
            ListView::from(&Snapshot {
                status: Status::Loading,
                ..snapshot
            }),
            ListView::Loading
        );
    }
}
