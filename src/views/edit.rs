use crate::entities::{Employee, EmployeeDraft, Field};
use crate::store::EmployeeStore;

use super::SubmitError;

/// The edit dialog: a draft seeded from one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDialog {
    id: String,
    draft: EmployeeDraft,
    open: bool,
}

impl EditDialog {
    /// Opens the dialog for `employee`.
    #[must_use]
    pub fn open(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            draft: employee.draft(),
            open: true,
        }
    }

    /// Points the dialog at another record, discarding local edits.
    pub fn reseed(&mut self, employee: &Employee) {
        self.id.clone_from(&employee.id);
        self.draft = employee.draft();
        self.open = true;
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Sends the draft as an update for the seeded record and closes the dialog.
    ///
    /// An incomplete draft keeps the dialog open and is not sent.
    #[instrument(skip(self, store), fields(id = %self.id))]
    pub async fn submit(&mut self, store: &EmployeeStore) -> Result<Employee, SubmitError> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(SubmitError::Incomplete(missing));
        }

        self.close();
        Ok(store.update(&self.id, &self.draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, first_name: &str) -> Employee {
        EmployeeDraft::default()
            .with(Field::FirstName, first_name)
            .with(Field::Department, "Design")
            .into_employee(id)
    }

    #[test]
    fn reseed_replaces_id_and_local_edits() {
        let mut dialog = EditDialog::open(&employee("1", "Jane"));
        dialog.set(Field::Department, "Sales");
        assert_eq!(dialog.draft().department, "Sales");

        dialog.close();
        dialog.reseed(&employee("2", "John"));
        assert!(dialog.is_open());
        assert_eq!(dialog.id(), "2");
        assert_eq!(dialog.draft().first_name, "John");
        assert_eq!(dialog.draft().department, "Design");
    }
}
