use crate::entities::{Employee, EmployeeDraft, Field};
use crate::store::EmployeeStore;

use super::SubmitError;

/// The "add employee" form: one local draft, submitted through the store.
#[derive(Debug)]
pub struct CreateForm {
    store: EmployeeStore,
    draft: EmployeeDraft,
}

impl CreateForm {
    #[must_use]
    pub fn new(store: EmployeeStore) -> Self {
        Self {
            store,
            draft: EmployeeDraft::default(),
        }
    }

    #[must_use]
    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        self.draft.missing_fields()
    }

    pub fn reset(&mut self) {
        self.draft = EmployeeDraft::default();
    }

    /// Creates the employee and clears the form.
    ///
    /// An incomplete draft is rejected without contacting the backend. If the
    /// store reports a failure the draft is kept so the user can retry.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<Employee, SubmitError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "create form incomplete");
            return Err(SubmitError::Incomplete(missing));
        }

        let employee = self.store.create(&self.draft).await?;
        self.reset();
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Client;
    use crate::store::Status;

    fn offline_store() -> EmployeeStore {
        EmployeeStore::new(Client::new("http://127.0.0.1:9/api").unwrap())
    }

    #[tokio::test]
    async fn incomplete_draft_never_reaches_the_store() {
        let store = offline_store();
        let mut form = CreateForm::new(store.clone());
        form.set(Field::FirstName, "New");

        let error = form.submit().await.unwrap_err();
        assert!(matches!(error, SubmitError::Incomplete(ref fields) if fields.len() == 6));
        assert_eq!(form.draft().first_name, "New");
        assert_eq!(store.snapshot().status, Status::Idle);
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = CreateForm::new(offline_store());
        for field in Field::ALL {
            form.set(field, "x");
        }
        assert!(form.missing_fields().is_empty());
        form.reset();
        assert_eq!(form.draft(), &EmployeeDraft::default());
    }
}
