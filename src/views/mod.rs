//! Headless view models over an [`EmployeeStore`](crate::EmployeeStore).
//!
//! Each view borrows or clones the store it is given and never keeps a second
//! copy of the collection; everything it renders comes from the store's current
//! snapshot. Rendering itself (terminal, web, GUI) is left to the caller.

use miette::Diagnostic;
use thiserror::Error;

use crate::entities::Field;

pub mod edit;
pub mod form;
pub mod list;

pub use edit::EditDialog;
pub use form::CreateForm;
pub use list::{EmployeeList, ListView};

/// Why a form or dialog submission did not go through.
#[derive(Debug, Error, Diagnostic)]
pub enum SubmitError {
    #[error("required fields are empty: {}", join_labels(.0))]
    #[diagnostic(
        code(staffbook::views::incomplete),
        help("Fill in every field before submitting")
    )]
    Incomplete(Vec<Field>),

    #[error(transparent)]
    #[diagnostic(
        code(staffbook::views::store_failed),
        help("The employee API rejected the request; the store's error field has the user-facing message")
    )]
    Store(#[from] crate::error::Error),
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}
