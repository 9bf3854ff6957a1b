pub mod employee;

pub use employee::{Employee, EmployeeDraft, Field};
