use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::utils::{date_format, serde_helpers::string_or_number};

/// An employee record as stored by the backend.
///
/// The `id` is assigned by the backend on creation and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Job title.
    pub position: String,
    pub department: String,
    pub phone_number: String,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub hire_date: String,
}

/// The mutable attributes of an [`Employee`], used as the create/update payload.
///
/// A draft has no identifier; update and delete take the id separately.
/// Unknown keys (including a stray `id`) are ignored when decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub phone_number: String,
    pub hire_date: String,
}

/// One of the seven attributes shared by [`Employee`] and [`EmployeeDraft`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Position,
    Department,
    PhoneNumber,
    HireDate,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Position,
        Self::Department,
        Self::PhoneNumber,
        Self::HireDate,
    ];

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Position => "Position",
            Self::Department => "Department",
            Self::PhoneNumber => "Phone Number",
            Self::HireDate => "Hire Date",
        }
    }

    /// Key used for the field on the wire.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Position => "position",
            Self::Department => "department",
            Self::PhoneNumber => "phoneNumber",
            Self::HireDate => "hireDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl EmployeeDraft {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Position => &self.position,
            Field::Department => &self.department,
            Field::PhoneNumber => &self.phone_number,
            Field::HireDate => &self.hire_date,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Position => &mut self.position,
            Field::Department => &mut self.department,
            Field::PhoneNumber => &mut self.phone_number,
            Field::HireDate => &mut self.hire_date,
        };
        *slot = value.into();
    }

    /// Builder-style variant of [`EmployeeDraft::set`].
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Fields whose value is empty or whitespace. All fields are required.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Parses the hire date, if it is a valid `YYYY-MM-DD` date.
    #[must_use]
    pub fn hire_date(&self) -> Option<Date> {
        date_format::parse_iso_date(&self.hire_date).ok()
    }

    /// Attaches a backend-assigned identifier.
    #[must_use]
    pub fn into_employee(self, id: impl Into<String>) -> Employee {
        Employee {
            id: id.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            position: self.position,
            department: self.department,
            phone_number: self.phone_number,
            hire_date: self.hire_date,
        }
    }
}

impl Employee {
    /// The record's attributes without its identifier.
    #[must_use]
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            phone_number: self.phone_number.clone(),
            hire_date: self.hire_date.clone(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        employee.draft()
    }
}

/// List payloads arrive either as a bare array or wrapped in `{"employees": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse {
    Bare(Vec<Employee>),
    Wrapped { employees: Vec<Employee> },
}

impl From<ListResponse> for Vec<Employee> {
    fn from(response: ListResponse) -> Self {
        match response {
            ListResponse::Bare(employees) | ListResponse::Wrapped { employees } => employees,
        }
    }
}

/// Single-record payloads arrive either wrapped in `{"employee": {...}}` or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SingleResponse {
    Wrapped { employee: Employee },
    Bare(Employee),
}

impl From<SingleResponse> for Employee {
    fn from(response: SingleResponse) -> Self {
        match response {
            SingleResponse::Wrapped { employee } | SingleResponse::Bare(employee) => employee,
        }
    }
}
