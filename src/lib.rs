//! # staffbook
//!
//! A client for a small employee directory API: typed REST bindings, a
//! collection store that keeps a local copy of the directory in sync with the
//! backend, and headless view models for the usual list/create/edit screens.
//!
//! ```no_run
//! use staffbook::{Client, EmployeeStore, views::EmployeeList};
//!
//! # async fn example() -> miette::Result<()> {
//! let store = EmployeeStore::new(Client::new("http://localhost:3000/api")?);
//! let mut list = EmployeeList::new(store.clone());
//! list.mount().await?;
//! println!("{:?}", list.render());
//! # Ok(())
//! # }
//! ```
//!
//! ## Mock backend
//!
//! The `mock-server` feature (on by default) provides [`mock::MockBackend`], an
//! in-memory server implementing the same REST contract, for tests and demos.
//!
//! ## Error context
//!
//! Errors capture a [`SpanTrace`] when created. Install
//! `tracing_error::ErrorLayer` in your subscriber to populate it:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod store;
pub mod utils;
pub mod views;

#[cfg(feature = "mock-server")]
pub mod mock;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use client::{Client, EmployeesApi};
pub use endpoints::EmployeeEndpoint;
pub use entities::*;
pub use error::Error;
pub use store::{EmployeeStore, Snapshot, Status};

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
