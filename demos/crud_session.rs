//! Walks through a full session against a local mock backend: mount the list,
//! add an employee through the form, edit it, then delete it.

#[macro_use]
extern crate tracing;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use staffbook::mock::MockBackend;
use staffbook::views::{CreateForm, EmployeeList, ListView};
use staffbook::{Client, EmployeeStore, Field};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let backend = MockBackend::with_employees(
        staffbook::mock::seed::generate_many(5),
        Duration::from_millis(100),
    );
    let server = backend.spawn(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let store = EmployeeStore::new(Client::new(&server.base_url())?);

    // Print every state change the views would re-render on.
    let mut changes = store.subscribe();
    let watcher = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            debug!(status = ?snapshot.status, count = snapshot.len(), error = ?snapshot.error, "store changed");
        }
    });

    let mut list = EmployeeList::new(store.clone());
    list.mount().await?;
    if let ListView::Rows(rows) = list.render() {
        for employee in &rows {
            info!("{:>3} {:<24} {}", employee.id, employee.full_name(), employee.department);
        }
    }

    let mut form = CreateForm::new(store.clone());
    form.set(Field::FirstName, "Sarah");
    form.set(Field::LastName, "Miller");
    form.set(Field::Email, "sarah.miller@example.com");
    form.set(Field::Position, "QA Engineer");
    form.set(Field::Department, "QA");
    form.set(Field::PhoneNumber, "555-222-3333");
    form.set(Field::HireDate, "2024-02-01");
    let created = form.submit().await?;
    info!("added {} as #{}", created.full_name(), created.id);

    let dialog = list
        .edit(&created.id)
        .context("new employee should be listed")?;
    dialog.set(Field::Position, "Senior QA Engineer");
    if let Some(updated) = list.save_edit().await? {
        info!("{} is now {}", updated.full_name(), updated.position);
    }

    info!("{}", list.request_delete(created.id.clone()));
    list.confirm_delete().await?;
    info!("{} employees remain", store.snapshot().len());

    drop(list);
    drop(form);
    drop(store);
    watcher.await?;
    server.shutdown();
    Ok(())
}
