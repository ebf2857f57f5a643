// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveDate;
use leave_ledger::LeaveLedger;
use leave_ledger::db::init_db;
use leave_ledger::model::employee::{Employee, NewEmployee};
use leave_ledger::model::leave_request::LeaveStatus;
use leave_ledger::notify::{LeaveEvent, Notifier};
use tempfile::TempDir;

/// Keeps every event so tests can assert on what would have been emailed.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<LeaveEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<LeaveEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<LeaveStatus> {
        self.events().iter().map(|e| e.new_status).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: LeaveEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct TestLedger {
    pub ledger: LeaveLedger,
    pub notifier: Arc<RecordingNotifier>,
    pub db_url: String,
    // dropped last so the database file outlives the pool
    _dir: TempDir,
}

/// Ledger over a fresh SQLite file in a temporary directory.
pub async fn test_ledger() -> Result<TestLedger> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("leave.db");
    let db_url = format!("sqlite:{}", db_path.display());
    let pool = init_db(&db_url).await?;

    let notifier = Arc::new(RecordingNotifier::default());
    let ledger = LeaveLedger::new(pool, notifier.clone());

    Ok(TestLedger {
        ledger,
        notifier,
        db_url,
        _dir: dir,
    })
}

impl TestLedger {
    /// A second ledger with its own pool on the same database file.
    pub async fn reopen(&self) -> Result<LeaveLedger> {
        let pool = init_db(&self.db_url).await?;
        Ok(LeaveLedger::new(pool, Arc::new(RecordingNotifier::default())))
    }

    /// Directory that is removed together with the database.
    pub fn dir(&self) -> &std::path::Path {
        self._dir.path()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn add_employee(
    ledger: &LeaveLedger,
    name: &str,
    entitlement: f64,
    balance: f64,
) -> Result<Employee> {
    let email = format!("{}@example.com", name.to_lowercase());
    Ok(ledger
        .create_employee(NewEmployee::new(name, email).with_leave(entitlement, balance))
        .await?)
}
