use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::error::LedgerError;
use crate::ledger::LeaveLedger;
use crate::model::employee::NewEmployee;
use crate::store;

/// Parses a JSON array of employees.
pub fn parse_roster(raw: &str) -> Result<Vec<NewEmployee>> {
    serde_json::from_str(raw).context("Seed file must be a JSON array of employees")
}

/// Loads the roster into an empty employees table. A table that already has
/// rows is left alone, so restarts never duplicate or reset anyone.
///
/// Entries that are duplicates or invalid are skipped with a warning and the
/// rest of the roster is still loaded. Returns how many were created.
pub async fn seed_employees(ledger: &LeaveLedger, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();

    if store::count_employees(ledger.pool()).await? > 0 {
        info!(path = %path.display(), "Employees already present, skipping seed");
        return Ok(0);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read seed file {}", path.display()))?;
    let roster = parse_roster(&raw)?;

    let mut created = 0;
    for employee in roster {
        let name = employee.name.clone();
        match ledger.create_employee(employee).await {
            Ok(_) => created += 1,
            Err(e @ (LedgerError::Duplicate(_) | LedgerError::InvalidInput(_))) => {
                warn!(name = %name, error = %e, "Skipping seed entry");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to seed employee {name:?}"));
            }
        }
    }

    info!(count = created, path = %path.display(), "Seeded employees");
    Ok(created)
}
