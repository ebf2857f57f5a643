//! Leave ledger: employee balances and the request approval workflow.
//!
//! A request starts `Pending` and is decided exactly once. Approval debits
//! the employee's balance in the same transaction as the status change, and
//! the status change itself is a compare-and-swap on `status = 'pending'`,
//! so concurrent deciders cannot both succeed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::LedgerError;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::notify::{LeaveEvent, Notifier};
use crate::store::{self, RequestFilter};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Inclusive calendar-day count of the range, less half a day when `half_day` is set.
pub fn requested_days(
    start_date: NaiveDate,
    end_date: NaiveDate,
    half_day: bool,
) -> Result<f64, LedgerError> {
    if start_date > end_date {
        return Err(LedgerError::InvalidInput(
            "start_date cannot be after end_date".to_string(),
        ));
    }

    let days = (end_date - start_date).num_days() as f64 + 1.0;
    Ok(if half_day { days - 0.5 } else { days })
}

/// Result of a submission: the stored request plus an over-balance warning, if any.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Submission {
    pub request: LeaveRequest,
    #[schema(example = "Applying for 5 days but only 2 available")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeavePage {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/// Filter plus 1-based pagination for [`LeaveLedger::list_requests`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ListQuery {
    pub filter: RequestFilter,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct LeaveLedger {
    pool: SqlitePool,
    notifier: Arc<dyn Notifier>,
}

impl LeaveLedger {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        Self { pool, notifier }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========================
    // Employee records
    // ========================

    pub async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, LedgerError> {
        let name = employee.name.trim();
        if name.is_empty() || employee.email.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "name and email must not be empty".to_string(),
            ));
        }
        ensure_finite("entitlement", employee.entitlement)?;
        ensure_finite("balance", employee.balance)?;

        let employee = NewEmployee {
            name: name.to_string(),
            ..employee
        };
        let created = store::insert_employee(&self.pool, &employee, Utc::now())
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation {
                        return LedgerError::Duplicate(format!("Employee {:?}", employee.name));
                    }
                }
                LedgerError::Database(e)
            })?;
        info!(employee_id = created.id, name = %created.name, "Employee created");
        Ok(created)
    }

    pub async fn employee(&self, employee_id: i64) -> Result<Employee, LedgerError> {
        store::fetch_employee(&self.pool, employee_id)
            .await?
            .ok_or_else(|| LedgerError::employee_not_found(employee_id))
    }

    pub async fn employees(&self) -> Result<Vec<Employee>, LedgerError> {
        Ok(store::list_employees(&self.pool).await?)
    }

    pub async fn balance(&self, employee_id: i64) -> Result<f64, LedgerError> {
        Ok(self.employee(employee_id).await?.balance)
    }

    /// Overwrites the entitlement with no check against the current balance.
    pub async fn set_entitlement(&self, employee_id: i64, value: f64) -> Result<Employee, LedgerError> {
        ensure_finite("entitlement", value)?;

        let employee = store::update_entitlement(&self.pool, employee_id, value)
            .await?
            .ok_or_else(|| LedgerError::employee_not_found(employee_id))?;
        info!(employee_id, entitlement = value, "Entitlement overwritten");
        Ok(employee)
    }

    /// Overwrites the balance unconditionally; this is how yearly resets happen.
    pub async fn set_balance(&self, employee_id: i64, value: f64) -> Result<Employee, LedgerError> {
        ensure_finite("balance", value)?;

        let employee = store::update_balance(&self.pool, employee_id, value)
            .await?
            .ok_or_else(|| LedgerError::employee_not_found(employee_id))?;
        info!(employee_id, balance = value, "Balance overwritten");
        Ok(employee)
    }

    // ========================
    // Leave requests
    // ========================

    /// Files a `Pending` request for an existing employee.
    ///
    /// Balance is not checked; an over-balance request is accepted and
    /// flagged through [`Submission::warning`].
    pub async fn submit_request(&self, request: NewLeaveRequest) -> Result<Submission, LedgerError> {
        let days = requested_days(request.start_date, request.end_date, request.half_day)?;

        let employee = self.employee(request.employee_id).await?;
        let created = store::insert_leave_request(&self.pool, &request, days, Utc::now()).await?;

        let warning = (employee.balance < days).then(|| {
            format!(
                "Applying for {days} days but only {} available",
                employee.balance
            )
        });
        if warning.is_some() {
            warn!(
                request_id = created.id,
                employee_id = employee.id,
                days,
                balance = employee.balance,
                "Leave request exceeds balance"
            );
        }
        info!(request_id = created.id, employee_id = employee.id, days, "Leave request submitted");

        self.notifier.notify(LeaveEvent::new(&created, &employee));

        Ok(Submission {
            request: created,
            warning,
        })
    }

    /// Approves a pending request and debits its days from the employee.
    pub async fn approve_request(&self, request_id: i64) -> Result<LeaveRequest, LedgerError> {
        self.decide(request_id, LeaveStatus::Approved).await
    }

    /// Rejects a pending request; the balance is left alone.
    pub async fn reject_request(&self, request_id: i64) -> Result<LeaveRequest, LedgerError> {
        self.decide(request_id, LeaveStatus::Rejected).await
    }

    async fn decide(&self, request_id: i64, to: LeaveStatus) -> Result<LeaveRequest, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let Some(request) = store::transition_pending(&mut *tx, request_id, to, Utc::now()).await?
        else {
            // nothing was written; dropping `tx` rolls back
            return Err(match store::fetch_leave_request(&mut *tx, request_id).await? {
                Some(current) => LedgerError::InvalidState {
                    id: request_id,
                    status: current.status,
                },
                None => LedgerError::request_not_found(request_id),
            });
        };

        let employee = match to {
            LeaveStatus::Approved => {
                store::debit_balance(&mut *tx, request.employee_id, request.days_requested).await?
            }
            _ => store::fetch_employee(&mut *tx, request.employee_id).await?,
        }
        .ok_or_else(|| LedgerError::employee_not_found(request.employee_id))?;

        tx.commit().await?;

        info!(
            request_id,
            employee_id = employee.id,
            status = %request.status,
            balance = employee.balance,
            "Leave request decided"
        );

        self.notifier.notify(LeaveEvent::new(&request, &employee));

        Ok(request)
    }

    pub async fn request(&self, request_id: i64) -> Result<LeaveRequest, LedgerError> {
        store::fetch_leave_request(&self.pool, request_id)
            .await?
            .ok_or_else(|| LedgerError::request_not_found(request_id))
    }

    /// All requests of one employee, newest first.
    pub async fn history(&self, employee_id: i64) -> Result<Vec<LeaveRequest>, LedgerError> {
        // resolve first so an unknown id is a 404 rather than an empty list
        self.employee(employee_id).await?;
        Ok(store::employee_history(&self.pool, employee_id).await?)
    }

    pub async fn list_requests(&self, query: ListQuery) -> Result<LeavePage, LedgerError> {
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let total = store::count_leave_requests(&self.pool, &query.filter).await?;
        let data =
            store::list_leave_requests(&self.pool, &query.filter, i64::from(per_page), offset).await?;

        Ok(LeavePage {
            data,
            page,
            per_page,
            total,
        })
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<(), LedgerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!("{field} must be a finite number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_day_counts_as_one() {
        assert_eq!(requested_days(date("2026-02-10"), date("2026-02-10"), false).unwrap(), 1.0);
    }

    #[test]
    fn range_is_inclusive_of_both_ends() {
        assert_eq!(requested_days(date("2026-02-10"), date("2026-02-12"), false).unwrap(), 3.0);
        // crosses a month boundary
        assert_eq!(requested_days(date("2026-02-27"), date("2026-03-02"), false).unwrap(), 4.0);
    }

    #[test]
    fn half_day_takes_off_half() {
        assert_eq!(requested_days(date("2026-02-10"), date("2026-02-10"), true).unwrap(), 0.5);
        assert_eq!(requested_days(date("2026-02-10"), date("2026-02-11"), true).unwrap(), 1.5);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = requested_days(date("2026-02-12"), date("2026-02-10"), false).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(ensure_finite("balance", 3.5).is_ok());
        assert!(ensure_finite("balance", -2.0).is_ok());
        assert!(ensure_finite("balance", f64::NAN).is_err());
        assert!(ensure_finite("entitlement", f64::INFINITY).is_err());
    }
}
