//! Row-level reads and writes for employees and leave requests.
//!
//! Every function takes any `SqliteExecutor`, so callers can pass the pool
//! for one-off statements or `&mut *tx` to run inside a transaction.
//!
//! Writes with `RETURNING` are read with `fetch_all`: SQLite only finishes
//! (and autocommits) the statement once it has been stepped past the last
//! row, and `fetch_one`/`fetch_optional` stop at the first.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqliteExecutor};

use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest};

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, role, phone, join_date, entitlement, balance, created_at";

const REQUEST_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, half_day, \
     days_requested, status, reason, applied_on, decided_at";

/// Optional filters for listing leave requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestFilter {
    pub employee_id: Option<i64>,
    pub status: Option<LeaveStatus>,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    I64(i64),
    Status(LeaveStatus),
}

impl RequestFilter {
    fn where_clause(&self) -> (String, Vec<FilterValue>) {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args = Vec::new();

        if let Some(employee_id) = self.employee_id {
            where_sql.push_str(" AND employee_id = ?");
            args.push(FilterValue::I64(employee_id));
        }

        if let Some(status) = self.status {
            where_sql.push_str(" AND status = ?");
            args.push(FilterValue::Status(status));
        }

        (where_sql, args)
    }
}

// -------------------------
// Employees
// -------------------------

pub async fn insert_employee<'e, E>(
    exec: E,
    employee: &NewEmployee,
    created_at: DateTime<Utc>,
) -> Result<Employee, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO employees
            (name, email, role, phone, join_date, entitlement, balance, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    );

    sqlx::query_as::<Sqlite, Employee>(&sql)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.role.as_deref().unwrap_or("Staff"))
        .bind(&employee.phone)
        .bind(employee.join_date)
        .bind(employee.entitlement)
        .bind(employee.balance)
        .bind(created_at)
        .fetch_all(exec)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_employee<'e, E>(exec: E, id: i64) -> Result<Option<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");

    sqlx::query_as::<Sqlite, Employee>(&sql)
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn list_employees<'e, E>(exec: E) -> Result<Vec<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name");

    sqlx::query_as::<Sqlite, Employee>(&sql).fetch_all(exec).await
}

pub async fn count_employees<'e, E>(exec: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(exec)
        .await
}

/// Overwrites the entitlement; `None` when the employee does not exist.
pub async fn update_entitlement<'e, E>(
    exec: E,
    id: i64,
    entitlement: f64,
) -> Result<Option<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("UPDATE employees SET entitlement = ? WHERE id = ? RETURNING {EMPLOYEE_COLUMNS}");

    sqlx::query_as::<Sqlite, Employee>(&sql)
        .bind(entitlement)
        .bind(id)
        .fetch_all(exec)
        .await
        .map(|rows| rows.into_iter().next())
}

/// Overwrites the balance; `None` when the employee does not exist.
pub async fn update_balance<'e, E>(
    exec: E,
    id: i64,
    balance: f64,
) -> Result<Option<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("UPDATE employees SET balance = ? WHERE id = ? RETURNING {EMPLOYEE_COLUMNS}");

    sqlx::query_as::<Sqlite, Employee>(&sql)
        .bind(balance)
        .bind(id)
        .fetch_all(exec)
        .await
        .map(|rows| rows.into_iter().next())
}

/// Subtracts `days` from the balance in place, without reading it first.
pub async fn debit_balance<'e, E>(
    exec: E,
    id: i64,
    days: f64,
) -> Result<Option<Employee>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "UPDATE employees SET balance = balance - ? WHERE id = ? RETURNING {EMPLOYEE_COLUMNS}"
    );

    sqlx::query_as::<Sqlite, Employee>(&sql)
        .bind(days)
        .bind(id)
        .fetch_all(exec)
        .await
        .map(|rows| rows.into_iter().next())
}

// -------------------------
// Leave requests
// -------------------------

pub async fn insert_leave_request<'e, E>(
    exec: E,
    request: &NewLeaveRequest,
    days_requested: f64,
    applied_on: DateTime<Utc>,
) -> Result<LeaveRequest, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO leave_requests
            (employee_id, leave_type, start_date, end_date, half_day, days_requested, status, reason, applied_on)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {REQUEST_COLUMNS}
        "#
    );

    sqlx::query_as::<Sqlite, LeaveRequest>(&sql)
        .bind(request.employee_id)
        .bind(request.leave_type)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.half_day)
        .bind(days_requested)
        .bind(LeaveStatus::Pending)
        .bind(&request.reason)
        .bind(applied_on)
        .fetch_all(exec)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_leave_request<'e, E>(exec: E, id: i64) -> Result<Option<LeaveRequest>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ?");

    sqlx::query_as::<Sqlite, LeaveRequest>(&sql)
        .bind(id)
        .fetch_optional(exec)
        .await
}

/// Moves a pending request to `to`. Returns `None` when the row is missing
/// or no longer pending, leaving it untouched.
pub async fn transition_pending<'e, E>(
    exec: E,
    id: i64,
    to: LeaveStatus,
    decided_at: DateTime<Utc>,
) -> Result<Option<LeaveRequest>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        UPDATE leave_requests
        SET status = ?, decided_at = ?
        WHERE id = ?
        AND status = ?
        RETURNING {REQUEST_COLUMNS}
        "#
    );

    sqlx::query_as::<Sqlite, LeaveRequest>(&sql)
        .bind(to)
        .bind(decided_at)
        .bind(id)
        .bind(LeaveStatus::Pending)
        .fetch_all(exec)
        .await
        .map(|rows| rows.into_iter().next())
}

pub async fn count_leave_requests<'e, E>(exec: E, filter: &RequestFilter) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let (where_sql, args) = filter.where_clause();
    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{where_sql}");

    let mut count_q = sqlx::query_scalar::<Sqlite, i64>(&count_sql);
    for arg in args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(v),
            FilterValue::Status(s) => count_q.bind(s),
        };
    }

    count_q.fetch_one(exec).await
}

/// Newest first.
pub async fn list_leave_requests<'e, E>(
    exec: E,
    filter: &RequestFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<LeaveRequest>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let (where_sql, args) = filter.where_clause();
    let data_sql = format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM leave_requests
        {where_sql}
        ORDER BY applied_on DESC, id DESC
        LIMIT ? OFFSET ?
        "#
    );

    let mut data_q = sqlx::query_as::<Sqlite, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Status(s) => data_q.bind(s),
        };
    }

    data_q.bind(limit).bind(offset).fetch_all(exec).await
}

pub async fn employee_history<'e, E>(exec: E, employee_id: i64) -> Result<Vec<LeaveRequest>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM leave_requests
        WHERE employee_id = ?
        ORDER BY applied_on DESC, id DESC
        "#
    );

    sqlx::query_as::<Sqlite, LeaveRequest>(&sql)
        .bind(employee_id)
        .fetch_all(exec)
        .await
}
