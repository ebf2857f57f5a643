use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
}

/// Request lifecycle. `Pending` is the only state with outgoing transitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "leave_type": "annual",
        "start_date": "2026-01-05",
        "end_date": "2026-01-07",
        "half_day": false,
        "days_requested": 3.0,
        "status": "pending",
        "reason": "family trip",
        "applied_on": "2026-01-01T09:30:00Z",
        "decided_at": null
    })
)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,

    /// employee who applied
    #[schema(example = 1)]
    pub employee_id: i64,

    pub leave_type: LeaveType,

    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    pub half_day: bool,

    #[schema(example = 3.0)]
    pub days_requested: f64,

    pub status: LeaveStatus,

    #[schema(example = "family trip")]
    pub reason: String,

    #[schema(example = "2026-01-01T09:30:00Z", format = "date-time", value_type = String)]
    pub applied_on: DateTime<Utc>,

    #[schema(format = "date-time", value_type = Option<String>, nullable = true)]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Fields an employee supplies when applying.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewLeaveRequest {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub half_day: bool,
    #[serde(default)]
    #[schema(example = "family trip")]
    pub reason: String,
}

impl NewLeaveRequest {
    /// A full-day annual request with no reason.
    pub fn annual(employee_id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            employee_id,
            leave_type: LeaveType::Annual,
            start_date,
            end_date,
            half_day: false,
            reason: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_text_matches_stored_form() {
        assert_eq!(LeaveStatus::Approved.to_string(), "approved");
        assert_eq!(LeaveStatus::from_str("rejected").unwrap(), LeaveStatus::Rejected);
        assert_eq!(
            serde_json::to_value(LeaveType::Sick).unwrap(),
            serde_json::json!("sick")
        );
    }
}
