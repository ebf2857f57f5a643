use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Jane Doe",
        "email": "jane.doe@company.com",
        "role": "Staff",
        "phone": "+8801712345678",
        "join_date": "2024-01-01",
        "entitlement": 24.0,
        "balance": 18.5,
        "created_at": "2024-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    #[schema(example = "Staff")]
    pub role: String,

    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "2024-01-01", format = "date", value_type = Option<String>, nullable = true)]
    pub join_date: Option<NaiveDate>,

    /// Leave days allotted for the current year
    #[schema(example = 24.0)]
    pub entitlement: f64,

    /// Leave days left; may go negative
    #[schema(example = 18.5)]
    pub balance: f64,

    #[schema(example = "2024-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Staff", nullable = true)]
    pub role: Option<String>,
    #[serde(default)]
    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(example = "2024-01-01", format = "date", value_type = Option<String>, nullable = true)]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    #[schema(example = 24.0)]
    pub entitlement: f64,
    #[serde(default)]
    #[schema(example = 24.0)]
    pub balance: f64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
            phone: None,
            join_date: None,
            entitlement: 0.0,
            balance: 0.0,
        }
    }

    pub fn with_leave(mut self, entitlement: f64, balance: f64) -> Self {
        self.entitlement = entitlement;
        self.balance = balance;
        self
    }
}
