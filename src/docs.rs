use crate::api::employee::{BalanceResponse, SetDays};
use crate::api::leave_request::LeaveFilter;
use crate::ledger::{LeavePage, Submission};
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
use crate::models::{AdminLoginReq, LoginResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Ledger API",
        version = "0.1.0",
        description = r#"
## Leave Management

Employees submit leave requests; an admin approves or rejects them and
adjusts entitlements and balances by hand.

### Rules
- A request starts **pending** and is decided exactly once.
- Approval debits the requested days from the employee's balance. Balances may go negative.
- Rejection leaves the balance untouched.
- Entitlement and balance overwrites are unconditional (manual yearly reset).

### Security
Admin endpoints need `Authorization: Bearer <token>` from `POST /auth/admin/login`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::admin_login,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::get_balance,
        crate::api::employee::leave_history,
        crate::api::employee::set_entitlement,
        crate::api::employee::set_balance
    ),
    components(
        schemas(
            AdminLoginReq,
            LoginResponse,
            LeaveFilter,
            LeaveRequest,
            LeaveStatus,
            LeaveType,
            NewLeaveRequest,
            Submission,
            LeavePage,
            Employee,
            NewEmployee,
            SetDays,
            BalanceResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Admin login"),
        (name = "Leave", description = "Leave request workflow"),
        (name = "Employee", description = "Employee records and balances"),
    )
)]
pub struct ApiDoc;

/// Prefix the handler paths are documented under.
const DOCUMENTED_PREFIX: &str = "/api";

/// The OpenAPI document with leave and employee paths moved under `api_prefix`.
pub fn api_doc(api_prefix: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = api_prefix.trim_end_matches('/');
    if prefix == DOCUMENTED_PREFIX {
        return doc;
    }

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                (format!("{prefix}{rest}"), item)
            }
            _ => (path, item),
        })
        .collect();
    doc
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
