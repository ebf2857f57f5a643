use crate::auth::auth::AdminUser;
use crate::error::LedgerError;
use crate::ledger::LeaveLedger;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::LeaveRequest;
use actix_web::{HttpResponse, web};
use tracing::instrument;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for the admin overwrite endpoints.
#[derive(Deserialize, ToSchema)]
pub struct SetDays {
    #[schema(example = 24.0)]
    pub value: f64,
}

#[derive(Serialize, ToSchema)]
pub struct BalanceResponse {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = 7.5)]
    pub balance: f64,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing name or email"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "An employee with this name exists", body = Object, example = json!({
            "message": "Employee \"Jane Doe\" already exists"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip_all, fields(admin_jti = %admin.jti))]
pub async fn create_employee(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.create_employee(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "All employees ordered by name", body = [Employee]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip_all, fields(admin_jti = %admin.jti))]
pub async fn list_employees(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
) -> Result<HttpResponse, LedgerError> {
    let employees = ledger.employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 42 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}/balance",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Remaining leave days", body = BalanceResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_balance(
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let employee_id = path.into_inner();
    let balance = ledger.balance(employee_id).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse {
        employee_id,
        balance,
    }))
}

#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}/leave",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Leave history, newest first", body = [LeaveRequest]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn leave_history(
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let history = ledger.history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// Overwrite the yearly entitlement (manual reset)
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/entitlement",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = SetDays,
    responses(
        (status = 200, description = "Entitlement updated", body = Employee),
        (status = 400, description = "Value is not a finite number"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
#[instrument(name = "set_entitlement", skip_all, fields(admin_jti = %admin.jti))]
pub async fn set_entitlement(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
    payload: web::Json<SetDays>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.set_entitlement(path.into_inner(), payload.value).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Overwrite the remaining balance (manual reset)
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/balance",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = SetDays,
    responses(
        (status = 200, description = "Balance updated", body = Employee),
        (status = 400, description = "Value is not a finite number"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 42 not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
#[instrument(name = "set_balance", skip_all, fields(admin_jti = %admin.jti))]
pub async fn set_balance(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
    payload: web::Json<SetDays>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.set_balance(path.into_inner(), payload.value).await?;
    Ok(HttpResponse::Ok().json(employee))
}
