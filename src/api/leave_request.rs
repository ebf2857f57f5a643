use crate::auth::auth::AdminUser;
use crate::error::LedgerError;
use crate::ledger::{LeaveLedger, ListQuery, Submission};
use crate::model::leave_request::{LeaveStatus, NewLeaveRequest};
use crate::store::RequestFilter;
use actix_web::{HttpResponse, web};
use tracing::instrument;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = 123)]
    /// Filter by employee ID
    pub employee_id: Option<i64>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u32>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u32>,
}

impl From<LeaveFilter> for ListQuery {
    fn from(f: LeaveFilter) -> Self {
        ListQuery {
            filter: RequestFilter {
                employee_id: f.employee_id,
                status: f.status,
            },
            page: f.page,
            per_page: f.per_page,
        }
    }
}

/* =========================
Submit leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = NewLeaveRequest,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = Submission),
        (status = 400, description = "start_date is after end_date"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 42 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    ledger: web::Data<LeaveLedger>,
    payload: web::Json<NewLeaveRequest>,
) -> Result<HttpResponse, LedgerError> {
    let submission = ledger.submit_request(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(submission))
}

/* =========================
Approve leave (Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved and balance debited", body = crate::model::leave_request::LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request 1 is already approved"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "approve_leave", skip_all, fields(admin_jti = %admin.jti))]
pub async fn approve_leave(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let leave = ledger.approve_request(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
Reject leave (Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = crate::model::leave_request::LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request 1 is already rejected"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "reject_leave", skip_all, fields(admin_jti = %admin.jti))]
pub async fn reject_leave(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let leave = ledger.reject_request(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = crate::model::leave_request::LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request 9 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    ledger: web::Data<LeaveLedger>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let leave = ledger.request(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/// for getting leave applications endpoint (admin dashboard)
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = crate::ledger::LeavePage),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "leave_list", skip_all, fields(admin_jti = %admin.jti))]
pub async fn leave_list(
    admin: AdminUser,
    ledger: web::Data<LeaveLedger>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, LedgerError> {
    let page = ledger.list_requests(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(page))
}
