pub mod employee;
pub mod leave_request;

use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "leave-ledger",
        "status": "ok"
    }))
}
