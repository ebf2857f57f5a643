use crate::{
    auth::{auth::AdminCredentials, jwt::generate_admin_token},
    config::Config,
    models::{AdminLoginReq, LoginResponse},
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{error, info, instrument, warn};

/// Exchanges the admin shared secret for a short-lived bearer token.
#[utoipa::path(
    post,
    path = "/auth/admin/login",
    request_body = AdminLoginReq,
    responses(
        (status = 200, description = "Admin token issued", body = LoginResponse),
        (status = 401, description = "Incorrect password", body = Object, example = json!({
            "message": "Incorrect password"
        })),
        (status = 429, description = "Too many login attempts")
    ),
    tag = "Auth"
)]
#[instrument(name = "admin_login", skip_all)]
pub async fn admin_login(
    payload: web::Json<AdminLoginReq>,
    credentials: web::Data<AdminCredentials>,
    config: web::Data<Config>,
) -> impl Responder {
    if !credentials.is_configured() {
        warn!("Admin login attempted but no admin password is configured");
        return HttpResponse::Unauthorized().json(json!({
            "message": "Incorrect password"
        }));
    }

    if payload.password.is_empty() || !credentials.verify(&payload.password) {
        info!("Admin login rejected");
        return HttpResponse::Unauthorized().json(json!({
            "message": "Incorrect password"
        }));
    }

    let access_token = match generate_admin_token(&config.jwt_secret, config.access_token_ttl) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to sign admin token");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }
    };

    info!("Admin login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.access_token_ttl,
    })
}
