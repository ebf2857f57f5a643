use crate::{
    api::{employee, leave_request},
    auth::handlers,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub type LoginLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter config for the admin login route.
///
/// Built once and shared by every worker so the quota is global.
pub fn login_limiter(requests_per_min: u32) -> Option<LoginLimiter> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: &LoginLimiter) {
    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/admin/login")
                .wrap(Governor::new(limiter))
                .route(web::post().to(handlers::admin_login)),
        ),
    );

    // Admin-only handlers take an `AdminUser` argument
    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/{id}
                    .service(web::resource("/{id}").route(web::get().to(employee::get_employee)))
                    // /employee/{id}/balance
                    .service(
                        web::resource("/{id}/balance")
                            .route(web::get().to(employee::get_balance))
                            .route(web::put().to(employee::set_balance)),
                    )
                    // /employee/{id}/entitlement
                    .service(
                        web::resource("/{id}/entitlement")
                            .route(web::put().to(employee::set_entitlement)),
                    )
                    // /employee/{id}/leave
                    .service(
                        web::resource("/{id}/leave").route(web::get().to(employee::leave_history)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    ),
            ),
    );
}

// ADMIN LOGIN
//  └─ POST /auth/admin/login {password} → access_token
//
// ADMIN REQUEST
//  └─ Authorization: Bearer access_token
