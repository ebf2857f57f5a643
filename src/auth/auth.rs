use crate::auth::jwt::{ADMIN_SUBJECT, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::models::TokenRole;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

/// Proof that the request carried a valid admin token.
///
/// Taking this as a handler argument is the whole admin check: the token is
/// verified against `JWT_SECRET` on every request and nothing is kept
/// between requests.
#[derive(Debug)]
pub struct AdminUser {
    pub jti: String,
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    actix_web::error::ErrorInternalServerError("Config missing"),
                ));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        if claims.role != TokenRole::Admin || claims.sub != ADMIN_SUBJECT {
            return ready(Err(ErrorUnauthorized("Admin only")));
        }

        ready(Ok(AdminUser { jti: claims.jti }))
    }
}

/// The configured admin secret, held only as an argon2 hash.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    password_hash: Option<String>,
}

impl AdminCredentials {
    /// Prefers `ADMIN_PASSWORD_HASH`; otherwise hashes `ADMIN_PASSWORD`.
    /// With neither set, every login attempt fails.
    pub fn from_config(config: &Config) -> Result<Self, argon2::password_hash::Error> {
        let password_hash = match (&config.admin_password_hash, &config.admin_password) {
            (Some(hash), _) => Some(hash.clone()),
            (None, Some(plain)) => Some(hash_password(plain)?),
            (None, None) => None,
        };

        Ok(Self { password_hash })
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn verify(&self, candidate: &str) -> bool {
        match &self.password_hash {
            Some(hash) => verify_password(candidate, hash).is_ok(),
            None => false,
        }
    }
}
