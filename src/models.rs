use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginReq {
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// seconds until the token expires
    #[schema(example = 3600)]
    pub expires_in: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: String,
    pub role: TokenRole,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenRole {
    Admin,
}
