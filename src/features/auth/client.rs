//! Client wrappers for Vantage account and session API endpoints. These
//! helpers centralize paths and session-aware requests, keeping auth flows
//! consistent and preventing credential leakage in route code.

use crate::{
    app_lib::{AppError, get_json_authed, post_empty_authed, post_json},
    features::auth::types::{
        LoginRequest, LoginResponse, Organization, RegisterRequest, RegisterResponse, User,
    },
};

/// Signs in with email and password. The response says whether the address
/// still needs verification; the payload must never be logged.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, AppError> {
    post_json("/v1/auth/login", request).await
}

/// Creates an account. Verification is always required afterwards.
pub async fn register(request: &RegisterRequest) -> Result<RegisterResponse, AppError> {
    post_json("/v1/auth/register", request).await
}

/// Clears the current session on the server.
pub async fn logout() -> Result<(), AppError> {
    post_empty_authed("/v1/auth/logout").await
}

/// Fetches the current user record authoritatively.
pub async fn fetch_user() -> Result<User, AppError> {
    get_json_authed("/v1/me").await
}

/// Fetches the current organization record authoritatively.
pub async fn fetch_organization() -> Result<Organization, AppError> {
    get_json_authed("/v1/org").await
}
