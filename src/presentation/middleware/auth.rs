//! Authentication Middleware
//!
//! Bearer token gate for the API routes. Tokens are issued by an external
//! identity provider; this middleware only verifies the signature and
//! attaches the decoded subject to the request. Handlers act on
//! body-supplied ids, so the gate authenticates without authorizing.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Authentication middleware that validates bearer tokens.
///
/// Missing credentials are 401; present-but-invalid credentials are 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized(
                "No token provided. Please include 'Authorization: Bearer <token>' header.".into(),
            )
        })?;

    // Check for Bearer token
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized(
            "No token provided. Please include 'Authorization: Bearer <token>' header.".into(),
        )
    })?;

    // Decode and validate the token
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.settings.jwt.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Forbidden("Invalid or expired token.".into()))?;

    // Insert authenticated user into request extensions
    request.extensions_mut().insert(AuthUser {
        user_id: token_data.claims.sub,
    });

    // Continue to the next handler
    Ok(next.run(request).await)
}
