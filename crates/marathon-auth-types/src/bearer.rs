//! `Authorization: Bearer <token>` extractors.
//!
//! Every failure (missing header, not a bearer scheme, bad signature, expired,
//! wrong principal kind) rejects with the same 401 body. The specific cause is
//! logged at debug level only.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use marathon_domain::id::AdminId;

use crate::token::{AuthError, Principal, validate_token};

/// Application state that knows the token signing secret.
pub trait JwtSecretSource {
    fn jwt_secret(&self) -> &str;
}

/// Uniform rejection for every authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "kind": "UNAUTHORIZED",
            "error": "unauthorized",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Principal, AuthError> {
    let Authorization(bearer) = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::Malformed)?;
    validate_token(bearer.token(), secret).map(|info| info.principal)
}

fn reject(cause: AuthError) -> Unauthorized {
    tracing::debug!(cause = %cause, "bearer authentication failed");
    Unauthorized
}

/// Any valid token, admin or participant.
#[derive(Debug, Clone)]
pub struct BearerPrincipal(pub Principal);

impl<S> FromRequestParts<S> for BearerPrincipal
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = Unauthorized;

    // Resolve synchronously, then hand back a 'static future (axum-core 0.5
    // declares this method as `fn -> impl Future + Send`).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(&parts.headers, state.jwt_secret())
            .map(Self)
            .map_err(reject);
        async move { result }
    }
}

/// An admin operator authenticated by an admin token.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub id: AdminId,
    pub username: String,
}

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = Unauthorized;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match authenticate(&parts.headers, state.jwt_secret()) {
            Ok(Principal::Admin { id, username }) => Ok(Self { id, username }),
            Ok(Principal::Participant { .. }) => Err(reject(AuthError::WrongKind)),
            Err(e) => Err(reject(e)),
        };
        async move { result }
    }
}

/// A participant authenticated by an OTP session token.
#[derive(Debug, Clone)]
pub struct ParticipantIdentity {
    pub phone_number: String,
}

impl<S> FromRequestParts<S> for ParticipantIdentity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = Unauthorized;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match authenticate(&parts.headers, state.jwt_secret()) {
            Ok(Principal::Participant { phone_number }) => Ok(Self { phone_number }),
            Ok(Principal::Admin { .. }) => Err(reject(AuthError::WrongKind)),
            Err(e) => Err(reject(e)),
        };
        async move { result }
    }
}
