use serde::Serialize;

use marathon_auth_types::bearer::BearerPrincipal;
use marathon_auth_types::token::TokenKind;
use marathon_core::error::Success;

#[derive(Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub kind: TokenKind,
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

/// Any valid token passes; the extractor answers 401 otherwise.
pub async fn me(BearerPrincipal(principal): BearerPrincipal) -> Success<MeResponse> {
    Success::new(MeResponse {
        authenticated: true,
        kind: principal.kind(),
    })
}
