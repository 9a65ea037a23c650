//! JWT claims and validation for both principal kinds.

use jsonwebtoken::{DecodingKey, Validation, decode};
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use marathon_domain::id::AdminId;

/// Which principal a token was minted for. Carried in the `kind` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Admin,
    Participant,
}

/// The authenticated caller, resolved from a validated token.
///
/// The two variants are never interchangeable: an admin route accepts only
/// `Admin`, a participant route only `Participant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin { id: AdminId, username: String },
    /// Bound to a phone number, not a participant id: one phone number may own
    /// several registrations.
    Participant { phone_number: String },
}

impl Principal {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Admin { .. } => TokenKind::Admin,
            Self::Participant { .. } => TokenKind::Participant,
        }
    }
}

/// Principal plus expiry extracted from a validated token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub principal: Principal,
    pub exp: u64,
}

/// Errors returned by [`validate_token`]. Callers must collapse these into a
/// single unauthorized outcome; the variants exist for server-side logging.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token kind not accepted here")]
    WrongKind,
}

/// JWT claims payload shared by token issuance (auth service) and validation.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | admin UUID, or the verified phone number |
/// | `kind` | custom | [`TokenKind`] |
/// | `username` | custom | admin username (admin tokens only) |
/// | `exp` | `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_AUTH_SERVICE`** cargo feature;
/// only the auth service issues tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

fn principal_from_claims(claims: JwtClaims) -> Result<Principal, AuthError> {
    match claims.kind {
        TokenKind::Admin => {
            let id = claims.sub.parse().map_err(|_| AuthError::Malformed)?;
            let username = claims.username.ok_or(AuthError::Malformed)?;
            Ok(Principal::Admin { id, username })
        }
        TokenKind::Participant => {
            if claims.sub.is_empty() {
                return Err(AuthError::Malformed);
            }
            Ok(Principal::Participant {
                phone_number: claims.sub,
            })
        }
    }
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a bearer token, returning the tagged principal it was minted for.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let exp = claims.exp;
    let principal = principal_from_claims(claims)?;
    Ok(TokenInfo { principal, exp })
}

// ── Feature-gated: auth service only ─────────────────────────────────────

/// Sign a token for `principal` valid for `ttl_secs`. Returns the token and
/// its `exp` claim.
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
pub fn issue_token(
    principal: &Principal,
    ttl_secs: u64,
    secret: &str,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    let exp = now_secs() + ttl_secs;
    let claims = match principal {
        Principal::Admin { id, username } => JwtClaims {
            sub: id.to_string(),
            kind: TokenKind::Admin,
            username: Some(username.clone()),
            exp,
        },
        Principal::Participant { phone_number } => JwtClaims {
            sub: phone_number.clone(),
            kind: TokenKind::Participant,
            username: None,
            exp,
        },
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}
