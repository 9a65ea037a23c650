//! Bearer headers signed with a test secret.
//!
//! Services validate tokens locally, so tests mint real tokens with the same
//! secret the router under test was built with.

use http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use marathon_auth_types::token::{Principal, issue_token};
use marathon_domain::id::AdminId;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// A principal plus the secret its tokens are signed with.
pub struct MockAuth {
    pub principal: Principal,
    pub secret: String,
}

impl MockAuth {
    pub fn admin(username: &str) -> Self {
        Self {
            principal: Principal::Admin {
                id: AdminId(Uuid::new_v4()),
                username: username.to_owned(),
            },
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    pub fn participant(phone_number: &str) -> Self {
        Self {
            principal: Principal::Participant {
                phone_number: phone_number.to_owned(),
            },
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    /// Raw signed token valid for ten minutes.
    pub fn token(&self) -> String {
        issue_token(&self.principal, 600, &self.secret)
            .expect("sign test token")
            .0
    }

    /// `Authorization: Bearer <token>` as a header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}
