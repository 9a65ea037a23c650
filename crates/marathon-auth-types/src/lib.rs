//! Auth types shared across the marathon services.
//!
//! Provides the tagged token principal, JWT validation and the bearer-token
//! extractors that gate admin and participant routes.

pub mod bearer;
pub mod token;
