//! Shared plumbing for the marathon services: response envelope, health
//! probes, request-id and trace layers, tracing setup, env config and a few
//! serde / sea-query helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
