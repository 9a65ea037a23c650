//! Domain types shared across the marathon registration services.
//!
//! This crate contains only pure types and rules with no framework or
//! database dependencies, so every service layer may import it.

pub mod id;
pub mod pagination;
pub mod search;
