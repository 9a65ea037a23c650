//! Test utilities for the marathon services.
//!
//! Signed bearer headers for both principal kinds and a notifier that records
//! instead of sending. Dev-dependency only.

pub mod auth;
pub mod notify;
