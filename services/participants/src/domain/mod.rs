pub mod repository;
pub mod stats;
pub mod types;
