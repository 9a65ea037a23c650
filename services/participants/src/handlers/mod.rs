pub mod admin;
pub mod public;
pub mod registration;
pub mod response;
