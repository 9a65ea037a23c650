pub mod admins;
pub mod otps;
