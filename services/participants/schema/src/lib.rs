pub mod participants;
pub mod scan_logs;
