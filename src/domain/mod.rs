pub mod dashboard;
pub mod error_log;
pub mod shared;
pub mod validation;
