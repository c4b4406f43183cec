pub mod error_log_repository;
pub mod in_memory_error_log_repository;

pub use error_log_repository::ErrorLogRepository;
pub use in_memory_error_log_repository::InMemoryErrorLogRepository;
