pub mod api_response;

pub use api_response::{ApiResponse, ErrorEnvelope, ErrorExtra, Pagination, SuccessEnvelope};
