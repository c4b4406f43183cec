pub mod error_handler;
pub mod request_id;
pub mod validator;

pub use error_handler::{error_handler_middleware, handle_panic, not_found, ErrorHandler};
pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};
pub use validator::{validate, Validate, ValidateLayer, ValidatedInput};
