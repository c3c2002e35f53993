pub mod response;
pub mod validator;

pub use response::{ActionPayload, QueryResponse};
pub use validator::{extract_json_object, validate, StructuredAction, ValidationFailure};
