pub mod extractor;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::{SafeFacultyIdI64, SafeIDI64, SafeStudentIdI64, SafeTaskOrigin};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
pub use sql::{contains_like, escape_like_pattern};
