//! Response middleware.

mod error_path;

pub use error_path::stamp_error_path;
