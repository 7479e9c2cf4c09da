//! Request extractors that fail with the shared error body.

mod json_body;
mod user_id;

pub use json_body::JsonBody;
pub use user_id::UserId;
