//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Field names (as they appear on the wire)
// =============================================================================

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_AGE: &str = "age";
pub const FIELD_BODY: &str = "body";

// =============================================================================
// Validation reasons
// =============================================================================

/// Reason reported for empty or whitespace-only text
pub const REASON_BLANK: &str = "must not be blank";

/// Reason reported for a missing required value
pub const REASON_MISSING: &str = "must not be null";

/// Reason reported for an email that does not look like one
pub const REASON_EMAIL_SHAPE: &str = "must be a well-formed email address";

/// Reason reported for text where a number is required
pub const REASON_NOT_A_NUMBER: &str = "must be a number";

/// Reason reported for an identifier outside the key space
pub const REASON_INVALID_ID: &str = "must be a positive integer";
