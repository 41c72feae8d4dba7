//! Registrable name rules
//!
//! The durable store keeps one name per line, so a registered name can never
//! contain a line terminator. Availability checks do not apply these rules.

use crate::error::RegistrationError;

/// Longest registrable name, in bytes
pub const MAX_NAME_BYTES: usize = 256;

/// Check that `name` can be registered and persisted
pub fn validate_name(name: &str) -> Result<(), RegistrationError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.len() > MAX_NAME_BYTES {
        "name exceeds 256 bytes"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else {
        return Ok(());
    };

    Err(RegistrationError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
