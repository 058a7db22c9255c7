// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::fmt;
use validator::ValidateEmail;

/// A form field rejected before anything is sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Returns the trimmed value, or an error when it is blank.
pub fn require_field(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Validate user email input
pub fn validate_email_field(email: &str) -> Result<String, ValidationError> {
    let trimmed = require_field("email", email)?;
    if !trimmed.validate_email() {
        return Err(ValidationError::new("email", "format is invalid"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_trims_and_rejects_blank() {
        assert_eq!(require_field("name", "  Ada ").unwrap(), "Ada");
        let err = require_field("name", "   ").unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(err.to_string(), "name is required");
        assert!(require_field("name", "\t\n").is_err());
    }

    #[test]
    fn test_validate_email_field() {
        assert_eq!(
            validate_email_field(" user@example.com ").unwrap(),
            "user@example.com"
        );
        assert!(validate_email_field("").is_err());
        assert_eq!(
            validate_email_field("not-an-email").unwrap_err().message(),
            "format is invalid"
        );
    }
}
