//! Field validation errors
//!
//! The `Display` text of each variant is the message shown next to the
//! field.

use thiserror::Error;

/// Why a field value was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("this field is required")]
    Required,

    #[error("enter a valid email")]
    InvalidEmail,

    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },

    #[error("only letters, numbers and underscores are allowed")]
    UsernameCharset,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Outcome of validating one field
pub type FieldResult = std::result::Result<(), FieldError>;
