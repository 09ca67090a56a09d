//! Nemesix Form Validation
//!
//! Table-driven field rules and their live wiring to a form's blur, input
//! and submit events.
//!
//! # Example
//!
//! ```rust
//! use nemesix_forms::{validate, FieldError};
//!
//! assert_eq!(validate("", "email"), Err(FieldError::Required));
//! assert_eq!(validate("a@b.co", "email"), Ok(()));
//! assert_eq!(
//!     validate("ab", "username").unwrap_err().to_string(),
//!     "username must be at least 3 characters"
//! );
//! ```

pub mod engine;
pub mod error;
pub mod rules;

pub use engine::{
    apply_result, clear_field, error_node, validate_field, FormController, FormValidation, ERROR_CLASS,
    INVALID_CLASS, REQUIRED_FIELDS, VALID_CLASS,
};
pub use error::{FieldError, FieldResult};
pub use rules::{validate, Rule, RuleTable};
