//! Per-field validation rules
//!
//! A [`RuleTable`] maps a field's `name` attribute to an ordered list of
//! rules. Validation trims the value, rejects it if empty, then runs the
//! field's rules in order; the first failure wins. Fields without an entry
//! only need a non-empty value.

use indexmap::IndexMap;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::OnceLock;

use crate::error::{FieldError, FieldResult};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"))
}

fn username_regex() -> &'static Regex {
    static USERNAME: OnceLock<Regex> = OnceLock::new();
    USERNAME.get_or_init(|| Regex::new(USERNAME_PATTERN).expect("valid username regex"))
}

/// A single check on a trimmed, non-empty value
#[derive(Clone, Debug)]
pub enum Rule {
    /// At least `min` characters (Unicode scalar values)
    MinChars { min: usize, error: FieldError },
    /// The whole value must match `pattern`
    Matches { pattern: Regex, error: FieldError },
}

impl Rule {
    /// Build a pattern rule from a user-supplied regex
    pub fn matches(pattern: &str, error: FieldError) -> Result<Self, regex::Error> {
        Ok(Rule::Matches {
            pattern: Regex::new(pattern)?,
            error,
        })
    }

    pub fn check(&self, value: &str) -> FieldResult {
        match self {
            Rule::MinChars { min, error } => {
                if value.chars().count() < *min {
                    return Err(error.clone());
                }
            }
            Rule::Matches { pattern, error } => {
                if !pattern.is_match(value) {
                    return Err(error.clone());
                }
            }
        }
        Ok(())
    }
}

/// Ordered rules keyed by field name
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    fields: IndexMap<String, SmallVec<[Rule; 2]>>,
}

impl RuleTable {
    /// A table with no field-specific rules (only "required")
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's rules for `email`, `username` and `password`
    pub fn standard() -> Self {
        Self::new()
            .rule(
                "email",
                Rule::Matches {
                    pattern: email_regex().clone(),
                    error: FieldError::InvalidEmail,
                },
            )
            .rule(
                "username",
                Rule::MinChars {
                    min: 3,
                    error: FieldError::UsernameTooShort { min: 3 },
                },
            )
            .rule(
                "username",
                Rule::Matches {
                    pattern: username_regex().clone(),
                    error: FieldError::UsernameCharset,
                },
            )
            .rule(
                "password",
                Rule::MinChars {
                    min: 6,
                    error: FieldError::PasswordTooShort { min: 6 },
                },
            )
    }

    /// Append a rule to a field's list
    pub fn rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.fields.entry(field.into()).or_default().push(rule);
        self
    }

    pub fn rules_for(&self, field: &str) -> &[Rule] {
        self.fields.get(field).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Field names with specific rules, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validate a raw (untrimmed) value of the field called `name`
    pub fn validate(&self, value: &str, name: &str) -> FieldResult {
        let value = value.trim();
        if value.is_empty() {
            return Err(FieldError::Required);
        }
        self.rules_for(name).iter().try_for_each(|rule| rule.check(value))
    }
}

/// Validate against the standard rules
pub fn validate(value: &str, name: &str) -> FieldResult {
    static STANDARD: OnceLock<RuleTable> = OnceLock::new();
    STANDARD.get_or_init(RuleTable::standard).validate(value, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules() {
        let cases: &[(&str, &str, FieldResult)] = &[
            ("", "email", Err(FieldError::Required)),
            ("   ", "comment", Err(FieldError::Required)),
            ("", "password", Err(FieldError::Required)),
            ("notanemail", "email", Err(FieldError::InvalidEmail)),
            ("a@b", "email", Err(FieldError::InvalidEmail)),
            ("a b@c.de", "email", Err(FieldError::InvalidEmail)),
            ("a@b.co", "email", Ok(())),
            ("  a@b.co  ", "email", Ok(())),
            ("ab", "username", Err(FieldError::UsernameTooShort { min: 3 })),
            ("a$", "username", Err(FieldError::UsernameTooShort { min: 3 })),
            ("ab$", "username", Err(FieldError::UsernameCharset)),
            ("niño", "username", Err(FieldError::UsernameCharset)),
            ("ab_3", "username", Ok(())),
            ("12345", "password", Err(FieldError::PasswordTooShort { min: 6 })),
            ("123456", "password", Ok(())),
            ("ñññññ", "password", Err(FieldError::PasswordTooShort { min: 6 })),
            ("anything", "comment", Ok(())),
            ("x", "", Ok(())),
        ];

        for (value, name, expected) in cases {
            assert_eq!(&validate(value, name), expected, "validate({:?}, {:?})", value, name);
        }
    }

    #[test]
    fn test_lengths_count_chars_not_code_units() {
        // Three astral-plane chars are six UTF-16 units but only three chars
        let emoji = "\u{1F600}\u{1F601}\u{1F602}";
        assert_eq!(emoji.encode_utf16().count(), 6);
        assert_eq!(
            validate(emoji, "password"),
            Err(FieldError::PasswordTooShort { min: 6 })
        );
        assert_eq!(validate(&emoji.repeat(2), "password"), Ok(()));
    }

    #[test]
    fn test_messages() {
        let messages = [
            (FieldError::Required, "this field is required"),
            (FieldError::InvalidEmail, "enter a valid email"),
            (
                FieldError::UsernameTooShort { min: 3 },
                "username must be at least 3 characters",
            ),
            (
                FieldError::UsernameCharset,
                "only letters, numbers and underscores are allowed",
            ),
            (
                FieldError::PasswordTooShort { min: 6 },
                "password must be at least 6 characters",
            ),
        ];
        for (error, message) in messages {
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn test_custom_table() {
        let table = RuleTable::new().rule(
            "code",
            Rule::matches(r"^[A-Z]{3}$", FieldError::UsernameCharset).unwrap(),
        );
        assert_eq!(table.validate("ABC", "code"), Ok(()));
        assert_eq!(table.validate("abc", "code"), Err(FieldError::UsernameCharset));
        // No email rule in this table
        assert_eq!(table.validate("notanemail", "email"), Ok(()));
        assert!(Rule::matches("(", FieldError::Required).is_err());
    }

    #[test]
    fn test_table_order() {
        let table = RuleTable::standard();
        assert_eq!(table.fields().collect::<Vec<_>>(), vec!["email", "username", "password"]);
        assert_eq!(table.rules_for("username").len(), 2);
        assert!(table.rules_for("comment").is_empty());
    }
}
