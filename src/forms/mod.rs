//! Synchronous validation for every form the marketplace submits.
//!
//! Validation only reads the form. A failure reports each offending field and
//! blocks that one submission; nothing is applied partially.

pub mod auth;
pub mod checkout;
pub mod product;
pub mod profile;

pub use auth::*;
pub use checkout::*;
pub use product::*;
pub use profile::*;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Issue {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: Issue,
    pub message: String,
}

/// Per-field failures in the order the form lists its fields. At most one
/// message per field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `field` already has one.
    fn add(&mut self, field: &'static str, issue: Issue, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field,
                issue,
                message: message.into(),
            });
        }
    }

    pub fn missing(&mut self, field: &'static str, message: impl Into<String>) {
        self.add(field, Issue::Missing, message);
    }

    pub fn invalid(&mut self, field: &'static str, message: impl Into<String>) {
        self.add(field, Issue::Invalid, message);
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: impl Into<String>) {
        if is_blank(value) {
            self.missing(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("raj@chaat.in"));
        assert!(is_valid_email("first.last+tag@mail.example.com"));
        assert!(!is_valid_email("raj@chaat"));
        assert!(!is_valid_email("raj chaat@x.in"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.require("email", "  ", "Please enter your email address");
        errors.invalid("email", "Please enter a valid email address");
        errors.require("name", "Raj", "Please enter your full name");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.issue), Some(Issue::Missing));
        assert_eq!(errors.get("email"), Some("Please enter your email address"));
        assert_eq!(errors.to_string(), "Please enter your email address");
    }
}
