//! Identity profile model and validators.
//!
//! # Responsibility
//! - Define the three-field contact profile collected by the intake form.
//! - Provide the per-field validators and the aggregate error set.
//!
//! # Invariants
//! - Validation always evaluates all three fields; it never short-circuits.
//! - Wire field names are `name`, `phoneNumber` and `email`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Contact profile persisted under the `userDetails` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub email: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Runs every field validator and returns the full error set.
    pub fn validate(&self) -> ValidationErrorSet {
        ValidationErrorSet {
            name: !is_valid_name(&self.name),
            phone_number: !is_valid_phone_number(&self.phone_number),
            email: !is_valid_email(&self.email),
        }
    }

    /// Returns a mutable slot for one field.
    pub fn field_mut(&mut self, field: IdentityField) -> &mut String {
        match field {
            IdentityField::Name => &mut self.name,
            IdentityField::PhoneNumber => &mut self.phone_number,
            IdentityField::Email => &mut self.email,
        }
    }

    pub fn field(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::PhoneNumber => &self.phone_number,
            IdentityField::Email => &self.email,
        }
    }
}

/// One input of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    Name,
    PhoneNumber,
    Email,
}

impl IdentityField {
    /// All fields in display order.
    pub const ALL: [IdentityField; 3] = [Self::Name, Self::PhoneNumber, Self::Email];

    /// Stable field id, matching the persisted JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
        }
    }

    /// User-facing correction hint shown in the error banner.
    pub fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Please fill in the name field.",
            Self::PhoneNumber => "Please enter a valid phone number (10 digits).",
            Self::Email => "Please enter a valid email address.",
        }
    }
}

/// Per-field failure flags from one submit attempt.
///
/// Always recomputed as a whole; fields are never cleared one by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    pub name: bool,
    pub phone_number: bool,
    pub email: bool,
}

impl ValidationErrorSet {
    pub fn is_empty(&self) -> bool {
        !(self.name || self.phone_number || self.email)
    }

    pub fn has(&self, field: IdentityField) -> bool {
        match field {
            IdentityField::Name => self.name,
            IdentityField::PhoneNumber => self.phone_number,
            IdentityField::Email => self.email,
        }
    }

    /// Failing fields in display order.
    pub fn failing_fields(&self) -> Vec<IdentityField> {
        IdentityField::ALL
            .into_iter()
            .filter(|field| self.has(*field))
            .collect()
    }

    /// One correction hint per failing field.
    pub fn messages(&self) -> Vec<String> {
        self.failing_fields()
            .into_iter()
            .map(|field| field.error_message().to_string())
            .collect()
    }
}

/// Accepts iff the trimmed name is non-empty.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Accepts iff the value is exactly ten ASCII digits.
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_RE.is_match(phone_number)
}

/// Accepts `local@domain.tld` shapes with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_name, is_valid_phone_number, Identity, IdentityField};

    #[test]
    fn phone_requires_exactly_ten_ascii_digits() {
        assert!(is_valid_phone_number("1234567890"));
        assert!(!is_valid_phone_number("123-456-7890"));
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("12345678901"));
        assert!(!is_valid_phone_number(" 1234567890"));
        // Arabic-Indic digits are not decimal ASCII.
        assert!(!is_valid_phone_number("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jane.doe@mail.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.com"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email(" a@b.co"));
    }

    #[test]
    fn name_rejects_whitespace_only() {
        assert!(is_valid_name("Jane"));
        assert!(is_valid_name("  Jane "));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(" \t "));
    }

    #[test]
    fn validate_reports_every_failing_field() {
        let errors = Identity::new("", "12", "nope").validate();
        assert!(errors.name && errors.phone_number && errors.email);
        assert_eq!(errors.failing_fields(), IdentityField::ALL.to_vec());
        assert_eq!(errors.messages().len(), 3);
    }

    #[test]
    fn identity_uses_camel_case_phone_key() {
        let identity = Identity::new("Jane", "5551234567", "jane@x.com");
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["phoneNumber"], "5551234567");
        assert!(json.get("phone_number").is_none());
    }
}
