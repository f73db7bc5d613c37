//! Contact submission validation
//!
//! A submission is accepted only when all four fields are strings matching
//! their pattern. There is no partial acceptance and no field is corrected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// ASCII digits only; `\d` would admit other Unicode digits
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"));

/// Whitespace as ECMAScript defines it for `\s` and `String.prototype.trim`.
/// Differs from Unicode `White_Space`: U+FEFF is included, U+0085 is not.
const JS_WHITESPACE: [char; 25] = [
    '\t', '\n', '\u{0B}', '\u{0C}', '\r', ' ', '\u{A0}', '\u{1680}', '\u{2000}', '\u{2001}',
    '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}',
    '\u{2009}', '\u{200A}', '\u{2028}', '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}',
    '\u{FEFF}',
];

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+$",
    )
    .expect("valid name regex")
});

/// A fully validated contact form submission
///
/// Only obtainable through [`Submission::from_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: String,
    phone: String,
    message: String,
}

impl Submission {
    /// Validate a decoded request body and extract the submission.
    ///
    /// Returns `None` if the value is not an object, if any of the four
    /// fields is missing or not a string, or if any field fails its check.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_valid_submission(value) {
            return None;
        }
        let (name, email, phone, message) = string_fields(value)?;
        Some(Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Accept/reject decision for an arbitrary decoded body
pub fn is_valid_submission(value: &Value) -> bool {
    string_fields(value).is_some_and(|(name, email, phone, message)| {
        is_valid_email(email)
            && is_valid_phone(phone)
            && is_valid_name(name)
            && is_valid_message(message)
    })
}

/// The four fields as `(name, email, phone, message)`, if all are strings
fn string_fields(value: &Value) -> Option<(&str, &str, &str, &str)> {
    let obj = value.as_object()?;
    Some((
        obj.get("name")?.as_str()?,
        obj.get("email")?.as_str()?,
        obj.get("phone")?.as_str()?,
        obj.get("message")?.as_str()?,
    ))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

pub fn is_valid_message(message: &str) -> bool {
    !message.trim_matches(&JS_WHITESPACE[..]).is_empty()
}
