//! Contact-detail pattern matchers.
//!
//! Phone grammar:
//!   [ "+" 1–3 digits [space] ] [ "(" ] 3 digits [ ")" ] [sep] 3 digits [sep] 4 digits
//!   where sep is one of `-`, `.` or a single whitespace character.
//!
//! Email grammar (case-insensitive, result lower-cased):
//!   local-part "@" domain "." tld
//!   local-part = [A-Za-z0-9._%+-]+, domain = [A-Za-z0-9.-]+, tld = 2+ letters

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}\s?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
        .expect("phone pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern is valid")
});

/// First phone-number-shaped substring, as written.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// First email address, lower-cased.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase())
}
