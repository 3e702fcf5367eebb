// =====================================================================================
// FIELD VALIDATION - PERSON RECORD RULES & NORMALIZATION
// =====================================================================================

use regex::Regex;

/// Validates the personal fields shared by patient and practitioner
/// registration. Patterns are compiled once at construction.
#[derive(Debug, Clone)]
pub struct PersonValidator {
    name_pattern: Regex,
    document_pattern: Regex,
    email_pattern: Regex,
}

impl PersonValidator {
    pub fn new() -> Self {
        Self {
            // Letters (any script), spaces, dots, hyphens and apostrophes
            name_pattern: Regex::new(r"^[\p{L} .'-]+$").unwrap(),
            document_pattern: Regex::new(r"^[A-Za-z0-9-]+$").unwrap(),
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap(),
        }
    }

    /// Names and surnames: 2 to 100 characters after trimming.
    pub fn is_valid_name(&self, name: &str) -> bool {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if !(2..=100).contains(&length) {
            return false;
        }
        self.name_pattern.is_match(trimmed)
    }

    /// Identity documents: simple alphanumerics, 4 to 20 characters.
    pub fn is_valid_document(&self, document: &str) -> bool {
        let trimmed = document.trim();
        let length = trimmed.chars().count();
        if !(4..=20).contains(&length) {
            return false;
        }
        self.document_pattern.is_match(trimmed)
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }
}

impl Default for PersonValidator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_valid_age(age: u8) -> bool {
    age <= 120
}

/// Phone numbers must carry 7 to 10 digits once formatting is stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (7..=10).contains(&digits)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Strips a phone number down to digits. Numbers longer than ten digits
/// keep the trailing ten (country prefixes sit at the front); the flag
/// reports whether truncation happened.
pub fn normalize_phone(input: &str) -> (String, bool) {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 10 {
        let tail = digits[digits.len() - 10..].to_string();
        (tail, true)
    } else {
        (digits, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_names() {
        let v = PersonValidator::new();
        assert!(v.is_valid_name("Ana"));
        assert!(v.is_valid_name("O'Neill"));
        assert!(v.is_valid_name("María José"));
        assert!(v.is_valid_name("Smith-Jones Jr."));
    }

    #[test]
    fn rejects_bad_names() {
        let v = PersonValidator::new();
        assert!(!v.is_valid_name(""));
        assert!(!v.is_valid_name("A"));
        assert!(!v.is_valid_name("Bob42"));
        assert!(!v.is_valid_name(&"x".repeat(101)));
    }

    #[test]
    fn validates_documents() {
        let v = PersonValidator::new();
        assert!(v.is_valid_document("AB-123456"));
        assert!(v.is_valid_document(" 12345 "));
        assert!(!v.is_valid_document("123"));
        assert!(!v.is_valid_document("12 345"));
        assert!(!v.is_valid_document(&"9".repeat(21)));
    }

    #[test]
    fn validates_emails() {
        let v = PersonValidator::new();
        assert!(v.is_valid_email("ana@example.com"));
        assert!(!v.is_valid_email("ana@example"));
        assert!(!v.is_valid_email("not-an-email"));
        assert!(!v.is_valid_email("a b@example.com"));
    }

    #[test]
    fn validates_age_and_phone() {
        assert!(is_valid_age(0));
        assert!(is_valid_age(120));
        assert!(!is_valid_age(121));
        assert!(is_valid_phone("(087) 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("123456789012"));
    }

    #[test]
    fn normalizes_email_and_phone() {
        assert_eq!(normalize_email("  Ana.Silva@Example.COM "), "ana.silva@example.com");
        assert_eq!(normalize_phone("+353 87 123 4567"), ("3871234567".to_string(), true));
        assert_eq!(normalize_phone("087-123-4567"), ("0871234567".to_string(), false));
        assert_eq!(normalize_phone(""), (String::new(), false));
    }
}
