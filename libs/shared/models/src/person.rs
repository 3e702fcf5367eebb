use serde::{Deserialize, Serialize};

/// Personal data shared by patients and practitioners.
///
/// Embedded as a plain value in each resource type. Documents and phone
/// numbers are sensitive and must only ever be logged through the masked
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub name: String,
    pub surname: String,
    pub document: String,
    pub phone_number: String,
    pub address: String,
    pub email: String,
}

impl PersonDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Document with everything but the last four characters starred.
    pub fn masked_document(&self) -> String {
        mask_all_but_last_four(&self.document)
    }

    /// Phone number with everything but the last four digits starred.
    pub fn masked_phone(&self) -> String {
        mask_all_but_last_four(&self.phone_number)
    }
}

fn mask_all_but_last_four(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
