//! Israeli phone number validation
//!
//! Mobile numbers are 05X-XXXXXXX (10 digits). Landlines are 0X-XXXXXXX
//! (9 or 10 digits).

use super::FieldCheck;

pub fn validate_phone(phone: &str) -> FieldCheck {
    if phone.trim().is_empty() {
        return FieldCheck::pass("No phone provided");
    }

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if !(9..=10).contains(&digits.len()) {
        return FieldCheck::fail(format!("Invalid phone length: {} digits", digits.len()));
    }
    if !digits.starts_with('0') {
        return FieldCheck::fail("Israeli phone must start with 0");
    }
    if digits.starts_with("05") {
        return if digits.len() == 10 {
            FieldCheck::pass("Valid mobile phone")
        } else {
            FieldCheck::fail("Mobile phone must be 10 digits")
        };
    }

    FieldCheck::pass("Valid phone number")
}
