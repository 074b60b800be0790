//! Israeli ID number (teudat zehut) validation
//!
//! # Check Digit Algorithm
//! Digits are weighted 1,2,1,2,... from the left. A product above 9 is
//! replaced by the sum of its digits. The ID is valid iff the total is a
//! multiple of 10.

use super::FieldCheck;

/// Weighted checksum over exactly nine ASCII digits
pub fn checksum_ok(digits: &str) -> bool {
    if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let total: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let weighted = u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 2 };
            if weighted > 9 {
                weighted / 10 + weighted % 10
            } else {
                weighted
            }
        })
        .sum();

    total % 10 == 0
}

/// Validate an ID field value
pub fn validate_israeli_id(id_number: &str) -> FieldCheck {
    if id_number.trim().is_empty() {
        return FieldCheck::pass("No ID provided");
    }

    let digits: String = id_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return FieldCheck::fail(format!(
            "Israeli ID must be 9 digits (got {})",
            digits.len()
        ));
    }

    if checksum_ok(&digits) {
        FieldCheck::pass("Valid Israeli ID")
    } else {
        FieldCheck::fail("Invalid Israeli ID check digit")
    }
}
