//! Phone number normalization

use wiform_common::FormRecord;

use super::RefinementRule;

/// Clean both phone fields and repair common mobile OCR errors
///
/// Both phones are reduced to ASCII digits. For the mobile number only:
/// a leading "65" is an OCR misread of "05", and a 9-digit number starting
/// with "5" has lost its leading zero. A cleaned value of one digit or less
/// is cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneRule;

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn clear_noise(phone: String) -> String {
    if phone.len() <= 1 {
        String::new()
    } else {
        phone
    }
}

fn normalize_mobile(raw: &str) -> String {
    let mut phone = digits_only(raw);

    if phone.starts_with("65") {
        phone = format!("0{}", &phone[1..]);
    }
    if phone.len() == 9 && phone.starts_with('5') {
        phone.insert(0, '0');
    }

    clear_noise(phone)
}

fn normalize_landline(raw: &str) -> String {
    clear_noise(digits_only(raw))
}

impl RefinementRule for PhoneRule {
    fn name(&self) -> &'static str {
        "PhoneRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        record.mobile_phone = normalize_mobile(&record.mobile_phone);
        record.landline_phone = normalize_landline(&record.landline_phone);
        record
    }
}
