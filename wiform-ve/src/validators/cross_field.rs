//! Cross-field consistency checks

use wiform_common::FormRecord;

use super::date::to_calendar_date;

/// The clinic cannot receive a form before it was filled in
///
/// Only applies when both dates are complete, all-digit calendar dates.
/// Returns the hard error message on violation.
pub fn check_receipt_after_filling(record: &FormRecord) -> Option<String> {
    let filling = to_calendar_date(&record.form_filling_date)?;
    let receipt = to_calendar_date(&record.form_receipt_date_at_clinic)?;

    (receipt < filling).then(|| {
        format!(
            "Logic Error: Receipt date ({}) cannot be before filling date ({})",
            receipt.format("%d/%m/%Y"),
            filling.format("%d/%m/%Y")
        )
    })
}
