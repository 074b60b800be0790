//! Accident-location override (optional rule)

use wiform_common::FormRecord;

use super::RefinementRule;

const WORK_ROAD_ACCIDENT: &str = "ת. דרכים בעבודה";
const FACTORY: &str = "במפעל";
const FACTORY_KEYWORDS: [&str; 4] = ["נשרף", "מפעל", "מכונה", "במהלך העבודה"];

/// Re-tick "at the factory" when a road-accident box was misread
///
/// The extraction tends to tick "ת. דרכים בעבודה" for accidents whose
/// description clearly happened on the shop floor. Disabled unless
/// `refiner.accident_location_override` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccidentLocationRule;

impl RefinementRule for AccidentLocationRule {
    fn name(&self) -> &'static str {
        "AccidentLocationRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        if record.accident_location.trim() == WORK_ROAD_ACCIDENT
            && FACTORY_KEYWORDS
                .iter()
                .any(|keyword| record.accident_description.contains(keyword))
        {
            record.accident_location = FACTORY.to_string();
        }
        record
    }
}
