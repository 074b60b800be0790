//! Day/month swap repair for the four date fields

use wiform_common::{DateField, FormRecord};

use super::RefinementRule;

/// Swap day and month when the month cannot be a month, then pad
///
/// When both components parse and `month > 12` while `day <= 12`, the
/// extraction read the date in the wrong order and the two are swapped.
/// Numeric single-digit day and month are then padded to two digits.
/// Components that do not parse are never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateSwapRule;

/// Parse result for one date component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Numeric(u32),
    Unparseable,
}

impl Component {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Component::Unparseable;
        }
        match trimmed.parse::<u32>() {
            Ok(value) => Component::Numeric(value),
            Err(_) => Component::Unparseable,
        }
    }
}

fn pad(component: &mut String) {
    if let Component::Numeric(_) = Component::parse(component) {
        let trimmed = component.trim();
        if trimmed.len() == 1 {
            *component = format!("0{trimmed}");
        }
    }
}

fn repair(date: &mut DateField) {
    if let (Component::Numeric(day), Component::Numeric(month)) =
        (Component::parse(&date.day), Component::parse(&date.month))
    {
        if month > 12 && day <= 12 {
            std::mem::swap(&mut date.day, &mut date.month);
        }
    }

    pad(&mut date.day);
    pad(&mut date.month);
}

impl RefinementRule for DateSwapRule {
    fn name(&self) -> &'static str {
        "DateSwapRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        for (_, date) in record.date_fields_mut() {
            repair(date);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refine(date: DateField) -> DateField {
        let record = FormRecord {
            date_of_birth: date,
            ..Default::default()
        };
        DateSwapRule.apply(record).date_of_birth
    }

    #[test]
    fn test_component_parse() {
        assert_eq!(Component::parse(" 07 "), Component::Numeric(7));
        assert_eq!(Component::parse(""), Component::Unparseable);
        assert_eq!(Component::parse("-3"), Component::Unparseable);
        assert_eq!(Component::parse("מרץ"), Component::Unparseable);
        assert_eq!(Component::parse("99999999999"), Component::Unparseable);
    }

    #[test]
    fn test_swaps_when_month_out_of_range() {
        assert_eq!(
            refine(DateField::new("03", "14", "2023")),
            DateField::new("14", "03", "2023")
        );
    }

    #[test]
    fn test_no_swap_when_both_out_of_range() {
        assert_eq!(
            refine(DateField::new("20", "14", "2023")),
            DateField::new("20", "14", "2023")
        );
    }

    #[test]
    fn test_pads_single_digits() {
        assert_eq!(
            refine(DateField::new("3", "7", "1999")),
            DateField::new("03", "07", "1999")
        );
    }

    #[test]
    fn test_swap_then_pad() {
        assert_eq!(
            refine(DateField::new("5", "25", "2022")),
            DateField::new("25", "05", "2022")
        );
    }

    #[test]
    fn test_unparseable_components_untouched() {
        assert_eq!(
            refine(DateField::new("ב", "14", "2023")),
            DateField::new("ב", "14", "2023")
        );
        assert_eq!(refine(DateField::new("", "", "")), DateField::default());
    }

    #[test]
    fn test_all_four_dates_repaired() {
        let record = FormRecord {
            date_of_birth: DateField::new("1", "13", "1990"),
            date_of_injury: DateField::new("2", "13", "2020"),
            form_filling_date: DateField::new("3", "13", "2020"),
            form_receipt_date_at_clinic: DateField::new("4", "13", "2020"),
            ..Default::default()
        };
        let out = DateSwapRule.apply(record);
        for (_, date) in out.date_fields() {
            assert_eq!(date.day, "13");
        }
        assert_eq!(out.form_receipt_date_at_clinic.month, "04");
    }

    #[test]
    fn test_idempotent() {
        for date in [
            DateField::new("3", "14", "2023"),
            DateField::new(" 4", "x", ""),
            DateField::new("0", "0", "0"),
        ] {
            let once = refine(date);
            assert_eq!(refine(once.clone()), once);
        }
    }
}
