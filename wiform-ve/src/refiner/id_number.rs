//! Israeli ID number normalization

use wiform_common::config::IdTruncation;
use wiform_common::FormRecord;

use super::RefinementRule;

const ID_LENGTH: usize = 9;

/// Reduce `idNumber` to 9 ASCII digits where possible
///
/// - Non-digits are stripped
/// - 8 digits: a leading zero was lost, pad to 9
/// - More than 9: truncate according to the configured [`IdTruncation`]
/// - One digit or less: OCR noise, cleared
#[derive(Debug, Clone, Copy, Default)]
pub struct IdNumberRule {
    truncation: IdTruncation,
}

impl IdNumberRule {
    pub fn new(truncation: IdTruncation) -> Self {
        Self { truncation }
    }

    fn normalize(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        let id = match digits.len() {
            8 => format!("0{digits}"),
            n if n > ID_LENGTH => match self.truncation {
                IdTruncation::KeepFirst => digits[..ID_LENGTH].to_string(),
                IdTruncation::KeepLast => digits[n - ID_LENGTH..].to_string(),
            },
            _ => digits,
        };

        if id.len() <= 1 {
            String::new()
        } else {
            id
        }
    }
}

impl RefinementRule for IdNumberRule {
    fn name(&self) -> &'static str {
        "IdNumberRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        record.id_number = self.normalize(&record.id_number);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refine_id(rule: IdNumberRule, id: &str) -> String {
        let record = FormRecord {
            id_number: id.to_string(),
            ..Default::default()
        };
        rule.apply(record).id_number
    }

    #[test]
    fn test_pads_eight_digits() {
        assert_eq!(refine_id(IdNumberRule::default(), "12345678"), "012345678");
    }

    #[test]
    fn test_strips_separators() {
        assert_eq!(refine_id(IdNumberRule::default(), "877-52456 3"), "877524563");
        assert_eq!(refine_id(IdNumberRule::default(), "ת.ז 022456120"), "022456120");
    }

    #[test]
    fn test_short_noise_cleared() {
        assert_eq!(refine_id(IdNumberRule::default(), "7"), "");
        assert_eq!(refine_id(IdNumberRule::default(), "-"), "");
        assert_eq!(refine_id(IdNumberRule::default(), ""), "");
    }

    #[test]
    fn test_other_short_lengths_kept() {
        // Only the 8-digit case is treated as a lost leading zero
        assert_eq!(refine_id(IdNumberRule::default(), "1234567"), "1234567");
    }

    // Over-long policy is an assumption: the extraction usually appends a
    // stray digit, so keeping the first nine is the default.
    #[test]
    fn test_over_long_keep_first_assumption() {
        let rule = IdNumberRule::new(IdTruncation::KeepFirst);
        assert_eq!(refine_id(rule, "0334521567"), "033452156");
    }

    #[test]
    fn test_over_long_keep_last() {
        let rule = IdNumberRule::new(IdTruncation::KeepLast);
        assert_eq!(refine_id(rule, "0334521567"), "334521567");
    }

    #[test]
    fn test_idempotent() {
        for id in ["12345678", "0334521567", "1", "12-34", "877524563"] {
            let once = refine_id(IdNumberRule::default(), id);
            assert_eq!(refine_id(IdNumberRule::default(), &once), once);
        }
    }
}
