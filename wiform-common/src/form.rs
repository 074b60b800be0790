//! Canonical form record for National Insurance form 283 (work injury)
//!
//! The record is a fixed tree: top-level string leaves plus nested value
//! objects (`DateField`, `AddressField`, `MedicalInstitutionFields`). Every
//! leaf is always present; an unknown value is the empty string.
//!
//! # Field tree
//! Each node implements [`FieldGroup`], which exposes its keys in form order
//! and typed access to children (`Slot::Leaf` or `Slot::Group`). Merging,
//! completeness scoring and ground-truth comparison all walk this tree, so
//! they always see the same leaf set regardless of the draft they came from.

use serde::{Deserialize, Serialize};

/// Wire names of record fields referenced outside the tree walk
pub mod fields {
    pub const LAST_NAME: &str = "lastName";
    pub const FIRST_NAME: &str = "firstName";
    pub const ID_NUMBER: &str = "idNumber";
    pub const GENDER: &str = "gender";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const ADDRESS: &str = "address";
    pub const LANDLINE_PHONE: &str = "landlinePhone";
    pub const MOBILE_PHONE: &str = "mobilePhone";
    pub const JOB_TYPE: &str = "jobType";
    pub const DATE_OF_INJURY: &str = "dateOfInjury";
    pub const TIME_OF_INJURY: &str = "timeOfInjury";
    pub const ACCIDENT_LOCATION: &str = "accidentLocation";
    pub const ACCIDENT_ADDRESS: &str = "accidentAddress";
    pub const ACCIDENT_DESCRIPTION: &str = "accidentDescription";
    pub const INJURED_BODY_PART: &str = "injuredBodyPart";
    pub const SIGNATURE: &str = "signature";
    pub const FORM_FILLING_DATE: &str = "formFillingDate";
    pub const FORM_RECEIPT_DATE_AT_CLINIC: &str = "formReceiptDateAtClinic";
    pub const MEDICAL_INSTITUTION_FIELDS: &str = "medicalInstitutionFields";
    pub const HEALTH_FUND_MEMBER: &str = "medicalInstitutionFields.healthFundMember";
}

/// Read access to one child of a [`FieldGroup`]
pub enum Slot<'a> {
    Leaf(&'a str),
    Group(&'a dyn FieldGroup),
}

/// Write access to one child of a [`FieldGroup`]
pub enum SlotMut<'a> {
    Leaf(&'a mut String),
    Group(&'a mut dyn FieldGroup),
}

/// A node of the canonical schema tree
pub trait FieldGroup {
    /// Child keys in form order
    fn keys(&self) -> &'static [&'static str];

    /// Child by key (`None` for keys outside the schema)
    fn slot(&self, key: &str) -> Option<Slot<'_>>;

    /// Mutable child by key (`None` for keys outside the schema)
    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>>;
}

/// One string leaf of the tree with its dotted path (e.g. `dateOfBirth.day`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub path: String,
    pub value: &'a str,
}

/// Collect every leaf under `group` in form order
pub fn collect_leaves<'a>(group: &'a dyn FieldGroup, prefix: &str, out: &mut Vec<Leaf<'a>>) {
    for key in group.keys() {
        let path = if prefix.is_empty() {
            (*key).to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match group.slot(key) {
            Some(Slot::Leaf(value)) => out.push(Leaf { path, value }),
            Some(Slot::Group(inner)) => collect_leaves(inner, &path, out),
            None => {}
        }
    }
}

/// Day/month/year triple as written on the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateField {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateField {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// No component filled in
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.trim().is_empty())
    }

    /// Every component filled in (says nothing about validity)
    pub fn is_complete(&self) -> bool {
        self.components().iter().all(|c| !c.trim().is_empty())
    }

    fn components(&self) -> [&str; 3] {
        [&self.day, &self.month, &self.year]
    }
}

impl FieldGroup for DateField {
    fn keys(&self) -> &'static [&'static str] {
        &["day", "month", "year"]
    }

    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        match key {
            "day" => Some(Slot::Leaf(&self.day)),
            "month" => Some(Slot::Leaf(&self.month)),
            "year" => Some(Slot::Leaf(&self.year)),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        match key {
            "day" => Some(SlotMut::Leaf(&mut self.day)),
            "month" => Some(SlotMut::Leaf(&mut self.month)),
            "year" => Some(SlotMut::Leaf(&mut self.year)),
            _ => None,
        }
    }
}

/// Residential address block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressField {
    pub street: String,
    pub house_number: String,
    pub entrance: String,
    pub apartment: String,
    pub city: String,
    pub postal_code: String,
    pub po_box: String,
}

impl FieldGroup for AddressField {
    fn keys(&self) -> &'static [&'static str] {
        &[
            "street",
            "houseNumber",
            "entrance",
            "apartment",
            "city",
            "postalCode",
            "poBox",
        ]
    }

    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        let value = match key {
            "street" => &self.street,
            "houseNumber" => &self.house_number,
            "entrance" => &self.entrance,
            "apartment" => &self.apartment,
            "city" => &self.city,
            "postalCode" => &self.postal_code,
            "poBox" => &self.po_box,
            _ => return None,
        };
        Some(Slot::Leaf(value))
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        let value = match key {
            "street" => &mut self.street,
            "houseNumber" => &mut self.house_number,
            "entrance" => &mut self.entrance,
            "apartment" => &mut self.apartment,
            "city" => &mut self.city,
            "postalCode" => &mut self.postal_code,
            "poBox" => &mut self.po_box,
            _ => return None,
        };
        Some(SlotMut::Leaf(value))
    }
}

/// Section filled in by the medical institution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalInstitutionFields {
    pub health_fund_member: String,
    pub nature_of_accident: String,
    pub medical_diagnoses: String,
}

impl FieldGroup for MedicalInstitutionFields {
    fn keys(&self) -> &'static [&'static str] {
        &["healthFundMember", "natureOfAccident", "medicalDiagnoses"]
    }

    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        let value = match key {
            "healthFundMember" => &self.health_fund_member,
            "natureOfAccident" => &self.nature_of_accident,
            "medicalDiagnoses" => &self.medical_diagnoses,
            _ => return None,
        };
        Some(Slot::Leaf(value))
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        let value = match key {
            "healthFundMember" => &mut self.health_fund_member,
            "natureOfAccident" => &mut self.nature_of_accident,
            "medicalDiagnoses" => &mut self.medical_diagnoses,
            _ => return None,
        };
        Some(SlotMut::Leaf(value))
    }
}

/// Canonical form 283 record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRecord {
    pub last_name: String,
    pub first_name: String,
    pub id_number: String,
    pub gender: String,
    pub date_of_birth: DateField,
    pub address: AddressField,
    pub landline_phone: String,
    pub mobile_phone: String,
    pub job_type: String,
    pub date_of_injury: DateField,
    pub time_of_injury: String,
    pub accident_location: String,
    pub accident_address: String,
    pub accident_description: String,
    pub injured_body_part: String,
    pub signature: String,
    pub form_filling_date: DateField,
    pub form_receipt_date_at_clinic: DateField,
    pub medical_institution_fields: MedicalInstitutionFields,
}

impl FormRecord {
    /// Every leaf in form order
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }

    /// The four date fields, by wire name
    pub fn date_fields(&self) -> [(&'static str, &DateField); 4] {
        [
            (fields::DATE_OF_BIRTH, &self.date_of_birth),
            (fields::DATE_OF_INJURY, &self.date_of_injury),
            (fields::FORM_FILLING_DATE, &self.form_filling_date),
            (fields::FORM_RECEIPT_DATE_AT_CLINIC, &self.form_receipt_date_at_clinic),
        ]
    }

    pub fn date_fields_mut(&mut self) -> [(&'static str, &mut DateField); 4] {
        [
            (fields::DATE_OF_BIRTH, &mut self.date_of_birth),
            (fields::DATE_OF_INJURY, &mut self.date_of_injury),
            (fields::FORM_FILLING_DATE, &mut self.form_filling_date),
            (fields::FORM_RECEIPT_DATE_AT_CLINIC, &mut self.form_receipt_date_at_clinic),
        ]
    }

    /// "firstName lastName", trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

impl FieldGroup for FormRecord {
    fn keys(&self) -> &'static [&'static str] {
        &[
            fields::LAST_NAME,
            fields::FIRST_NAME,
            fields::ID_NUMBER,
            fields::GENDER,
            fields::DATE_OF_BIRTH,
            fields::ADDRESS,
            fields::LANDLINE_PHONE,
            fields::MOBILE_PHONE,
            fields::JOB_TYPE,
            fields::DATE_OF_INJURY,
            fields::TIME_OF_INJURY,
            fields::ACCIDENT_LOCATION,
            fields::ACCIDENT_ADDRESS,
            fields::ACCIDENT_DESCRIPTION,
            fields::INJURED_BODY_PART,
            fields::SIGNATURE,
            fields::FORM_FILLING_DATE,
            fields::FORM_RECEIPT_DATE_AT_CLINIC,
            fields::MEDICAL_INSTITUTION_FIELDS,
        ]
    }

    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        let leaf = match key {
            fields::LAST_NAME => &self.last_name,
            fields::FIRST_NAME => &self.first_name,
            fields::ID_NUMBER => &self.id_number,
            fields::GENDER => &self.gender,
            fields::LANDLINE_PHONE => &self.landline_phone,
            fields::MOBILE_PHONE => &self.mobile_phone,
            fields::JOB_TYPE => &self.job_type,
            fields::TIME_OF_INJURY => &self.time_of_injury,
            fields::ACCIDENT_LOCATION => &self.accident_location,
            fields::ACCIDENT_ADDRESS => &self.accident_address,
            fields::ACCIDENT_DESCRIPTION => &self.accident_description,
            fields::INJURED_BODY_PART => &self.injured_body_part,
            fields::SIGNATURE => &self.signature,
            fields::DATE_OF_BIRTH => return Some(Slot::Group(&self.date_of_birth)),
            fields::ADDRESS => return Some(Slot::Group(&self.address)),
            fields::DATE_OF_INJURY => return Some(Slot::Group(&self.date_of_injury)),
            fields::FORM_FILLING_DATE => return Some(Slot::Group(&self.form_filling_date)),
            fields::FORM_RECEIPT_DATE_AT_CLINIC => {
                return Some(Slot::Group(&self.form_receipt_date_at_clinic))
            }
            fields::MEDICAL_INSTITUTION_FIELDS => {
                return Some(Slot::Group(&self.medical_institution_fields))
            }
            _ => return None,
        };
        Some(Slot::Leaf(leaf))
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        let leaf = match key {
            fields::LAST_NAME => &mut self.last_name,
            fields::FIRST_NAME => &mut self.first_name,
            fields::ID_NUMBER => &mut self.id_number,
            fields::GENDER => &mut self.gender,
            fields::LANDLINE_PHONE => &mut self.landline_phone,
            fields::MOBILE_PHONE => &mut self.mobile_phone,
            fields::JOB_TYPE => &mut self.job_type,
            fields::TIME_OF_INJURY => &mut self.time_of_injury,
            fields::ACCIDENT_LOCATION => &mut self.accident_location,
            fields::ACCIDENT_ADDRESS => &mut self.accident_address,
            fields::ACCIDENT_DESCRIPTION => &mut self.accident_description,
            fields::INJURED_BODY_PART => &mut self.injured_body_part,
            fields::SIGNATURE => &mut self.signature,
            fields::DATE_OF_BIRTH => return Some(SlotMut::Group(&mut self.date_of_birth)),
            fields::ADDRESS => return Some(SlotMut::Group(&mut self.address)),
            fields::DATE_OF_INJURY => return Some(SlotMut::Group(&mut self.date_of_injury)),
            fields::FORM_FILLING_DATE => return Some(SlotMut::Group(&mut self.form_filling_date)),
            fields::FORM_RECEIPT_DATE_AT_CLINIC => {
                return Some(SlotMut::Group(&mut self.form_receipt_date_at_clinic))
            }
            fields::MEDICAL_INSTITUTION_FIELDS => {
                return Some(SlotMut::Group(&mut self.medical_institution_fields))
            }
            _ => return None,
        };
        Some(SlotMut::Leaf(leaf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flattened keys of the serde representation, in serialization order
    fn serde_leaf_paths(value: &serde_json::Value, prefix: &str, out: &mut Vec<String>) {
        if let serde_json::Value::Object(map) = value {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                if child.is_object() {
                    serde_leaf_paths(child, &path, out);
                } else {
                    out.push(path);
                }
            }
        }
    }

    #[test]
    fn test_leaf_count_is_fixed() {
        // 13 strings + 4 dates x 3 + 7 address + 3 medical
        assert_eq!(FormRecord::default().leaves().len(), 35);
    }

    #[test]
    fn test_tree_matches_serde_shape() {
        let record = FormRecord::default();
        let json = serde_json::to_value(&record).unwrap();

        let mut serde_paths = Vec::new();
        serde_leaf_paths(&json, "", &mut serde_paths);
        serde_paths.sort();

        let mut tree_paths: Vec<String> = record.leaves().into_iter().map(|l| l.path).collect();
        tree_paths.sort();

        assert_eq!(serde_paths, tree_paths);
    }

    #[test]
    fn test_leaves_follow_form_order() {
        let record = FormRecord::default();
        let paths: Vec<String> = record.leaves().into_iter().map(|l| l.path).collect();
        assert_eq!(paths[0], "lastName");
        assert_eq!(paths[4], "dateOfBirth.day");
        assert_eq!(paths[7], "address.street");
        assert_eq!(paths[34], "medicalInstitutionFields.medicalDiagnoses");
    }

    #[test]
    fn test_slot_mut_writes_through() {
        let mut record = FormRecord::default();
        if let Some(SlotMut::Group(group)) = record.slot_mut("address") {
            if let Some(SlotMut::Leaf(city)) = group.slot_mut("city") {
                *city = "חיפה".to_string();
            }
        }
        assert_eq!(record.address.city, "חיפה");
        assert!(record.slot("notAField").is_none());
    }

    #[test]
    fn test_date_field_fill_states() {
        assert!(DateField::default().is_empty());
        assert!(DateField::new(" ", "", "").is_empty());
        assert!(DateField::new("01", "02", "2020").is_complete());

        let partial = DateField::new("01", "", "2020");
        assert!(!partial.is_empty());
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_full_name_trims() {
        let record = FormRecord {
            first_name: " דוד".to_string(),
            last_name: "".to_string(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "דוד");

        let record = FormRecord {
            first_name: "דוד".to_string(),
            last_name: "כהן".to_string(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "דוד כהן");
    }

    #[test]
    fn test_deserialize_fills_missing_with_defaults() {
        let record: FormRecord =
            serde_json::from_str(r#"{"firstName": "שלמה", "dateOfBirth": {"year": "1990"}}"#)
                .unwrap();
        assert_eq!(record.first_name, "שלמה");
        assert_eq!(record.date_of_birth.year, "1990");
        assert_eq!(record.date_of_birth.day, "");
        assert_eq!(record.medical_institution_fields, MedicalInstitutionFields::default());
    }
}
