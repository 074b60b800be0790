//! # wiform Common Library
//!
//! Shared code for the wiform crates:
//! - Canonical form record (National Insurance form 283) and its typed field tree
//! - Health fund enumeration
//! - Configuration loading
//! - Error types

pub mod config;
pub mod error;
pub mod form;
pub mod health_fund;

pub use error::{Error, Result};
pub use form::{AddressField, DateField, FormRecord, MedicalInstitutionFields};
pub use health_fund::HealthFund;
