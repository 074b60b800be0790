//! Error type shared by the wiform crates
//!
//! Only the edges can fail: reading config and fixture files. Form data
//! itself never produces an `Error`; bad drafts become warnings and
//! validation messages instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file present but unusable (message names the file)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Caller-supplied document that does not have the expected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
