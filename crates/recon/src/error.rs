use thiserror::Error;

use crate::model::{Dataset, Measure};

#[derive(Debug, Error)]
pub enum ReconError {
    /// Malformed CSV: ragged rows, missing header, undecodable bytes.
    #[error("{dataset}: parse error: {message}")]
    Parse { dataset: Dataset, message: String },
    /// A required column is absent from the header row.
    #[error("{dataset}: missing column '{column}'")]
    MissingColumn { dataset: Dataset, column: String },
    /// A quantity cell that is neither empty nor a whole number.
    #[error("SKU '{sku}': cannot parse quantity '{value}'")]
    QuantityParse { sku: String, value: String },
    /// A column total does not fit the quantity range.
    #[error("total {0} exceeds the supported quantity range")]
    TotalOverflow(Measure),
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config or selection validation error.
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// The chart axis column is not part of the current grouping.
    #[error("display column '{0}' is not one of the grouped columns")]
    DisplayNotGrouped(String),
    /// IO error (file read, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl ReconError {
    pub(crate) fn parse(dataset: Dataset, message: impl Into<String>) -> Self {
        Self::Parse { dataset, message: message.into() }
    }
}

impl From<std::io::Error> for ReconError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
