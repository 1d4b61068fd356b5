use serde::Serialize;
use thiserror::Error;

/// Rejected dashboard input. Both variants are local validation failures:
/// the UI shows them and keeps running.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DashError {
    #[error("launch site '{0}' is not present in the dataset")]
    InvalidSelection(String),

    #[error("invalid payload range [{low}, {high}] kg")]
    InvalidRange { low: f64, high: f64 },
}
