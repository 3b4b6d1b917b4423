//! Errors raised while turning user input into entries.
//!
//! - [`InvalidAmount`] the amount is missing, not a number or not positive.
//! - [`MissingField`] a required form field was left empty.
//! - [`InvalidDate`] the date is not a `YYYY-MM-DD` calendar date.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidDate`]: EngineError::InvalidDate
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
