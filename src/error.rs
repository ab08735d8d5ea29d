// src/error.rs
//! Crate-level error for the end-to-end comparison pipeline

use crate::config::ConfigError;
use crate::datapath::InputContractError;
use crate::software::MeasurementError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input contract violated: {0}")]
    InputContract(#[from] InputContractError),

    #[error("Measurement rejected: {0}")]
    Measurement(#[from] MeasurementError),
}

pub type Result<T> = std::result::Result<T, Error>;
