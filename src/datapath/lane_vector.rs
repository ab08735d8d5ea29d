// src/datapath/lane_vector.rs
//! Fixed-width operand type for the vector datapath
//!
//! Every operand is exactly four signed 8-bit lanes. The length contract is
//! enforced here, at construction, so the ALU never has to check it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of lanes in every operand
pub const LANES: usize = 4;

/// Smallest representable lane value
pub const LANE_MIN: i8 = i8::MIN;

/// Largest representable lane value
pub const LANE_MAX: i8 = i8::MAX;

/// Four signed 8-bit lanes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct LaneVector([i8; LANES]);

impl LaneVector {
    pub const fn new(lanes: [i8; LANES]) -> Self {
        Self(lanes)
    }

    /// Build from a slice of exactly four lanes
    pub fn from_slice(lanes: &[i8]) -> Result<Self, InputContractError> {
        let lanes: [i8; LANES] = lanes
            .try_into()
            .map_err(|_| InputContractError::WrongLength { provided: lanes.len() })?;
        Ok(Self(lanes))
    }

    /// Build from wider integers, rejecting anything outside the i8 range
    pub fn from_wide(values: &[i32]) -> Result<Self, InputContractError> {
        if values.len() != LANES {
            return Err(InputContractError::WrongLength { provided: values.len() });
        }

        let mut lanes = [0i8; LANES];
        for (index, (&value, lane)) in values.iter().zip(lanes.iter_mut()).enumerate() {
            *lane = i8::try_from(value)
                .map_err(|_| InputContractError::LaneOutOfRange { index, value: i64::from(value) })?;
        }
        Ok(Self(lanes))
    }

    /// Uniformly random operand across the full lane range
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut lanes = [0i8; LANES];
        for lane in lanes.iter_mut() {
            *lane = rng.gen();
        }
        Self(lanes)
    }

    pub fn lanes(&self) -> &[i8; LANES] {
        &self.0
    }

    pub fn lane(&self, index: usize) -> Option<i8> {
        self.0.get(index).copied()
    }

    pub fn to_wide(&self) -> Vec<i32> {
        self.0.iter().map(|&lane| i32::from(lane)).collect()
    }
}

impl From<[i8; LANES]> for LaneVector {
    fn from(lanes: [i8; LANES]) -> Self {
        Self(lanes)
    }
}

impl TryFrom<Vec<i32>> for LaneVector {
    type Error = InputContractError;

    fn try_from(values: Vec<i32>) -> Result<Self, Self::Error> {
        Self::from_wide(&values)
    }
}

impl From<LaneVector> for Vec<i32> {
    fn from(vector: LaneVector) -> Self {
        vector.to_wide()
    }
}

/// Parses comma-separated lanes, e.g. `"10,20,30,40"`
impl FromStr for LaneVector {
    type Err = InputContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .map_err(|_| InputContractError::Parse(part.to_string()))
            })
            .collect::<Result<Vec<i64>, _>>()?;

        if values.len() != LANES {
            return Err(InputContractError::WrongLength { provided: values.len() });
        }

        let mut lanes = [0i8; LANES];
        for (index, (&value, lane)) in values.iter().zip(lanes.iter_mut()).enumerate() {
            *lane = i8::try_from(value)
                .map_err(|_| InputContractError::LaneOutOfRange { index, value })?;
        }
        Ok(Self(lanes))
    }
}

impl fmt::Display for LaneVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "[{}, {}, {}, {}]", a, b, c, d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputContractError {
    #[error("Lane vector needs exactly 4 elements, got {provided}")]
    WrongLength { provided: usize },

    #[error("Lane {index} value {value} outside [-128, 127]")]
    LaneOutOfRange { index: usize, value: i64 },

    #[error("Invalid lane value: '{0}'")]
    Parse(String),
}
