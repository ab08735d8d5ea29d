// src/datapath/alu.rs
//! Saturating vector arithmetic unit
//!
//! Add and subtract clamp each lane independently to the i8 range. The dot
//! product widens into a 32-bit accumulator that is never clamped: the worst
//! case for four lanes is 4 * (-128) * (-128) = 65536, well inside i32.

use super::lane_vector::{LaneVector, LANES, LANE_MAX, LANE_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accumulator used by the dot product
pub type DotAccumulator = i32;

/// Width of [`DotAccumulator`] in bits
pub const DOT_ACCUMULATOR_BITS: u32 = DotAccumulator::BITS;

/// Operations supported by the datapath
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Subtract,
    DotProduct,
}

impl OperationKind {
    /// All operations in report order
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::DotProduct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Subtract => "subtract",
            OperationKind::DotProduct => "dot_product",
        }
    }

    /// Human-readable label for tables and charts
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Add => "VECTOR ADD",
            OperationKind::Subtract => "VECTOR SUB",
            OperationKind::DotProduct => "DOT PRODUCT",
        }
    }

    /// Dense index, matches the position in [`OperationKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            OperationKind::Add => 0,
            OperationKind::Subtract => 1,
            OperationKind::DotProduct => 2,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(OperationKind::Add),
            "subtract" | "sub" => Ok(OperationKind::Subtract),
            "dot_product" | "dot-product" | "dot" => Ok(OperationKind::DotProduct),
            other => Err(format!("Unknown operation: '{}' (expected add, subtract, dot_product)", other)),
        }
    }
}

/// Result of one ALU invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AluOutput {
    Vector(LaneVector),
    Scalar(DotAccumulator),
}

impl fmt::Display for AluOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AluOutput::Vector(v) => write!(f, "{}", v),
            AluOutput::Scalar(s) => write!(f, "{}", s),
        }
    }
}

/// Clamp a widened lane result into [-128, 127]
pub fn saturate(value: i32) -> i8 {
    value.clamp(i32::from(LANE_MIN), i32::from(LANE_MAX)) as i8
}

fn lanewise(a: &LaneVector, b: &LaneVector, op: impl Fn(i32, i32) -> i32) -> LaneVector {
    let mut out = [0i8; LANES];
    for (lane, (&x, &y)) in out.iter_mut().zip(a.lanes().iter().zip(b.lanes())) {
        *lane = saturate(op(i32::from(x), i32::from(y)));
    }
    LaneVector::new(out)
}

/// Per-lane saturating addition
pub fn add(a: &LaneVector, b: &LaneVector) -> LaneVector {
    lanewise(a, b, |x, y| x + y)
}

/// Per-lane saturating subtraction
pub fn subtract(a: &LaneVector, b: &LaneVector) -> LaneVector {
    lanewise(a, b, |x, y| x - y)
}

/// Widening dot product, accumulator not saturated
pub fn dot_product(a: &LaneVector, b: &LaneVector) -> DotAccumulator {
    a.lanes()
        .iter()
        .zip(b.lanes().iter())
        .map(|(&x, &y)| DotAccumulator::from(x) * DotAccumulator::from(y))
        .sum()
}

/// Dispatch a single operation
pub fn execute(op: OperationKind, a: &LaneVector, b: &LaneVector) -> AluOutput {
    match op {
        OperationKind::Add => AluOutput::Vector(add(a, b)),
        OperationKind::Subtract => AluOutput::Vector(subtract(a, b)),
        OperationKind::DotProduct => AluOutput::Scalar(dot_product(a, b)),
    }
}
