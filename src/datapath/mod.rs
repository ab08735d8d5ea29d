// src/datapath/mod.rs
//! Fixed-function 4-lane vector datapath
//!
//! The arithmetic both sides of the comparison perform, plus the analytical
//! timing of the hardware FSM that implements it.

pub mod lane_vector;
pub mod alu;
pub mod fsm;
pub mod timing;
pub mod resources;

pub use lane_vector::{LaneVector, InputContractError, LANES, LANE_MIN, LANE_MAX};
pub use alu::{OperationKind, AluOutput, DotAccumulator, DOT_ACCUMULATOR_BITS};
pub use fsm::{ControlState, state_path, architectural_cycles};
pub use timing::{HardwareProfile, HardwareTimingModel};
pub use resources::{FpgaResources, ResourceUsage};
