//! Hardware vs software model of a fixed-function 4-lane vector datapath
//!
//! The hardware side is an analytical FSM latency model; the software side
//! benchmarks the same saturating arithmetic on the host. The metrics engine
//! joins both per operation into latency, throughput and energy-efficiency
//! comparisons.

pub mod config;
pub mod datapath;
pub mod software;
pub mod analysis;
pub mod pipeline;
pub mod error;

pub use error::{Error, Result};
