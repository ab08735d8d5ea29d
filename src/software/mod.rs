// src/software/mod.rs
//! Software baseline for the datapath comparison
//!
//! Runs the same ALU arithmetic on the host CPU and measures its
//! steady-state latency empirically.

pub mod harness;

pub use harness::{
    measure, measure_with_clock, measure_suite, BenchClock, BenchmarkConfig, MeasurementError,
    MonotonicClock, SoftwareMeasurement,
};
