// src/software/harness.rs
//! Software benchmark harness
//!
//! Two phases per measurement: a discarded warm-up loop, then one timed
//! region of back-to-back ALU calls. The clock is read exactly twice so timer
//! overhead does not swamp a few-nanosecond operation.

use crate::datapath::alu::{self, AluOutput, OperationKind};
use crate::datapath::LaneVector;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Instant;

/// Iterations per timed region when none is configured
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Warm-up invocations when none is configured
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 100;

/// Iteration counts for one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub iterations: u64,
    pub warmup_iterations: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), MeasurementError> {
        if self.iterations == 0 {
            return Err(MeasurementError::InvalidIterationCount {
                field: "iterations",
                value: self.iterations,
            });
        }
        if self.warmup_iterations == 0 {
            return Err(MeasurementError::InvalidIterationCount {
                field: "warmup_iterations",
                value: self.warmup_iterations,
            });
        }
        Ok(())
    }
}

/// Time source for the timed region
pub trait BenchClock {
    /// Seconds since an arbitrary, clock-specific origin
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchClock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Empirical latency of one operation, valid by construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoftwareMeasurement {
    operation: OperationKind,
    mean_latency_us: f64,
    iteration_count: u64,
    warmup_iterations: u64,
    total_elapsed_us: f64,
    last_result: Option<AluOutput>,
}

impl SoftwareMeasurement {
    /// Rebuild a measurement from previously recorded numbers
    pub fn recorded(
        operation: OperationKind,
        mean_latency_us: f64,
        iteration_count: u64,
    ) -> Result<Self, MeasurementError> {
        if iteration_count == 0 {
            return Err(MeasurementError::InvalidIterationCount {
                field: "iterations",
                value: 0,
            });
        }
        check_latency(mean_latency_us)?;

        Ok(Self {
            operation,
            mean_latency_us,
            iteration_count,
            warmup_iterations: 0,
            total_elapsed_us: mean_latency_us * iteration_count as f64,
            last_result: None,
        })
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn mean_latency_us(&self) -> f64 {
        self.mean_latency_us
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    /// Zero for recorded measurements
    pub fn warmup_iterations(&self) -> u64 {
        self.warmup_iterations
    }

    pub fn total_elapsed_us(&self) -> f64 {
        self.total_elapsed_us
    }

    /// Output of the final timed call; `None` for recorded measurements
    pub fn last_result(&self) -> Option<&AluOutput> {
        self.last_result.as_ref()
    }

    pub fn is_recorded(&self) -> bool {
        self.last_result.is_none()
    }
}

fn check_latency(mean_latency_us: f64) -> Result<(), MeasurementError> {
    if !mean_latency_us.is_finite() {
        return Err(MeasurementError::NonFiniteLatency(mean_latency_us));
    }
    if mean_latency_us <= 0.0 {
        return Err(MeasurementError::NonPositiveLatency(mean_latency_us));
    }
    Ok(())
}

/// Benchmark one operation against the wall clock
pub fn measure(
    op: OperationKind,
    a: LaneVector,
    b: LaneVector,
    iterations: u64,
    warmup_iterations: u64,
) -> Result<SoftwareMeasurement, MeasurementError> {
    measure_with_clock(&MonotonicClock::new(), op, a, b, iterations, warmup_iterations)
}

/// Benchmark one operation against a caller-supplied clock
pub fn measure_with_clock<C: BenchClock + ?Sized>(
    clock: &C,
    op: OperationKind,
    a: LaneVector,
    b: LaneVector,
    iterations: u64,
    warmup_iterations: u64,
) -> Result<SoftwareMeasurement, MeasurementError> {
    BenchmarkConfig { iterations, warmup_iterations }.validate()?;

    debug!("{}: warm-up {} iterations", op, warmup_iterations);
    for _ in 0..warmup_iterations {
        black_box(alu::execute(op, black_box(&a), black_box(&b)));
    }

    let mut last_result = AluOutput::Scalar(0);
    let start = clock.now();
    for _ in 0..iterations {
        last_result = black_box(alu::execute(op, black_box(&a), black_box(&b)));
    }
    let end = clock.now();

    let elapsed_secs = end - start;
    if !elapsed_secs.is_finite() {
        warn!("{}: non-finite elapsed time, measurement rejected", op);
        return Err(MeasurementError::NonFiniteElapsed(elapsed_secs));
    }
    if elapsed_secs <= 0.0 {
        warn!("{}: elapsed time {} s, measurement rejected", op, elapsed_secs);
        return Err(MeasurementError::NonPositiveElapsed(elapsed_secs));
    }

    let total_elapsed_us = elapsed_secs * 1e6;
    let mean_latency_us = total_elapsed_us / iterations as f64;
    check_latency(mean_latency_us)?;

    info!(
        "{}: {:.4} us/op over {} iterations ({:.3} ms total)",
        op,
        mean_latency_us,
        iterations,
        total_elapsed_us / 1000.0
    );

    Ok(SoftwareMeasurement {
        operation: op,
        mean_latency_us,
        iteration_count: iterations,
        warmup_iterations,
        total_elapsed_us,
        last_result: Some(last_result),
    })
}

/// Measure every operation in report order with the same operands
pub fn measure_suite(
    a: LaneVector,
    b: LaneVector,
    config: &BenchmarkConfig,
) -> Result<Vec<SoftwareMeasurement>, MeasurementError> {
    config.validate()?;
    OperationKind::ALL
        .iter()
        .map(|&op| measure(op, a, b, config.iterations, config.warmup_iterations))
        .collect()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasurementError {
    #[error("Invalid {field}: {value}. Must be greater than 0")]
    InvalidIterationCount { field: &'static str, value: u64 },

    #[error("Benchmark clock reported non-positive elapsed time: {0} s")]
    NonPositiveElapsed(f64),

    #[error("Benchmark clock reported non-finite elapsed time: {0}")]
    NonFiniteElapsed(f64),

    #[error("Mean latency must be positive, got {0} us")]
    NonPositiveLatency(f64),

    #[error("Mean latency must be finite, got {0}")]
    NonFiniteLatency(f64),
}
