// tests/harness_test.rs
//! Software benchmark harness against injected and real clocks

use std::cell::Cell;
use vecproc_sim::datapath::{AluOutput, LaneVector, OperationKind};
use vecproc_sim::software::{
    measure, measure_suite, measure_with_clock, BenchClock, BenchmarkConfig, MeasurementError,
};

/// Advances a fixed amount every time it is read
struct FixedStepClock {
    now: Cell<f64>,
    step: f64,
    reads: Cell<u32>,
}

impl FixedStepClock {
    fn new(step: f64) -> Self {
        Self { now: Cell::new(10.0), step, reads: Cell::new(0) }
    }
}

impl BenchClock for FixedStepClock {
    fn now(&self) -> f64 {
        self.reads.set(self.reads.get() + 1);
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}

fn operands() -> (LaneVector, LaneVector) {
    (LaneVector::new([10, 20, 30, 40]), LaneVector::new([5, 10, 15, 20]))
}

#[test]
fn test_single_timed_region() {
    let (a, b) = operands();
    let clock = FixedStepClock::new(0.002);
    let m = measure_with_clock(&clock, OperationKind::Add, a, b, 1_000, 100).unwrap();

    // Warm-up is never timed: exactly one start and one stop reading
    assert_eq!(clock.reads.get(), 2);
    assert!((m.total_elapsed_us() - 2_000.0).abs() < 1e-6);
    assert!((m.mean_latency_us() - 2.0).abs() < 1e-9);
    assert_eq!(m.iteration_count(), 1_000);
    assert_eq!(m.warmup_iterations(), 100);
    assert!(!m.is_recorded());
}

#[test]
fn test_last_result_is_alu_output() {
    let (a, b) = operands();
    let clock = FixedStepClock::new(1e-3);
    let m = measure_with_clock(&clock, OperationKind::DotProduct, a, b, 10, 1).unwrap();
    assert_eq!(m.last_result(), Some(&AluOutput::Scalar(1500)));
}

#[test]
fn test_zero_iterations_rejected() {
    let (a, b) = operands();
    let clock = FixedStepClock::new(1.0);
    let err = measure_with_clock(&clock, OperationKind::Add, a, b, 0, 10).unwrap_err();
    assert_eq!(
        err,
        MeasurementError::InvalidIterationCount { field: "iterations", value: 0 }
    );
    assert_eq!(clock.reads.get(), 0);
}

#[test]
fn test_stalled_clock_rejected() {
    let (a, b) = operands();
    let clock = FixedStepClock::new(0.0);
    let err = measure_with_clock(&clock, OperationKind::Subtract, a, b, 100, 10).unwrap_err();
    assert!(matches!(err, MeasurementError::NonPositiveElapsed(_)));
}

#[test]
fn test_wall_clock_suite() {
    let (a, b) = operands();
    let config = BenchmarkConfig { iterations: 20_000, warmup_iterations: 100 };
    let suite = measure_suite(a, b, &config).unwrap();

    let ops: Vec<_> = suite.iter().map(|m| m.operation()).collect();
    assert_eq!(ops, OperationKind::ALL.to_vec());
    for m in &suite {
        assert!(m.mean_latency_us().is_finite());
        assert!(m.mean_latency_us() > 0.0);
    }
}

#[test]
fn test_wall_clock_single_operation() {
    let (a, b) = operands();
    let m = measure(OperationKind::Add, a, b, 50_000, 100).unwrap();
    assert_eq!(
        m.last_result(),
        Some(&AluOutput::Vector(LaneVector::new([15, 30, 45, 60])))
    );
}
