// src/analysis/comparison.rs
//! Per-operation comparison and headline summary

use super::metrics::{ComparisonRecord, PowerProfile};
use crate::config::ConfigError;
use crate::datapath::{HardwareTimingModel, OperationKind};
use crate::software::SoftwareMeasurement;
use serde::Serialize;
use std::collections::HashSet;

/// One record per measurement, in measurement order
pub fn compare(
    timing: &HardwareTimingModel,
    measurements: &[SoftwareMeasurement],
    power: &PowerProfile,
) -> Result<Vec<ComparisonRecord>, ConfigError> {
    let mut seen: HashSet<OperationKind> = HashSet::new();
    let mut records = Vec::with_capacity(measurements.len());

    for measurement in measurements {
        if !seen.insert(measurement.operation()) {
            return Err(ConfigError::DuplicateOperation(measurement.operation()));
        }
        records.push(ComparisonRecord::compute(timing, measurement, power)?);
    }

    Ok(records)
}

/// Headline figures across operations; never a substitute for the records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub mean_speedup: f64,
    pub max_speedup: f64,
    pub max_throughput_ratio: f64,
    pub max_efficiency_ratio: f64,
    pub operations: usize,
}

impl ComparisonSummary {
    /// `None` when there is nothing to summarise
    pub fn from_records(records: &[ComparisonRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mean_speedup = records.iter().map(|r| r.speedup).sum::<f64>() / records.len() as f64;
        let max_of = |f: fn(&ComparisonRecord) -> f64| {
            records.iter().map(f).fold(f64::NEG_INFINITY, f64::max)
        };

        Some(Self {
            mean_speedup,
            max_speedup: max_of(|r| r.speedup),
            max_throughput_ratio: max_of(ComparisonRecord::throughput_ratio),
            max_efficiency_ratio: max_of(ComparisonRecord::efficiency_ratio),
            operations: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapath::HardwareProfile;

    fn reference_records() -> Vec<ComparisonRecord> {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let measurements = vec![
            SoftwareMeasurement::recorded(OperationKind::Add, 2.365, 1_000_000).unwrap(),
            SoftwareMeasurement::recorded(OperationKind::Subtract, 2.268, 1_000_000).unwrap(),
            SoftwareMeasurement::recorded(OperationKind::DotProduct, 1.469, 1_000_000).unwrap(),
        ];
        compare(&timing, &measurements, &PowerProfile::reference()).unwrap()
    }

    #[test]
    fn test_compare_keeps_measurement_order() {
        let records = reference_records();
        let ops: Vec<_> = records.iter().map(|r| r.operation).collect();
        assert_eq!(ops, OperationKind::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_operation_rejected() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let m = SoftwareMeasurement::recorded(OperationKind::Add, 2.0, 10).unwrap();
        let err = compare(&timing, &[m.clone(), m], &PowerProfile::reference()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOperation(OperationKind::Add)));
    }

    #[test]
    fn test_summary_reference() {
        let records = reference_records();
        let summary = ComparisonSummary::from_records(&records).unwrap();

        // 98.54, 94.50, 40.81
        let expected_mean = (2.365 / 0.024 + 2.268 / 0.024 + 1.469 / 0.036) / 3.0;
        assert!((summary.mean_speedup - expected_mean).abs() < 1e-9);
        assert!((summary.max_speedup - 2.365 / 0.024).abs() < 1e-9);
        assert!((summary.max_throughput_ratio - summary.max_speedup).abs() < 1e-9);
        assert_eq!(summary.operations, 3);

        let best_efficiency = records.iter().map(|r| r.efficiency_ratio()).fold(0.0, f64::max);
        assert_eq!(summary.max_efficiency_ratio, best_efficiency);
    }

    #[test]
    fn test_summary_empty() {
        assert!(ComparisonSummary::from_records(&[]).is_none());
    }
}
