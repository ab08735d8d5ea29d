// src/analysis/sweep.rs
//! Clock frequency sweep
//!
//! Re-derives the comparison at several operating clocks. Each point gets a
//! fresh immutable profile; the software side is reused as measured.

use super::comparison::{compare, ComparisonSummary};
use super::metrics::{ComparisonRecord, PowerProfile};
use crate::config::ConfigError;
use crate::datapath::{HardwareProfile, HardwareTimingModel};
use crate::software::SoftwareMeasurement;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub clock_frequency_mhz: f64,
    pub clock_period_ns: f64,
    pub records: Vec<ComparisonRecord>,
    pub summary: Option<ComparisonSummary>,
}

/// Clocks swept when none are given
pub fn default_frequencies(profile: &HardwareProfile) -> Vec<f64> {
    let mut frequencies = vec![50.0, 100.0, 250.0, 500.0];
    if let Some(fmax) = profile.fmax_mhz() {
        frequencies.retain(|&f| f <= fmax);
        if frequencies.last() != Some(&fmax) {
            frequencies.push(fmax);
        }
    }
    frequencies
}

pub fn clock_sweep(
    profile: &HardwareProfile,
    measurements: &[SoftwareMeasurement],
    power: &PowerProfile,
    frequencies: &[f64],
) -> Result<Vec<SweepPoint>, ConfigError> {
    frequencies
        .iter()
        .map(|&mhz| {
            let timing = HardwareTimingModel::new(profile.at_clock(mhz)?);
            let records = compare(&timing, measurements, power)?;
            let summary = ComparisonSummary::from_records(&records);
            debug!("Sweep point {} MHz: {} records", mhz, records.len());

            Ok(SweepPoint {
                clock_frequency_mhz: mhz,
                clock_period_ns: timing.clock_period_ns(),
                records,
                summary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapath::OperationKind;

    fn measurements() -> Vec<SoftwareMeasurement> {
        vec![
            SoftwareMeasurement::recorded(OperationKind::Add, 2.365, 1_000_000).unwrap(),
            SoftwareMeasurement::recorded(OperationKind::DotProduct, 1.469, 1_000_000).unwrap(),
        ]
    }

    #[test]
    fn test_speedup_scales_with_clock() {
        let profile = HardwareProfile::reference().unwrap();
        let points = clock_sweep(&profile, &measurements(), &PowerProfile::reference(), &[125.0, 250.0]).unwrap();

        assert_eq!(points.len(), 2);
        let slow = points[0].records[0].speedup;
        let fast = points[1].records[0].speedup;
        assert!((fast / slow - 2.0).abs() < 1e-9);
        assert!((points[0].clock_period_ns - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_rejects_clock_above_fmax() {
        let profile = HardwareProfile::reference().unwrap();
        let result = clock_sweep(&profile, &measurements(), &PowerProfile::reference(), &[250.0, 2000.0]);
        assert!(matches!(result, Err(ConfigError::ClockAboveFmax { .. })));
    }

    #[test]
    fn test_default_frequencies_capped_at_fmax() {
        let profile = HardwareProfile::reference().unwrap();
        let freqs = default_frequencies(&profile);
        assert_eq!(freqs.last(), Some(&964.32));
        assert!(freqs.iter().all(|&f| f <= 964.32));
    }

    #[test]
    fn test_fmax_on_default_list_not_repeated() {
        let profile = HardwareProfile::architectural(250.0).unwrap().with_fmax(500.0).unwrap();
        assert_eq!(default_frequencies(&profile), vec![50.0, 100.0, 250.0, 500.0]);

        let unbounded = HardwareProfile::architectural(250.0).unwrap();
        assert_eq!(default_frequencies(&unbounded), vec![50.0, 100.0, 250.0, 500.0]);
    }
}
