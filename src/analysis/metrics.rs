// src/analysis/metrics.rs
//! Comparative metrics engine
//!
//! Joins the analytical hardware latency and the empirical software latency
//! of one operation with the power constants of both platforms. Every
//! function here is pure; a record recomputed from the same inputs is
//! bit-identical.

use crate::config::ConfigError;
use crate::datapath::{HardwareTimingModel, OperationKind};
use crate::software::SoftwareMeasurement;
use serde::{Deserialize, Serialize};

/// Microseconds per second
const US_PER_SEC: f64 = 1_000_000.0;

/// Estimated FPGA power for the reference build
pub const REFERENCE_HARDWARE_MILLIWATTS: f64 = 50.0;

/// Typical CPU package power while running the software loop
pub const REFERENCE_SOFTWARE_WATTS: f64 = 15.0;

/// Power draw of both platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPowerProfile")]
pub struct PowerProfile {
    hardware_milliwatts: f64,
    software_watts: f64,
}

/// Unchecked wire form, only ever turned into a profile through `PowerProfile::new`
#[derive(Deserialize)]
struct RawPowerProfile {
    hardware_milliwatts: f64,
    software_watts: f64,
}

impl TryFrom<RawPowerProfile> for PowerProfile {
    type Error = ConfigError;

    fn try_from(raw: RawPowerProfile) -> Result<Self, Self::Error> {
        PowerProfile::new(raw.hardware_milliwatts, raw.software_watts)
    }
}

impl PowerProfile {
    pub fn new(hardware_milliwatts: f64, software_watts: f64) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("hardware_milliwatts", hardware_milliwatts),
            ("software_watts", software_watts),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(Self {
            hardware_milliwatts,
            software_watts,
        })
    }

    pub fn reference() -> Self {
        Self {
            hardware_milliwatts: REFERENCE_HARDWARE_MILLIWATTS,
            software_watts: REFERENCE_SOFTWARE_WATTS,
        }
    }

    pub fn hardware_milliwatts(&self) -> f64 {
        self.hardware_milliwatts
    }

    pub fn hardware_watts(&self) -> f64 {
        self.hardware_milliwatts / 1000.0
    }

    pub fn software_watts(&self) -> f64 {
        self.software_watts
    }
}

/// How many times faster hardware is than software
pub fn speedup(hw_latency_us: f64, sw_latency_us: f64) -> Result<f64, ConfigError> {
    if !(hw_latency_us.is_finite() && hw_latency_us > 0.0) {
        return Err(ConfigError::NonPositive {
            field: "hw_latency_us".to_string(),
            value: hw_latency_us,
        });
    }
    Ok(sw_latency_us / hw_latency_us)
}

/// Operations per second
pub fn throughput(latency_us: f64) -> f64 {
    US_PER_SEC / latency_us
}

pub fn energy_per_operation_joules(power_watts: f64, latency_us: f64) -> f64 {
    power_watts * latency_us / US_PER_SEC
}

/// Operations per joule
pub fn efficiency(power_watts: f64, latency_us: f64) -> f64 {
    1.0 / energy_per_operation_joules(power_watts, latency_us)
}

pub fn efficiency_ratio(hw_efficiency: f64, sw_efficiency: f64) -> f64 {
    hw_efficiency / sw_efficiency
}

/// Hardware vs software figures for one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub operation: OperationKind,
    pub hw_cycles: u32,
    pub hw_latency_us: f64,
    pub sw_latency_us: f64,
    pub speedup: f64,
    pub hw_throughput_ops_per_sec: f64,
    pub sw_throughput_ops_per_sec: f64,
    pub hw_efficiency_ops_per_joule: f64,
    pub sw_efficiency_ops_per_joule: f64,
}

impl ComparisonRecord {
    pub fn compute(
        timing: &HardwareTimingModel,
        measurement: &SoftwareMeasurement,
        power: &PowerProfile,
    ) -> Result<Self, ConfigError> {
        let operation = measurement.operation();
        let hw_latency_us = timing.latency_us(operation);
        let sw_latency_us = measurement.mean_latency_us();

        Ok(Self {
            operation,
            hw_cycles: timing.cycles(operation),
            hw_latency_us,
            sw_latency_us,
            speedup: speedup(hw_latency_us, sw_latency_us)?,
            hw_throughput_ops_per_sec: throughput(hw_latency_us),
            sw_throughput_ops_per_sec: throughput(sw_latency_us),
            hw_efficiency_ops_per_joule: efficiency(power.hardware_watts(), hw_latency_us),
            sw_efficiency_ops_per_joule: efficiency(power.software_watts(), sw_latency_us),
        })
    }

    pub fn hw_latency_ns(&self) -> f64 {
        self.hw_latency_us * 1000.0
    }

    pub fn throughput_ratio(&self) -> f64 {
        self.hw_throughput_ops_per_sec / self.sw_throughput_ops_per_sec
    }

    pub fn efficiency_ratio(&self) -> f64 {
        efficiency_ratio(self.hw_efficiency_ops_per_joule, self.sw_efficiency_ops_per_joule)
    }

    pub fn hw_energy_per_op_joules(&self) -> f64 {
        1.0 / self.hw_efficiency_ops_per_joule
    }

    pub fn sw_energy_per_op_joules(&self) -> f64 {
        1.0 / self.sw_efficiency_ops_per_joule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapath::HardwareProfile;

    fn close(a: f64, b: f64, rel: f64) -> bool {
        ((a - b) / b).abs() < rel
    }

    #[test]
    fn test_speedup_reference_add() {
        let s = speedup(0.024, 2.365).unwrap();
        assert!((s - 98.541_666).abs() < 1e-3);
    }

    #[test]
    fn test_speedup_rejects_non_positive_hw_latency() {
        assert!(matches!(speedup(0.0, 1.0), Err(ConfigError::NonPositive { .. })));
        assert!(matches!(speedup(-0.5, 1.0), Err(ConfigError::NonPositive { .. })));
        assert!(speedup(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_throughput_latency_product() {
        for latency in [0.024, 0.036, 1.469, 2.268, 2.365, 1000.0] {
            assert!((throughput(latency) * latency - 1_000_000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_energy_and_efficiency() {
        // 50 mW over 24 ns
        let e = energy_per_operation_joules(0.05, 0.024);
        assert!(close(e, 1.2e-9, 1e-12));
        assert!(close(efficiency(0.05, 0.024), 1.0 / 1.2e-9, 1e-12));
    }

    #[test]
    fn test_power_profile_validation() {
        assert!(PowerProfile::new(50.0, 15.0).is_ok());
        assert!(PowerProfile::new(0.0, 15.0).is_err());
        assert!(PowerProfile::new(50.0, -1.0).is_err());
        assert!(PowerProfile::new(f64::INFINITY, 15.0).is_err());
        assert_eq!(PowerProfile::reference().hardware_watts(), 0.05);
    }

    #[test]
    fn test_power_profile_deserialize_validates() {
        let bad = serde_json::from_str::<PowerProfile>(
            r#"{"hardware_milliwatts":0.0,"software_watts":-15.0}"#,
        );
        assert!(bad.is_err());

        let json = serde_json::to_string(&PowerProfile::reference()).unwrap();
        let back: PowerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PowerProfile::reference());
    }

    #[test]
    fn test_record_reference_add() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let sw = SoftwareMeasurement::recorded(OperationKind::Add, 2.365, 1_000_000).unwrap();
        let record = ComparisonRecord::compute(&timing, &sw, &PowerProfile::reference()).unwrap();

        assert_eq!(record.hw_cycles, 6);
        assert!((record.hw_latency_ns() - 24.0).abs() < 1e-9);
        assert!((record.speedup - 98.54).abs() < 0.01);
        assert!(close(record.hw_throughput_ops_per_sec, 41_666_666.67, 1e-9));
        assert!(close(record.throughput_ratio(), record.speedup, 1e-12));

        // (15 W * 2.365 us) / (0.05 W * 0.024 us)
        let expected_ratio = (15.0 * 2.365) / (0.05 * 0.024);
        assert!(close(record.efficiency_ratio(), expected_ratio, 1e-9));
    }

    #[test]
    fn test_record_is_deterministic() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let sw = SoftwareMeasurement::recorded(OperationKind::DotProduct, 1.469, 1_000_000).unwrap();
        let power = PowerProfile::reference();

        let first = ComparisonRecord::compute(&timing, &sw, &power).unwrap();
        let second = ComparisonRecord::compute(&timing, &sw, &power).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.speedup.to_bits(), second.speedup.to_bits());
    }
}
