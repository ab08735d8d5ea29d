// src/config/mod.rs
//! Comparison configuration system
//! Handles TOML parsing and validation

use crate::analysis::PowerProfile;
use crate::datapath::{fsm, FpgaResources, HardwareProfile, LaneVector, OperationKind, ResourceUsage};
use crate::software::{BenchmarkConfig, MeasurementError, SoftwareMeasurement};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub hardware: HardwareConfig,
    pub power: PowerConfig,
    pub benchmark: BenchmarkSection,
    /// Previously recorded software latencies (us), keyed by operation name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recorded: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareConfig {
    pub clock_frequency_mhz: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fmax_mhz: Option<f64>,
    pub cycles: BTreeMap<String, u32>,
    /// Post-fit resource report, printed in the report when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    pub device: String,
    pub logic_elements: u32,
    pub logic_elements_available: u32,
    pub registers: u32,
    pub registers_available: u32,
    pub pins: u32,
    pub labs: u32,
    pub global_clocks: u32,
}

impl ResourcesConfig {
    pub fn to_resources(&self) -> Result<FpgaResources, ConfigError> {
        Ok(FpgaResources::new(
            self.device.clone(),
            ResourceUsage::new("logic_elements", self.logic_elements, self.logic_elements_available)?,
            ResourceUsage::new("registers", self.registers, self.registers_available)?,
            self.pins,
            self.labs,
            self.global_clocks,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerConfig {
    pub hardware_milliwatts: f64,
    pub software_watts: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSection {
    pub iterations: u64,
    pub warmup_iterations: u64,
    pub operand_a: LaneVector,
    pub operand_b: LaneVector,
}

impl ComparisonConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ComparisonConfig = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Documented values of the reference FPGA build and host CPU
    pub fn reference() -> Self {
        let cycles = OperationKind::ALL
            .iter()
            .map(|&op| (op.name().to_string(), fsm::architectural_cycles(op)))
            .collect();

        let mut recorded = BTreeMap::new();
        recorded.insert("add".to_string(), 2.365);
        recorded.insert("subtract".to_string(), 2.268);
        recorded.insert("dot_product".to_string(), 1.469);

        let bench = BenchmarkConfig::default();
        let fit = FpgaResources::reference();

        Self {
            hardware: HardwareConfig {
                clock_frequency_mhz: 250.0,
                fmax_mhz: Some(964.32),
                cycles,
                resources: Some(ResourcesConfig {
                    device: fit.device().to_string(),
                    logic_elements: fit.logic_elements().used(),
                    logic_elements_available: fit.logic_elements().available(),
                    registers: fit.registers().used(),
                    registers_available: fit.registers().available(),
                    pins: fit.pins(),
                    labs: fit.labs(),
                    global_clocks: fit.global_clocks(),
                }),
            },
            power: PowerConfig {
                hardware_milliwatts: 50.0,
                software_watts: 15.0,
            },
            benchmark: BenchmarkSection {
                iterations: bench.iterations,
                warmup_iterations: bench.warmup_iterations,
                operand_a: LaneVector::new([10, 20, 30, 40]),
                operand_b: LaneVector::new([5, 10, 15, 20]),
            },
            recorded,
        }
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hardware_profile()?;
        self.power_profile()?;
        self.benchmark_config()
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        self.recorded_measurements()?;
        Ok(())
    }

    /// Build the immutable hardware profile
    pub fn hardware_profile(&self) -> Result<HardwareProfile, ConfigError> {
        let mut cycles = HashMap::new();
        for (name, &count) in &self.hardware.cycles {
            let op = parse_operation(name)?;
            if cycles.insert(op, count).is_some() {
                return Err(ConfigError::DuplicateOperation(op));
            }
        }

        let mut profile = HardwareProfile::new(self.hardware.clock_frequency_mhz, &cycles)?;
        if let Some(fmax) = self.hardware.fmax_mhz {
            profile = profile.with_fmax(fmax)?;
        }
        if let Some(resources) = &self.hardware.resources {
            profile = profile.with_resources(resources.to_resources()?);
        }
        Ok(profile)
    }

    pub fn power_profile(&self) -> Result<PowerProfile, ConfigError> {
        PowerProfile::new(self.power.hardware_milliwatts, self.power.software_watts)
    }

    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            iterations: self.benchmark.iterations,
            warmup_iterations: self.benchmark.warmup_iterations,
        }
    }

    /// Recorded latencies as validated measurements, in report order
    pub fn recorded_measurements(&self) -> Result<Vec<SoftwareMeasurement>, ConfigError> {
        let mut by_op = BTreeMap::new();
        for (name, &latency_us) in &self.recorded {
            let op = parse_operation(name)?;
            let measurement = SoftwareMeasurement::recorded(op, latency_us, self.benchmark.iterations)
                .map_err(|source| ConfigError::RecordedMeasurement { operation: op, source })?;
            if by_op.insert(op, measurement).is_some() {
                return Err(ConfigError::DuplicateOperation(op));
            }
        }
        Ok(by_op.into_values().collect())
    }

    /// Export configuration to TOML string
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_str = self.to_toml_string()?;
        std::fs::write(path.as_ref(), toml_str)?;
        Ok(())
    }
}

fn parse_operation(name: &str) -> Result<OperationKind, ConfigError> {
    name.parse::<OperationKind>()
        .map_err(|_| ConfigError::UnknownOperation(name.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("No cycle count configured for operation '{0}'")]
    MissingOperation(OperationKind),

    #[error("Unknown operation: '{0}'")]
    UnknownOperation(String),

    #[error("Operation '{0}' configured more than once")]
    DuplicateOperation(OperationKind),

    #[error("Clock {clock_mhz} MHz exceeds fmax {fmax_mhz} MHz")]
    ClockAboveFmax { clock_mhz: f64, fmax_mhz: f64 },

    #[error("{resource}: {used} used exceeds the {available} available on the device")]
    ResourceExceedsDevice {
        resource: String,
        used: u32,
        available: u32,
    },

    #[error("Recorded latency for '{operation}' is invalid: {source}")]
    RecordedMeasurement {
        operation: OperationKind,
        source: MeasurementError,
    },
}
