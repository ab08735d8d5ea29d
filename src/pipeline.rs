// src/pipeline.rs
//! End-to-end comparison: configuration in, records out

use crate::analysis::{compare, ComparisonRecord, ComparisonSummary, PowerProfile};
use crate::config::ComparisonConfig;
use crate::datapath::HardwareTimingModel;
use crate::software::{measure_suite, SoftwareMeasurement};
use crate::Result;
use log::info;

/// Where the software latencies come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftwareSource {
    /// Benchmark the ALU on this host now
    Measured,
    /// Use the `[recorded]` table of the configuration
    Recorded,
}

/// Everything one comparison produced
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub timing: HardwareTimingModel,
    pub power: PowerProfile,
    pub measurements: Vec<SoftwareMeasurement>,
    pub records: Vec<ComparisonRecord>,
    pub summary: Option<ComparisonSummary>,
}

pub fn run(config: &ComparisonConfig, source: SoftwareSource) -> Result<ComparisonRun> {
    let timing = HardwareTimingModel::new(config.hardware_profile()?);
    let power = config.power_profile()?;

    let measurements = match source {
        SoftwareSource::Measured => measure_suite(
            config.benchmark.operand_a,
            config.benchmark.operand_b,
            &config.benchmark_config(),
        )?,
        SoftwareSource::Recorded => config.recorded_measurements()?,
    };
    info!("Comparing {} operations ({:?} software latencies)", measurements.len(), source);

    let records = compare(&timing, &measurements, &power)?;
    let summary = ComparisonSummary::from_records(&records);

    Ok(ComparisonRun {
        timing,
        power,
        measurements,
        records,
        summary,
    })
}
