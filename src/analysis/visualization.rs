// src/analysis/visualization.rs
//! ASCII charts and data export for comparison records
//!
//! Hardware and software values differ by orders of magnitude, so charts can
//! switch to a log10 axis.

use super::metrics::ComparisonRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    Latency,
    Speedup,
    Throughput,
    Efficiency,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 4] = [
        ChartMetric::Latency,
        ChartMetric::Speedup,
        ChartMetric::Throughput,
        ChartMetric::Efficiency,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartMetric::Latency => "Latency per operation (us)",
            ChartMetric::Speedup => "Speedup (x)",
            ChartMetric::Throughput => "Throughput (ops/s)",
            ChartMetric::Efficiency => "Energy efficiency (ops/J)",
        }
    }

    /// (hardware, software) pair, or a single bar for ratios
    fn values(&self, record: &ComparisonRecord) -> Vec<(&'static str, f64)> {
        match self {
            ChartMetric::Latency => vec![("HW", record.hw_latency_us), ("SW", record.sw_latency_us)],
            ChartMetric::Speedup => vec![("HW/SW", record.speedup)],
            ChartMetric::Throughput => vec![
                ("HW", record.hw_throughput_ops_per_sec),
                ("SW", record.sw_throughput_ops_per_sec),
            ],
            ChartMetric::Efficiency => vec![
                ("HW", record.hw_efficiency_ops_per_joule),
                ("SW", record.sw_efficiency_ops_per_joule),
            ],
        }
    }

    /// Efficiency spans several decades between platforms
    pub fn prefers_log_scale(&self) -> bool {
        matches!(self, ChartMetric::Efficiency | ChartMetric::Throughput | ChartMetric::Latency)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Width of the longest bar in characters
    pub bar_width: usize,
    pub log_scale: bool,
    pub hardware_glyph: char,
    pub software_glyph: char,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 50,
            log_scale: false,
            hardware_glyph: '#',
            software_glyph: '=',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Horizontal bar chart, one group of bars per operation
    pub fn bar_chart(&self, records: &[ComparisonRecord], metric: ChartMetric) -> String {
        if records.is_empty() {
            return "No data to plot".to_string();
        }

        let rows: Vec<(String, &'static str, f64)> = records
            .iter()
            .flat_map(|r| {
                metric
                    .values(r)
                    .into_iter()
                    .map(move |(series, value)| (r.operation.label().to_string(), series, value))
            })
            .collect();

        let scaled = |v: f64| -> f64 {
            if self.config.log_scale {
                // Shift so the smallest bar still has length
                v.max(f64::MIN_POSITIVE).log10()
            } else {
                v
            }
        };

        let floor = if self.config.log_scale {
            rows.iter().map(|(_, _, v)| scaled(*v)).fold(f64::INFINITY, f64::min) - 1.0
        } else {
            0.0
        };
        let peak = rows
            .iter()
            .map(|(_, _, v)| scaled(*v) - floor)
            .fold(0.0_f64, f64::max);

        let mut chart = String::new();
        chart.push_str(metric.title());
        if self.config.log_scale {
            chart.push_str(" [log10]");
        }
        chart.push('\n');

        for (label, series, value) in &rows {
            let len = if peak > 0.0 {
                (((scaled(*value) - floor) / peak) * self.config.bar_width as f64).round() as usize
            } else {
                0
            };
            let glyph = if *series == "SW" {
                self.config.software_glyph
            } else {
                self.config.hardware_glyph
            };
            let bar: String = std::iter::repeat(glyph).take(len).collect();
            chart.push_str(&format!("{:<12} {:<5} |{} {:.4e}\n", label, series, bar, value));
        }

        chart
    }

    pub fn to_csv(&self, records: &[ComparisonRecord]) -> String {
        let mut csv = String::new();
        csv.push_str("operation,hw_cycles,hw_latency_us,sw_latency_us,speedup,");
        csv.push_str("hw_throughput_ops_per_sec,sw_throughput_ops_per_sec,");
        csv.push_str("hw_efficiency_ops_per_joule,sw_efficiency_ops_per_joule,efficiency_ratio\n");

        for r in records {
            csv.push_str(&format!(
                "{},{},{:.6},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.4}\n",
                r.operation.name(),
                r.hw_cycles,
                r.hw_latency_us,
                r.sw_latency_us,
                r.speedup,
                r.hw_throughput_ops_per_sec,
                r.sw_throughput_ops_per_sec,
                r.hw_efficiency_ops_per_joule,
                r.sw_efficiency_ops_per_joule,
                r.efficiency_ratio(),
            ));
        }
        csv
    }

    pub fn to_json(&self, records: &[ComparisonRecord]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(records)
    }

    pub fn export<P: AsRef<Path>>(
        &self,
        records: &[ComparisonRecord],
        format: ExportFormat,
        path: P,
    ) -> Result<(), ExportError> {
        let content = match format {
            ExportFormat::Csv => self.to_csv(records),
            ExportFormat::Json => self.to_json(records)?,
        };
        std::fs::write(path.as_ref(), content)?;
        log::info!("Exported {} records to {}", records.len(), path.as_ref().display());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
