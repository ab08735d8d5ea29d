// src/analysis/mod.rs
//! Hardware vs software comparison
//!
//! Metrics engine, headline summary and clock sweep, plus the report and
//! chart collaborators that only format what the engine produces.

pub mod metrics;
pub mod comparison;
pub mod sweep;
pub mod report;
pub mod visualization;

// Re-export key analysis types
pub use metrics::{
    speedup, throughput, energy_per_operation_joules, efficiency, efficiency_ratio,
    ComparisonRecord, PowerProfile,
};
pub use comparison::{compare, ComparisonSummary};
pub use sweep::{clock_sweep, default_frequencies, SweepPoint};
pub use report::{ReportConfig, ReportGenerator};
pub use visualization::{ChartConfig, ChartMetric, ChartRenderer, ExportError, ExportFormat};
