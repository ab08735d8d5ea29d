// src/analysis/report.rs
//! Plain-text comparison report
//!
//! Formatting only: every number printed here comes from a
//! [`ComparisonRecord`] or a profile, nothing is recomputed.

use super::comparison::ComparisonSummary;
use super::metrics::{ComparisonRecord, PowerProfile};
use crate::datapath::{fsm, HardwareTimingModel};
use serde::{Deserialize, Serialize};

/// Report layout and labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub title: String,
    pub hardware_label: String,
    pub software_label: String,
    pub rule_width: usize,
    pub column_width: usize,
    pub show_state_paths: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "HARDWARE vs SOFTWARE: 4-LANE VECTOR DATAPATH".to_string(),
            hardware_label: "FPGA".to_string(),
            software_label: "CPU".to_string(),
            rule_width: 80,
            column_width: 16,
            show_state_paths: true,
        }
    }
}

pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        timing: &HardwareTimingModel,
        power: &PowerProfile,
        records: &[ComparisonRecord],
    ) -> String {
        let mut out = String::new();
        let rule = "=".repeat(self.config.rule_width);
        let thin = "-".repeat(self.config.rule_width);
        let w = self.config.column_width;
        let hw = &self.config.hardware_label;
        let sw = &self.config.software_label;

        out.push_str(&format!("{}\n{}\n{}\n\n", rule, self.config.title, rule));

        let profile = timing.profile();
        out.push_str(&format!("1. CONFIGURATION\n{}\n", thin));
        match profile.resources() {
            Some(resources) => out.push_str(&format!("{} ({}):\n", hw, resources.device())),
            None => out.push_str(&format!("{}:\n", hw)),
        }
        out.push_str(&format!("  Operating clock: {:.2} MHz\n", profile.clock_frequency_mhz()));
        if let (Some(fmax), Some(headroom)) = (profile.fmax_mhz(), profile.timing_headroom()) {
            out.push_str(&format!("  Fmax: {:.2} MHz ({:.2}x headroom)\n", fmax, headroom));
        }
        out.push_str(&format!("  Clock period: {:.2} ns\n", timing.clock_period_ns()));
        if let Some(resources) = profile.resources() {
            for (name, usage) in [
                ("Logic elements", resources.logic_elements()),
                ("Registers", resources.registers()),
            ] {
                out.push_str(&format!(
                    "  {}: {} / {} ({})\n",
                    name,
                    group_thousands(usage.used()),
                    group_thousands(usage.available()),
                    usage.utilization_label()
                ));
            }
            out.push_str(&format!(
                "  Pins: {}, LABs: {}, Global clocks: {}\n",
                resources.pins(),
                resources.labs(),
                resources.global_clocks()
            ));
        }
        out.push_str(&format!("  Power: {} mW\n", power.hardware_milliwatts()));
        out.push_str(&format!("{}:\n", sw));
        out.push_str(&format!("  Power: {} W\n\n", power.software_watts()));

        if self.config.show_state_paths {
            for record in records {
                out.push_str(&format!(
                    "  {:<12} {}\n",
                    record.operation.label(),
                    fsm::describe_path(record.operation)
                ));
            }
            out.push('\n');
        }

        out.push_str(&format!("2. LATENCY PER OPERATION\n{}\n", thin));
        out.push_str(&format!(
            "{:<w$} {:<w$} {:<w$} {:<w$} {:<w$}\n",
            "Operation",
            format!("{} cycles", hw),
            format!("{} (ns)", hw),
            format!("{} (us)", hw),
            format!("{} (us)", sw),
        ));
        for r in records {
            out.push_str(&format!(
                "{:<w$} {:<w$} {:<w$.2} {:<w$.3} {:<w$.3}\n",
                r.operation.label(),
                r.hw_cycles,
                r.hw_latency_ns(),
                r.hw_latency_us,
                r.sw_latency_us,
            ));
        }
        out.push('\n');

        out.push_str(&format!("3. SPEEDUP\n{}\n", thin));
        for r in records {
            out.push_str(&format!(
                "{:<w$} {:<w$.2} {} is {:.1}x faster than {}\n",
                r.operation.label(),
                r.speedup,
                hw,
                r.speedup,
                sw
            ));
        }
        out.push('\n');

        out.push_str(&format!("4. THROUGHPUT\n{}\n", thin));
        out.push_str(&format!(
            "{:<w$} {:<w$} {:<w$} {:<w$}\n",
            "Operation",
            format!("{} (Mops/s)", hw),
            format!("{} (Mops/s)", sw),
            "Gain"
        ));
        for r in records {
            out.push_str(&format!(
                "{:<w$} {:<w$.2} {:<w$.2} {:.2}x\n",
                r.operation.label(),
                r.hw_throughput_ops_per_sec / 1e6,
                r.sw_throughput_ops_per_sec / 1e6,
                r.throughput_ratio()
            ));
        }
        out.push('\n');

        out.push_str(&format!("5. ENERGY EFFICIENCY\n{}\n", thin));
        out.push_str(&format!(
            "{:<w$} {:<w$} {:<w$} {:<w$}\n",
            "Operation",
            format!("{} (Gops/J)", hw),
            format!("{} (Kops/J)", sw),
            "Gain"
        ));
        for r in records {
            out.push_str(&format!(
                "{:<w$} {:<w$.2} {:<w$.2} {:.0}x\n",
                r.operation.label(),
                r.hw_efficiency_ops_per_joule / 1e9,
                r.sw_efficiency_ops_per_joule / 1e3,
                r.efficiency_ratio()
            ));
        }
        out.push('\n');

        out.push_str(&format!("6. SUMMARY\n{}\n", thin));
        match ComparisonSummary::from_records(records) {
            Some(summary) => {
                out.push_str(&format!("  Mean speedup: {:.2}x\n", summary.mean_speedup));
                out.push_str(&format!("  Peak throughput gain: {:.1}x\n", summary.max_throughput_ratio));
                out.push_str(&format!("  Peak energy-efficiency gain: {:.0}x\n", summary.max_efficiency_ratio));
            }
            None => out.push_str("  No operations compared\n"),
        }
        out.push_str(&format!("{}\n", rule));

        out
    }
}

/// `6272` -> `"6,272"`
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::comparison::compare;
    use crate::datapath::{HardwareProfile, OperationKind};
    use crate::software::SoftwareMeasurement;

    #[test]
    fn test_report_contains_sections_and_values() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let power = PowerProfile::reference();
        let measurements = vec![SoftwareMeasurement::recorded(OperationKind::Add, 2.365, 1_000_000).unwrap()];
        let records = compare(&timing, &measurements, &power).unwrap();

        let report = ReportGenerator::new(ReportConfig::default()).generate(&timing, &power, &records);

        for section in ["1. CONFIGURATION", "2. LATENCY", "3. SPEEDUP", "4. THROUGHPUT", "5. ENERGY", "6. SUMMARY"] {
            assert!(report.contains(section), "missing section {}", section);
        }
        assert!(report.contains("250.00 MHz"));
        assert!(report.contains("964.32 MHz"));
        assert!(report.contains("4.00 ns"));
        assert!(report.contains("98.54"));
        assert!(report.contains("IDLE -> LOAD_A"));
    }

    #[test]
    fn test_report_resource_utilization() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let report = ReportGenerator::new(ReportConfig::default()).generate(&timing, &PowerProfile::reference(), &[]);

        assert!(report.contains("FPGA (Cyclone IV E EP4CE6E22C8):"));
        assert!(report.contains("  Logic elements: 10 / 6,272 (< 1%)"));
        assert!(report.contains("  Registers: 10 / 6,684 (< 1%)"));
        assert!(report.contains("  Pins: 6, LABs: 1, Global clocks: 1"));

        let bare = HardwareTimingModel::new(HardwareProfile::architectural(250.0).unwrap());
        let report = ReportGenerator::new(ReportConfig::default()).generate(&bare, &PowerProfile::reference(), &[]);
        assert!(report.contains("FPGA:\n"));
        assert!(!report.contains("Logic elements"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(6), "6");
        assert_eq!(group_thousands(6_272), "6,272");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_report_labels_configurable() {
        let timing = HardwareTimingModel::new(HardwareProfile::reference().unwrap());
        let config = ReportConfig {
            hardware_label: "Board".to_string(),
            show_state_paths: false,
            ..ReportConfig::default()
        };
        let report = ReportGenerator::new(config).generate(&timing, &PowerProfile::reference(), &[]);
        assert!(report.contains("Board (Cyclone IV E EP4CE6E22C8):"));
        assert!(report.contains("No operations compared"));
        assert!(!report.contains("IDLE"));
    }
}
