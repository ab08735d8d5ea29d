// src/datapath/resources.rs
//! FPGA resource utilization of a hardware build
//!
//! Reported next to the timing figures; nothing in the latency model reads it.

use crate::config::ConfigError;
use serde::Serialize;

/// Device of the reference build
pub const REFERENCE_DEVICE: &str = "Cyclone IV E EP4CE6E22C8";

/// Used vs available count of one device resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceUsage {
    used: u32,
    available: u32,
}

impl ResourceUsage {
    pub fn new(resource: &str, used: u32, available: u32) -> Result<Self, ConfigError> {
        if available == 0 {
            return Err(ConfigError::NonPositive {
                field: format!("resources.{}_available", resource),
                value: 0.0,
            });
        }
        if used > available {
            return Err(ConfigError::ResourceExceedsDevice {
                resource: resource.to_string(),
                used,
                available,
            });
        }
        Ok(Self { used, available })
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn utilization_percent(&self) -> f64 {
        f64::from(self.used) / f64::from(self.available) * 100.0
    }

    /// `"< 1%"` for non-zero usage below one percent, one decimal otherwise
    pub fn utilization_label(&self) -> String {
        let percent = self.utilization_percent();
        if self.used > 0 && percent < 1.0 {
            "< 1%".to_string()
        } else {
            format!("{:.1}%", percent)
        }
    }
}

/// Post-fit resource report of one build
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FpgaResources {
    device: String,
    logic_elements: ResourceUsage,
    registers: ResourceUsage,
    pins: u32,
    labs: u32,
    global_clocks: u32,
}

impl FpgaResources {
    pub fn new(
        device: impl Into<String>,
        logic_elements: ResourceUsage,
        registers: ResourceUsage,
        pins: u32,
        labs: u32,
        global_clocks: u32,
    ) -> Self {
        Self {
            device: device.into(),
            logic_elements,
            registers,
            pins,
            labs,
            global_clocks,
        }
    }

    /// Fit report of the reference build
    pub fn reference() -> Self {
        Self {
            device: REFERENCE_DEVICE.to_string(),
            logic_elements: ResourceUsage { used: 10, available: 6_272 },
            registers: ResourceUsage { used: 10, available: 6_684 },
            pins: 6,
            labs: 1,
            global_clocks: 1,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn logic_elements(&self) -> ResourceUsage {
        self.logic_elements
    }

    pub fn registers(&self) -> ResourceUsage {
        self.registers
    }

    pub fn pins(&self) -> u32 {
        self.pins
    }

    pub fn labs(&self) -> u32 {
        self.labs
    }

    pub fn global_clocks(&self) -> u32 {
        self.global_clocks
    }
}
