// src/datapath/timing.rs
//! Analytical hardware timing model
//!
//! Latency is cycles * clock period. Nothing here touches the ALU and
//! nothing varies run to run.

use super::alu::OperationKind;
use super::fsm;
use super::resources::FpgaResources;
use crate::config::ConfigError;
use log::debug;
use std::collections::HashMap;

/// Operating clock of the reference FPGA build (I/O constrained)
pub const REFERENCE_CLOCK_MHZ: f64 = 250.0;

/// Maximum clock reported by timing analysis for the reference build
pub const REFERENCE_FMAX_MHZ: f64 = 964.32;

/// One physical configuration: clock constraint plus per-operation cycle counts
#[derive(Clone, Debug, PartialEq)]
pub struct HardwareProfile {
    clock_frequency_mhz: f64,
    cycles: [u32; 3],
    fmax_mhz: Option<f64>,
    resources: Option<FpgaResources>,
}

impl HardwareProfile {
    /// Build a profile from a cycle table that must cover every operation
    pub fn new(
        clock_frequency_mhz: f64,
        cycles_per_operation: &HashMap<OperationKind, u32>,
    ) -> Result<Self, ConfigError> {
        check_positive("clock_frequency_mhz", clock_frequency_mhz)?;

        let mut cycles = [0u32; 3];
        for op in OperationKind::ALL {
            let count = *cycles_per_operation
                .get(&op)
                .ok_or(ConfigError::MissingOperation(op))?;
            if count == 0 {
                return Err(ConfigError::NonPositive {
                    field: format!("cycles.{}", op.name()),
                    value: 0.0,
                });
            }
            cycles[op.index()] = count;
        }

        debug!("Hardware profile: {} MHz, cycles {:?}", clock_frequency_mhz, cycles);

        Ok(Self {
            clock_frequency_mhz,
            cycles,
            fmax_mhz: None,
            resources: None,
        })
    }

    /// Attach the timing-analysis maximum; the operating clock may not exceed it
    pub fn with_fmax(mut self, fmax_mhz: f64) -> Result<Self, ConfigError> {
        check_positive("fmax_mhz", fmax_mhz)?;
        if self.clock_frequency_mhz > fmax_mhz {
            return Err(ConfigError::ClockAboveFmax {
                clock_mhz: self.clock_frequency_mhz,
                fmax_mhz,
            });
        }
        self.fmax_mhz = Some(fmax_mhz);
        Ok(self)
    }

    pub fn with_resources(mut self, resources: FpgaResources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Same cycle table at a different clock
    pub fn at_clock(&self, clock_frequency_mhz: f64) -> Result<Self, ConfigError> {
        check_positive("clock_frequency_mhz", clock_frequency_mhz)?;
        if let Some(fmax) = self.fmax_mhz {
            if clock_frequency_mhz > fmax {
                return Err(ConfigError::ClockAboveFmax {
                    clock_mhz: clock_frequency_mhz,
                    fmax_mhz: fmax,
                });
            }
        }
        Ok(Self {
            clock_frequency_mhz,
            ..self.clone()
        })
    }

    /// Cycle counts taken from the FSM state paths
    pub fn architectural(clock_frequency_mhz: f64) -> Result<Self, ConfigError> {
        let cycles = OperationKind::ALL
            .iter()
            .map(|&op| (op, fsm::architectural_cycles(op)))
            .collect::<HashMap<_, _>>();
        Self::new(clock_frequency_mhz, &cycles)
    }

    /// The reference build: 250 MHz operating clock, 964.32 MHz fmax
    pub fn reference() -> Result<Self, ConfigError> {
        Ok(Self::architectural(REFERENCE_CLOCK_MHZ)?
            .with_fmax(REFERENCE_FMAX_MHZ)?
            .with_resources(FpgaResources::reference()))
    }

    pub fn clock_frequency_mhz(&self) -> f64 {
        self.clock_frequency_mhz
    }

    pub fn fmax_mhz(&self) -> Option<f64> {
        self.fmax_mhz
    }

    pub fn cycles(&self, op: OperationKind) -> u32 {
        self.cycles[op.index()]
    }

    pub fn resources(&self) -> Option<&FpgaResources> {
        self.resources.as_ref()
    }

    /// fmax / operating clock, when fmax is known
    pub fn timing_headroom(&self) -> Option<f64> {
        self.fmax_mhz.map(|fmax| fmax / self.clock_frequency_mhz)
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field: field.to_string(),
            value,
        })
    }
}

/// Cycle-count to wall-time translation for one profile
#[derive(Clone, Debug, PartialEq)]
pub struct HardwareTimingModel {
    profile: HardwareProfile,
}

impl HardwareTimingModel {
    pub fn new(profile: HardwareProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &HardwareProfile {
        &self.profile
    }

    pub fn clock_period_ns(&self) -> f64 {
        1000.0 / self.profile.clock_frequency_mhz
    }

    pub fn cycles(&self, op: OperationKind) -> u32 {
        self.profile.cycles(op)
    }

    pub fn latency_ns(&self, op: OperationKind) -> f64 {
        f64::from(self.cycles(op)) * self.clock_period_ns()
    }

    pub fn latency_us(&self, op: OperationKind) -> f64 {
        self.latency_ns(op) / 1000.0
    }
}
