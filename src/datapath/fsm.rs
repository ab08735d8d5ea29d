// src/datapath/fsm.rs
//! Control state paths of the hardware datapath
//!
//! The hardware side is a single FSM. Add and subtract share a six-state
//! path; the dot product serializes four partial-product states before
//! write-back. These paths are only enumerated here, never executed: their
//! length is the architectural cycle count used by the timing model.

use super::alu::OperationKind;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlState {
    Idle,
    LoadA,
    LoadB,
    Execute,
    Dot0,
    Dot1,
    Dot2,
    Dot3,
    WriteBack,
    Done,
}

const LANEWISE_PATH: [ControlState; 6] = [
    ControlState::Idle,
    ControlState::LoadA,
    ControlState::LoadB,
    ControlState::Execute,
    ControlState::WriteBack,
    ControlState::Done,
];

const DOT_PRODUCT_PATH: [ControlState; 9] = [
    ControlState::Idle,
    ControlState::LoadA,
    ControlState::LoadB,
    ControlState::Dot0,
    ControlState::Dot1,
    ControlState::Dot2,
    ControlState::Dot3,
    ControlState::WriteBack,
    ControlState::Done,
];

impl ControlState {
    pub fn name(&self) -> &'static str {
        match self {
            ControlState::Idle => "IDLE",
            ControlState::LoadA => "LOAD_A",
            ControlState::LoadB => "LOAD_B",
            ControlState::Execute => "EXEC",
            ControlState::Dot0 => "DOT0",
            ControlState::Dot1 => "DOT1",
            ControlState::Dot2 => "DOT2",
            ControlState::Dot3 => "DOT3",
            ControlState::WriteBack => "WRITE",
            ControlState::Done => "DONE",
        }
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// States traversed by one operation, one clock cycle each
pub fn state_path(op: OperationKind) -> &'static [ControlState] {
    match op {
        OperationKind::Add | OperationKind::Subtract => &LANEWISE_PATH,
        OperationKind::DotProduct => &DOT_PRODUCT_PATH,
    }
}

/// Cycle count implied by the state path
pub fn architectural_cycles(op: OperationKind) -> u32 {
    state_path(op).len() as u32
}

/// Path rendered as `IDLE -> LOAD_A -> ...`
pub fn describe_path(op: OperationKind) -> String {
    state_path(op)
        .iter()
        .map(ControlState::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architectural_cycles() {
        assert_eq!(architectural_cycles(OperationKind::Add), 6);
        assert_eq!(architectural_cycles(OperationKind::Subtract), 6);
        assert_eq!(architectural_cycles(OperationKind::DotProduct), 9);
    }

    #[test]
    fn test_paths_start_idle_end_done() {
        for op in OperationKind::ALL {
            let path = state_path(op);
            assert_eq!(path.first(), Some(&ControlState::Idle));
            assert_eq!(path.last(), Some(&ControlState::Done));
            assert_eq!(path[path.len() - 2], ControlState::WriteBack);
        }
    }

    #[test]
    fn test_dot_product_serializes_partial_products() {
        let dots = state_path(OperationKind::DotProduct)
            .iter()
            .filter(|s| matches!(s, ControlState::Dot0 | ControlState::Dot1 | ControlState::Dot2 | ControlState::Dot3))
            .count();
        assert_eq!(dots, 4);
        assert!(!state_path(OperationKind::DotProduct).contains(&ControlState::Execute));
    }

    #[test]
    fn test_describe_path() {
        assert_eq!(
            describe_path(OperationKind::Add),
            "IDLE -> LOAD_A -> LOAD_B -> EXEC -> WRITE -> DONE"
        );
    }
}
