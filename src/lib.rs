//! Intel 8080 instruction interpreter.
//!
//! The host owns a [`State8080`] and a [`Memory`] and drives the CPU one
//! instruction at a time with [`step`], injecting interrupts between steps
//! with [`interrupt`]. Loading images, patching them and deciding when to stop
//! are up to the host; see `src/main.rs` for a runner.

pub mod cpu;
pub mod error;

pub use crate::cpu::{
    dump_memory, interrupt, step, step_with_hooks, Condition, ConditionCodes, DiagnosticTrap,
    Hooks, InstructionInfo, Memory, Operand, Ports, Register, RegisterPair, State8080,
    StepResult, TrapFormat,
};
pub use crate::error::CpuError;
