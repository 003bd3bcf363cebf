pub mod debugging;
pub mod dispatch;
pub mod flags;
pub mod hooks;
pub mod instructions;
pub mod memory;
pub mod state8080;

pub use crate::cpu::debugging::{dump_memory, InstructionInfo};
pub use crate::cpu::dispatch::{family, interrupt, step, step_with_hooks, Family, StepResult};
pub use crate::cpu::flags::{Condition, ConditionCodes};
pub use crate::cpu::hooks::{DiagnosticTrap, Hooks, Ports, TrapFormat};
pub use crate::cpu::memory::{Memory, MEMORY_SIZE};
pub use crate::cpu::state8080::{Operand, Register, RegisterPair, State8080};
