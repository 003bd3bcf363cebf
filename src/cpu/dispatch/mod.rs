//! Fetch, decode and execute one instruction.
//!
//! Every opcode belongs to exactly one [`Family`]; each family lives in its own
//! module and reports how many operand bytes it consumed. The dispatcher then
//! moves PC past those bytes and always adds one more for the opcode itself.
//! Handlers that transfer control therefore store `target - 1` in PC.

mod arithmetic;
mod branch;
mod data_transfer;
mod io;
mod logical;
mod machine;
mod stack;

pub use branch::interrupt;

use crate::cpu::debugging::InstructionInfo;
use crate::cpu::hooks::Hooks;
use crate::cpu::memory::Memory;
use crate::cpu::state8080::{Operand, State8080};
use crate::error::CpuError;

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    /// HLT executed, or the CPU was already halted.
    Halted,
    /// No behaviour for this opcode; PC still points at it.
    Unimplemented(u8),
}

impl StepResult {
    /// `Ok(true)` to keep going, `Ok(false)` once halted.
    pub fn into_result(self) -> Result<bool, CpuError> {
        match self {
            StepResult::Continue => Ok(true),
            StepResult::Halted => Ok(false),
            StepResult::Unimplemented(opcode) => Err(CpuError::UnimplementedOpcode(opcode)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    DataTransfer,
    Arithmetic,
    Logical,
    Branch,
    Stack,
    Io,
    Machine,
}

/// Which family executes `opcode`. Total over all 256 values.
pub fn family(opcode: u8) -> Family {
    match opcode {
        0x76 => Family::Machine,
        0x40..=0x7f => Family::DataTransfer,
        0x80..=0x9f | 0xc6 | 0xce | 0xd6 | 0xde => Family::Arithmetic,
        0xa0..=0xbf | 0xe6 | 0xee | 0xf6 | 0xfe => Family::Logical,

        // NOP and its alternate encodings
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Family::Machine,
        0xcb | 0xd9 | 0xdd | 0xed | 0xfd => Family::Machine,
        0xf3 | 0xfb => Family::Machine,

        // LXI, STAX/LDAX, SHLD/LHLD, STA/LDA, MVI, XCHG
        0x01 | 0x11 | 0x21 | 0x31 => Family::DataTransfer,
        0x02 | 0x12 | 0x22 | 0x32 | 0x0a | 0x1a | 0x2a | 0x3a => Family::DataTransfer,
        0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => Family::DataTransfer,
        0xeb => Family::DataTransfer,

        // INX/DCX, INR/DCR, DAD, DAA
        0x03 | 0x13 | 0x23 | 0x33 | 0x0b | 0x1b | 0x2b | 0x3b => Family::Arithmetic,
        0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => Family::Arithmetic,
        0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => Family::Arithmetic,
        0x09 | 0x19 | 0x29 | 0x39 | 0x27 => Family::Arithmetic,

        // rotates, CMA, STC, CMC
        0x07 | 0x0f | 0x17 | 0x1f | 0x2f | 0x37 | 0x3f => Family::Logical,

        // PUSH/POP, XTHL, SPHL
        0xc1 | 0xd1 | 0xe1 | 0xf1 | 0xc5 | 0xd5 | 0xe5 | 0xf5 => Family::Stack,
        0xe3 | 0xf9 => Family::Stack,

        0xd3 | 0xdb => Family::Io,

        // Jcc/JMP, Ccc/CALL, Rcc/RET, RST, PCHL
        0xc0..=0xff => Family::Branch,
    }
}

/// Borrowed machine for the duration of one instruction.
pub(crate) struct Context<'a, 'h> {
    pub state: &'a mut State8080,
    pub memory: &'a mut Memory,
    pub hooks: &'a mut Hooks<'h>,
}

impl Context<'_, '_> {
    /// Byte following the opcode.
    pub fn imm8(&self) -> u8 {
        self.memory.read(self.state.pc.wrapping_add(1))
    }

    /// Little endian word following the opcode.
    pub fn imm16(&self) -> u16 {
        self.memory.read_word(self.state.pc.wrapping_add(1))
    }

    pub fn read_operand(&self, field: u8) -> u8 {
        self.state.read_operand(Operand::from_field(field), self.memory)
    }

    pub fn write_operand(&mut self, field: u8, val: u8) {
        self.state
            .write_operand(Operand::from_field(field), self.memory, val);
    }
}

/// How a family handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Operand bytes consumed (0, 1 or 2).
    Next(u16),
    Halt,
    Unimplemented,
}

/// Executes one instruction without any host hooks.
pub fn step(state: &mut State8080, memory: &mut Memory) -> StepResult {
    step_with_hooks(state, memory, &mut Hooks::new())
}

pub fn step_with_hooks(state: &mut State8080, memory: &mut Memory, hooks: &mut Hooks) -> StepResult {
    if state.halted {
        return StepResult::Halted;
    }

    let info = InstructionInfo::capture(state, memory);
    log::trace!("{:x?}", info);
    let opcode = info.opcode;

    let mut cx = Context {
        state,
        memory,
        hooks,
    };
    let flow = match family(opcode) {
        Family::DataTransfer => data_transfer::execute(opcode, &mut cx),
        Family::Arithmetic => arithmetic::execute(opcode, &mut cx),
        Family::Logical => logical::execute(opcode, &mut cx),
        Family::Branch => branch::execute(opcode, &mut cx),
        Family::Stack => stack::execute(opcode, &mut cx),
        Family::Io => io::execute(opcode, &mut cx),
        Family::Machine => machine::execute(opcode, &mut cx),
    };

    match flow {
        Flow::Next(operand_bytes) => {
            cx.state.pc = cx.state.pc.wrapping_add(operand_bytes).wrapping_add(1);
            StepResult::Continue
        }
        Flow::Halt => {
            cx.state.pc = cx.state.pc.wrapping_add(1);
            StepResult::Halted
        }
        Flow::Unimplemented => {
            log::warn!("unimplemented opcode {:#04x} at {:#06x}", opcode, info.pc);
            StepResult::Unimplemented(opcode)
        }
    }
}
