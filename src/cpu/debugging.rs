use std::ops::RangeInclusive;

use crate::cpu::memory::Memory;
use crate::cpu::state8080::State8080;

/// What the CPU looked like when it fetched an opcode. Logged at trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionInfo {
    pub opcode: u8,
    pub pc: u16,
    pub sp: u16,
    pub int_enable: bool,
}

impl InstructionInfo {
    pub fn capture(state: &State8080, memory: &Memory) -> InstructionInfo {
        InstructionInfo {
            opcode: memory.read(state.pc),
            pc: state.pc,
            sp: state.sp,
            int_enable: state.int_enable,
        }
    }
}

/// Hex dump, 16 bytes per line, each line prefixed with its address.
pub fn dump_memory(memory: &Memory, range: RangeInclusive<u16>) -> String {
    let start = *range.start() & !0xf;
    let end = *range.end();
    let mut mem_string = String::new();
    let mut addr = start;
    loop {
        if addr % 16 == 0 {
            if !mem_string.is_empty() {
                mem_string.push('\n');
            }
            mem_string.push_str(&format!("{:04x} ", addr));
        }
        mem_string.push_str(&format!(" {:02x}", memory.read(addr)));
        if addr >= end || addr == u16::MAX {
            break;
        }
        addr += 1;
    }
    mem_string
}
