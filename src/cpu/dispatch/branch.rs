use super::{Context, Flow};
use crate::cpu::flags::Condition;
use crate::cpu::memory::{pop, push, Memory};
use crate::cpu::state8080::State8080;
use crate::error::CpuError;

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    let pc = cx.state.pc;
    match opcode {
        // JMP
        0xc3 => {
            let target = cx.imm16();
            jump(cx, target)
        }
        // Jcc
        0xc2 | 0xca | 0xd2 | 0xda | 0xe2 | 0xea | 0xf2 | 0xfa => {
            if taken(opcode, cx) {
                let target = cx.imm16();
                jump(cx, target)
            } else {
                Flow::Next(2)
            }
        }
        // CALL
        0xcd => {
            let target = cx.imm16();
            if cx.hooks.try_trap(target, cx.state, cx.memory) {
                return Flow::Next(2);
            }
            call(cx, target, pc.wrapping_add(3))
        }
        // Ccc
        0xc4 | 0xcc | 0xd4 | 0xdc | 0xe4 | 0xec | 0xf4 | 0xfc => {
            if taken(opcode, cx) {
                let target = cx.imm16();
                call(cx, target, pc.wrapping_add(3))
            } else {
                Flow::Next(2)
            }
        }
        // RET
        0xc9 => ret(cx),
        // Rcc
        0xc0 | 0xc8 | 0xd0 | 0xd8 | 0xe0 | 0xe8 | 0xf0 | 0xf8 => {
            if taken(opcode, cx) {
                ret(cx)
            } else {
                Flow::Next(0)
            }
        }
        // RST n
        0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => {
            call(cx, u16::from(opcode & 0x38), pc.wrapping_add(1))
        }
        // PCHL
        0xe9 => {
            let target = cx.state.get_hl();
            jump(cx, target)
        }
        _ => Flow::Unimplemented,
    }
}

fn taken(opcode: u8, cx: &Context) -> bool {
    cx.state.cc.test(Condition::from_field(opcode >> 3))
}

/// The dispatcher adds one after every instruction, so land one short.
fn jump(cx: &mut Context, target: u16) -> Flow {
    cx.state.pc = target.wrapping_sub(1);
    Flow::Next(0)
}

fn call(cx: &mut Context, target: u16, return_addr: u16) -> Flow {
    push(&mut cx.state.sp, cx.memory, return_addr);
    jump(cx, target)
}

fn ret(cx: &mut Context) -> Flow {
    let target = pop(&mut cx.state.sp, cx.memory);
    jump(cx, target)
}

/// Injects an interrupt as if the device had strobed `RST vector`.
///
/// Ignored while interrupts are disabled. Pushes the current PC (the next
/// instruction to run), jumps to `8 * vector`, disables further interrupts and
/// wakes a halted CPU.
pub fn interrupt(state: &mut State8080, memory: &mut Memory, vector: u8) -> Result<(), CpuError> {
    if vector > 7 {
        return Err(CpuError::InvalidInterrupt(vector));
    }
    if !state.int_enable {
        log::debug!("interrupt {} ignored, interrupts disabled", vector);
        return Ok(());
    }
    log::debug!("interrupt {} at pc {:#06x}", vector, state.pc);
    push(&mut state.sp, memory, state.pc);
    state.pc = 8 * u16::from(vector);
    state.int_enable = false;
    state.halted = false;
    Ok(())
}
