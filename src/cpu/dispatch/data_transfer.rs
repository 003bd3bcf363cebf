use super::{Context, Flow};
use crate::cpu::state8080::RegisterPair;

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    match opcode {
        // MOV dst,src (0x76 is HLT and never lands here)
        0x40..=0x7f => {
            let val = cx.read_operand(opcode);
            cx.write_operand(opcode >> 3, val);
            Flow::Next(0)
        }
        // MVI
        0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => {
            let val = cx.imm8();
            cx.write_operand(opcode >> 3, val);
            Flow::Next(1)
        }
        // LXI
        0x01 | 0x11 | 0x21 | 0x31 => {
            let val = cx.imm16();
            cx.state.set_pair(RegisterPair::from_field(opcode >> 4), val);
            Flow::Next(2)
        }
        // STAX
        0x02 | 0x12 => {
            let addr = cx.state.get_pair(RegisterPair::from_field(opcode >> 4));
            cx.memory.write(addr, cx.state.a);
            Flow::Next(0)
        }
        // LDAX
        0x0a | 0x1a => {
            let addr = cx.state.get_pair(RegisterPair::from_field(opcode >> 4));
            cx.state.a = cx.memory.read(addr);
            Flow::Next(0)
        }
        // SHLD
        0x22 => {
            let addr = cx.imm16();
            cx.memory.write_word(addr, cx.state.get_hl());
            Flow::Next(2)
        }
        // LHLD
        0x2a => {
            let addr = cx.imm16();
            let val = cx.memory.read_word(addr);
            cx.state.set_hl(val);
            Flow::Next(2)
        }
        // STA
        0x32 => {
            let addr = cx.imm16();
            cx.memory.write(addr, cx.state.a);
            Flow::Next(2)
        }
        // LDA
        0x3a => {
            let addr = cx.imm16();
            cx.state.a = cx.memory.read(addr);
            Flow::Next(2)
        }
        // XCHG
        0xeb => {
            let de = cx.state.get_de();
            cx.state.set_de(cx.state.get_hl());
            cx.state.set_hl(de);
            Flow::Next(0)
        }
        _ => Flow::Unimplemented,
    }
}
