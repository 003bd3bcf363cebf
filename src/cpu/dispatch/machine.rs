use super::{Context, Flow};

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    match opcode {
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Flow::Next(0),
        0xcb | 0xd9 | 0xdd | 0xed | 0xfd => Flow::Next(0),
        // HLT
        0x76 => {
            cx.state.halted = true;
            Flow::Halt
        }
        // DI
        0xf3 => {
            cx.state.int_enable = false;
            Flow::Next(0)
        }
        // EI
        0xfb => {
            cx.state.int_enable = true;
            Flow::Next(0)
        }
        _ => Flow::Unimplemented,
    }
}
