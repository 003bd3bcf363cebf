use super::{Context, Flow};
use crate::cpu::memory::{pop, push};
use crate::cpu::state8080::RegisterPair;

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    match opcode {
        // PUSH B/D/H/PSW
        0xc5 | 0xd5 | 0xe5 | 0xf5 => {
            let val = match opcode {
                0xf5 => cx.state.get_psw(),
                _ => cx.state.get_pair(RegisterPair::from_field(opcode >> 4)),
            };
            push(&mut cx.state.sp, cx.memory, val);
            Flow::Next(0)
        }
        // POP B/D/H/PSW
        0xc1 | 0xd1 | 0xe1 | 0xf1 => {
            let val = pop(&mut cx.state.sp, cx.memory);
            match opcode {
                0xf1 => cx.state.set_psw(val),
                _ => cx.state.set_pair(RegisterPair::from_field(opcode >> 4), val),
            }
            Flow::Next(0)
        }
        // XTHL
        0xe3 => {
            let sp = cx.state.sp;
            let top = cx.memory.read_word(sp);
            cx.memory.write_word(sp, cx.state.get_hl());
            cx.state.set_hl(top);
            Flow::Next(0)
        }
        // SPHL
        0xf9 => {
            cx.state.sp = cx.state.get_hl();
            Flow::Next(0)
        }
        _ => Flow::Unimplemented,
    }
}
