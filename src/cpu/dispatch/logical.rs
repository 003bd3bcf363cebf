use super::{Context, Flow};
use crate::cpu::flags::ConditionCodes;
use crate::cpu::instructions;

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    match opcode {
        // ANA/XRA/ORA/CMP r
        0xa0..=0xbf => {
            let val = cx.read_operand(opcode);
            logic(opcode, cx, val);
            Flow::Next(0)
        }
        // ANI/XRI/ORI/CPI
        0xe6 | 0xee | 0xf6 | 0xfe => {
            let val = cx.imm8();
            logic(opcode, cx, val);
            Flow::Next(1)
        }
        0x07 => rotate(cx, instructions::rlc),
        0x0f => rotate(cx, instructions::rrc),
        0x17 => rotate(cx, instructions::ral),
        0x1f => rotate(cx, instructions::rar),
        // CMA
        0x2f => {
            cx.state.a = !cx.state.a;
            Flow::Next(0)
        }
        // STC
        0x37 => {
            cx.state.cc.cy = true;
            Flow::Next(0)
        }
        // CMC
        0x3f => {
            cx.state.cc.cy = !cx.state.cc.cy;
            Flow::Next(0)
        }
        _ => Flow::Unimplemented,
    }
}

/// Bits 3..4 pick AND, XOR, OR or compare.
fn logic(opcode: u8, cx: &mut Context, val: u8) {
    let a = cx.state.a;
    let cc = &mut cx.state.cc;
    match (opcode >> 3) & 0x3 {
        0 => cx.state.a = instructions::ana(cc, a, val),
        1 => cx.state.a = instructions::xra(cc, a, val),
        2 => cx.state.a = instructions::ora(cc, a, val),
        _ => instructions::cmp(cc, a, val),
    }
}

fn rotate(cx: &mut Context, op: fn(&mut ConditionCodes, u8) -> u8) -> Flow {
    let a = cx.state.a;
    cx.state.a = op(&mut cx.state.cc, a);
    Flow::Next(0)
}

#[cfg(test)]
mod tests {
    use crate::cpu::{step, Memory, State8080, StepResult};
    use proptest::prelude::*;

    fn exec(program: &[u8], state: &mut State8080, memory: &mut Memory) {
        memory.load(state.pc, program).unwrap();
        assert_eq!(step(state, memory), StepResult::Continue);
    }

    #[test]
    fn ana_clears_carries() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0xf0;
        state.b = 0x3c;
        state.cc.cy = true;
        state.cc.ac = true;
        exec(&[0xa0], &mut state, &mut memory);
        assert_eq!(state.a, 0x30);
        assert!(!state.cc.cy && !state.cc.ac && state.cc.p);
    }

    #[test]
    fn xra_a_zeroes() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x5a;
        exec(&[0xaf], &mut state, &mut memory);
        assert_eq!(state.a, 0);
        assert!(state.cc.z && state.cc.p && !state.cc.s);
    }

    #[test]
    fn ori_and_ani() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        exec(&[0xf6, 0x81], &mut state, &mut memory);
        assert_eq!(state.a, 0x81);
        assert!(state.cc.s && state.cc.p);
        exec(&[0xe6, 0x01], &mut state, &mut memory);
        assert_eq!(state.a, 0x01);
        exec(&[0xee, 0x01], &mut state, &mut memory);
        assert_eq!(state.a, 0x00);
        assert_eq!(state.pc, 6);
    }

    #[test]
    fn cmp_keeps_accumulator() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x02;
        state.set_hl(0x3000);
        memory.write(0x3000, 0x05);
        exec(&[0xbe], &mut state, &mut memory); // CMP M
        assert_eq!(state.a, 0x02);
        assert!(state.cc.cy && !state.cc.z);
        exec(&[0xfe, 0x02], &mut state, &mut memory); // CPI
        assert!(state.cc.z && !state.cc.cy);
    }

    #[test]
    fn rotate_opcodes() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x80;
        exec(&[0x07], &mut state, &mut memory); // RLC
        assert_eq!(state.a, 0x01);
        assert!(state.cc.cy);
        exec(&[0x1f], &mut state, &mut memory); // RAR
        assert_eq!(state.a, 0x80);
        assert!(state.cc.cy);
        exec(&[0x17], &mut state, &mut memory); // RAL
        assert_eq!(state.a, 0x01);
        assert!(state.cc.cy);
        exec(&[0x0f], &mut state, &mut memory); // RRC
        assert_eq!(state.a, 0x80);
        assert!(state.cc.cy);
    }

    #[test]
    fn cma_stc_cmc_touch_only_their_target() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x0f;
        state.cc.z = true;
        exec(&[0x2f], &mut state, &mut memory);
        assert_eq!(state.a, 0xf0);
        assert!(state.cc.z && !state.cc.cy);
        exec(&[0x37], &mut state, &mut memory);
        assert!(state.cc.cy && state.cc.z);
        exec(&[0x3f], &mut state, &mut memory);
        assert!(!state.cc.cy && state.cc.z);
        assert_eq!(state.a, 0xf0);
    }

    proptest! {
        #[test]
        fn cmp_and_sub_opcodes_agree(a in any::<u8>(), b in any::<u8>(), f in any::<u8>()) {
            let mut memory = Memory::new();
            let mut sub_state = State8080::new();
            sub_state.a = a;
            sub_state.b = b;
            sub_state.cc.set_f(f);
            let mut cmp_state = sub_state.clone();

            memory.write(0, 0x90); // SUB B
            step(&mut sub_state, &mut memory);
            memory.write(0, 0xb8); // CMP B
            step(&mut cmp_state, &mut memory);

            prop_assert_eq!(sub_state.cc, cmp_state.cc);
            prop_assert_eq!(cmp_state.a, a);
        }
    }
}
