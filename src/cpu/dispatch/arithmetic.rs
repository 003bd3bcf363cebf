use super::{Context, Flow};
use crate::cpu::instructions;
use crate::cpu::state8080::RegisterPair;

pub(super) fn execute(opcode: u8, cx: &mut Context) -> Flow {
    match opcode {
        // ADD/ADC/SUB/SBB r
        0x80..=0x9f => {
            let val = cx.read_operand(opcode);
            accumulate(opcode, cx, val);
            Flow::Next(0)
        }
        // ADI/ACI/SUI/SBI
        0xc6 | 0xce | 0xd6 | 0xde => {
            let val = cx.imm8();
            accumulate(opcode, cx, val);
            Flow::Next(1)
        }
        // INR
        0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => {
            let val = cx.read_operand(opcode >> 3);
            let result = instructions::inr(&mut cx.state.cc, val);
            cx.write_operand(opcode >> 3, result);
            Flow::Next(0)
        }
        // DCR
        0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => {
            let val = cx.read_operand(opcode >> 3);
            let result = instructions::dcr(&mut cx.state.cc, val);
            cx.write_operand(opcode >> 3, result);
            Flow::Next(0)
        }
        // INX
        0x03 | 0x13 | 0x23 | 0x33 => {
            let pair = RegisterPair::from_field(opcode >> 4);
            cx.state.set_pair(pair, cx.state.get_pair(pair).wrapping_add(1));
            Flow::Next(0)
        }
        // DCX
        0x0b | 0x1b | 0x2b | 0x3b => {
            let pair = RegisterPair::from_field(opcode >> 4);
            cx.state.set_pair(pair, cx.state.get_pair(pair).wrapping_sub(1));
            Flow::Next(0)
        }
        // DAD
        0x09 | 0x19 | 0x29 | 0x39 => {
            let val = cx.state.get_pair(RegisterPair::from_field(opcode >> 4));
            let hl = cx.state.get_hl();
            let result = instructions::dad(&mut cx.state.cc, hl, val);
            cx.state.set_hl(result);
            Flow::Next(0)
        }
        // DAA is a no-op; AC is never computed
        0x27 => Flow::Next(0),
        _ => Flow::Unimplemented,
    }
}

/// Bits 3..4 pick ADD, ADC, SUB or SBB; the result lands in A.
fn accumulate(opcode: u8, cx: &mut Context, val: u8) {
    let a = cx.state.a;
    let cc = &mut cx.state.cc;
    cx.state.a = match (opcode >> 3) & 0x3 {
        0 => instructions::add(cc, a, val),
        1 => instructions::adc(cc, a, val),
        2 => instructions::sub(cc, a, val),
        _ => instructions::sbb(cc, a, val),
    };
}

#[cfg(test)]
mod tests {
    use crate::cpu::{step, Memory, State8080, StepResult};

    fn exec(program: &[u8], state: &mut State8080, memory: &mut Memory) {
        memory.load(state.pc, program).unwrap();
        assert_eq!(step(state, memory), StepResult::Continue);
    }

    #[test]
    fn add_register_and_memory() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0xf0;
        state.c = 0x20;
        exec(&[0x81], &mut state, &mut memory); // ADD C
        assert_eq!(state.a, 0x10);
        assert!(state.cc.cy);

        state.set_hl(0x3000);
        memory.write(0x3000, 0x01);
        exec(&[0x8e], &mut state, &mut memory); // ADC M
        assert_eq!(state.a, 0x12);
        assert!(!state.cc.cy);
    }

    #[test]
    fn add_a_doubles() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x41;
        exec(&[0x87], &mut state, &mut memory);
        assert_eq!(state.a, 0x82);
        assert!(state.cc.s && !state.cc.cy);
    }

    #[test]
    fn sub_a_clears() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x3e;
        state.cc.cy = true;
        exec(&[0x97], &mut state, &mut memory);
        assert_eq!(state.a, 0);
        assert!(state.cc.z && state.cc.p && !state.cc.cy);
    }

    #[test]
    fn immediates_consume_one_byte() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        exec(&[0xc6, 0x10], &mut state, &mut memory); // ADI
        exec(&[0xd6, 0x20], &mut state, &mut memory); // SUI
        assert_eq!(state.a, 0xf0);
        assert!(state.cc.cy);
        exec(&[0xce, 0x0f], &mut state, &mut memory); // ACI with carry in
        assert_eq!(state.a, 0x00);
        assert!(state.cc.cy);
        exec(&[0xde, 0x00], &mut state, &mut memory); // SBI with borrow in
        assert_eq!(state.a, 0xff);
        assert!(state.cc.cy);
        assert_eq!(state.pc, 8);
    }

    #[test]
    fn inr_dcr_memory_keep_carry() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.set_hl(0x2000);
        memory.write(0x2000, 0xff);
        state.cc.cy = true;
        exec(&[0x34], &mut state, &mut memory); // INR M
        assert_eq!(memory.read(0x2000), 0x00);
        assert!(state.cc.z && state.cc.cy);
        exec(&[0x35], &mut state, &mut memory); // DCR M
        assert_eq!(memory.read(0x2000), 0xff);
        assert!(state.cc.s && !state.cc.z && state.cc.cy);
    }

    #[test]
    fn inx_dcx_wrap_without_flags() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.set_bc(0xffff);
        state.sp = 0x0000;
        exec(&[0x03], &mut state, &mut memory); // INX B
        exec(&[0x3b], &mut state, &mut memory); // DCX SP
        assert_eq!(state.get_bc(), 0x0000);
        assert_eq!(state.sp, 0xffff);
        assert!(!state.cc.z);
    }

    #[test]
    fn dad_pairs() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.set_hl(0x8000);
        state.set_de(0x8001);
        exec(&[0x19], &mut state, &mut memory); // DAD D
        assert_eq!(state.get_hl(), 0x0001);
        assert!(state.cc.cy);

        state.sp = 0x00ff;
        exec(&[0x39], &mut state, &mut memory); // DAD SP
        assert_eq!(state.get_hl(), 0x0100);
        assert!(!state.cc.cy);

        exec(&[0x29], &mut state, &mut memory); // DAD H
        assert_eq!(state.get_hl(), 0x0200);
    }

    #[test]
    fn daa_changes_nothing() {
        let mut memory = Memory::new();
        let mut state = State8080::new();
        state.a = 0x9b;
        state.cc.cy = true;
        let before = state.clone();
        exec(&[0x27], &mut state, &mut memory);
        assert_eq!(state.a, before.a);
        assert_eq!(state.cc, before.cc);
        assert_eq!(state.pc, 1);
    }
}
