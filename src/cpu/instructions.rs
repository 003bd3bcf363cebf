//! ALU primitives. Each takes the operands by value, applies its flag rule to
//! `cc` and returns the result; storing the result is the caller's job.

use crate::cpu::flags::ConditionCodes;

pub fn add(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    add_carry(cc, a, val, false)
}

pub fn adc(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    let cy = cc.cy;
    add_carry(cc, a, val, cy)
}

fn add_carry(cc: &mut ConditionCodes, a: u8, val: u8, cy: bool) -> u8 {
    let result: u16 = u16::from(a) + u16::from(val) + u16::from(cy);
    cc.set_add_flags(result);
    result as u8
}

pub fn sub(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    sub_borrow(cc, a, val, false)
}

pub fn sbb(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    let cy = cc.cy;
    sub_borrow(cc, a, val, cy)
}

/// CMP is SUB with the result thrown away.
pub fn cmp(cc: &mut ConditionCodes, a: u8, val: u8) {
    sub_borrow(cc, a, val, false);
}

fn sub_borrow(cc: &mut ConditionCodes, a: u8, val: u8, borrow: bool) -> u8 {
    let result: u16 = u16::from(a)
        .wrapping_sub(u16::from(val))
        .wrapping_sub(u16::from(borrow));
    cc.set_sub_flags(result);
    result as u8
}

pub fn ana(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    let result = a & val;
    cc.set_logic_flags(result);
    result
}

pub fn xra(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    let result = a ^ val;
    cc.set_logic_flags(result);
    result
}

pub fn ora(cc: &mut ConditionCodes, a: u8, val: u8) -> u8 {
    let result = a | val;
    cc.set_logic_flags(result);
    result
}

pub fn inr(cc: &mut ConditionCodes, register: u8) -> u8 {
    let result = register.wrapping_add(1);
    cc.set_inc_dec_flags(result);
    result
}

pub fn dcr(cc: &mut ConditionCodes, register: u8) -> u8 {
    let result = register.wrapping_sub(1);
    cc.set_inc_dec_flags(result);
    result
}

pub fn rlc(cc: &mut ConditionCodes, a: u8) -> u8 {
    cc.cy = a & 0x80 != 0;
    a.rotate_left(1)
}

pub fn rrc(cc: &mut ConditionCodes, a: u8) -> u8 {
    cc.cy = a & 0x1 != 0;
    a.rotate_right(1)
}

/// Rotate left through carry.
pub fn ral(cc: &mut ConditionCodes, a: u8) -> u8 {
    let result = (a << 1) | u8::from(cc.cy);
    cc.cy = a & 0x80 != 0;
    result
}

/// Rotate right through carry.
pub fn rar(cc: &mut ConditionCodes, a: u8) -> u8 {
    let result = (a >> 1) | (u8::from(cc.cy) << 7);
    cc.cy = a & 0x1 != 0;
    result
}

pub fn dad(cc: &mut ConditionCodes, hl: u16, val: u16) -> u16 {
    let result = u32::from(hl) + u32::from(val);
    cc.set_dad_flags(result);
    result as u16
}
