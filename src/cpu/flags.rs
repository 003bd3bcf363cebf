/** aka the flags register */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionCodes {
    /** bit 7; Sign Flag */
    pub s: bool,
    /** Bit 6; zero flag */
    pub z: bool,
    /** Bit 4; Auxiliary Carry Flag, stored but never computed */
    pub ac: bool,
    /** Bit 2; Parity Flag */
    pub p: bool,
    /** Bit 0; Carry Flag */
    pub cy: bool,
}

const SIGN: u8 = 1 << 7;
const ZERO: u8 = 1 << 6;
const AUX_CARRY: u8 = 1 << 4;
const PARITY: u8 = 1 << 2;
/** bit 1 always reads as 1, bits 3 and 5 as 0 */
const ALWAYS_ONE: u8 = 1 << 1;
const CARRY: u8 = 1;

pub fn parity(val: u8) -> bool {
    val.count_ones() % 2 == 0
}

impl ConditionCodes {
    /// Zero, sign and parity of the low byte. Shared by every family that
    /// touches flags except the rotates.
    pub fn set_zsp(&mut self, val: u8) {
        self.z = val == 0;
        self.s = val & 0x80 != 0;
        self.p = parity(val);
    }

    /// ADD/ADC/ADI/ACI. `result` is the unsigned 9-bit sum.
    pub fn set_add_flags(&mut self, result: u16) {
        self.set_zsp((result & 0xff) as u8);
        self.cy = result > 0xff;
    }

    /// SUB/SBB/SUI/SBI/CMP/CPI. `result` is the 16-bit wrapping difference,
    /// which lands above 0xff exactly when the subtrahend exceeded the minuend.
    pub fn set_sub_flags(&mut self, result: u16) {
        self.set_zsp((result & 0xff) as u8);
        self.cy = result > 0xff;
    }

    /// ANA/ORA/XRA and their immediates.
    pub fn set_logic_flags(&mut self, val: u8) {
        self.set_zsp(val);
        self.cy = false;
        self.ac = false;
    }

    /// INR/DCR leave CY and AC alone.
    pub fn set_inc_dec_flags(&mut self, val: u8) {
        self.set_zsp(val);
    }

    /// DAD only reports the carry out of bit 15.
    pub fn set_dad_flags(&mut self, result: u32) {
        self.cy = result > 0xffff;
    }

    /// Packs the flags the way PUSH PSW stores them.
    pub fn get_f(&self) -> u8 {
        let mut f = ALWAYS_ONE;
        if self.s {
            f |= SIGN;
        }
        if self.z {
            f |= ZERO;
        }
        if self.ac {
            f |= AUX_CARRY;
        }
        if self.p {
            f |= PARITY;
        }
        if self.cy {
            f |= CARRY;
        }
        f
    }

    /// Unpacks a status word popped by POP PSW. Padding bits are ignored.
    pub fn set_f(&mut self, val: u8) {
        self.s = val & SIGN != 0;
        self.z = val & ZERO != 0;
        self.ac = val & AUX_CARRY != 0;
        self.p = val & PARITY != 0;
        self.cy = val & CARRY != 0;
    }

    pub fn test(&self, condition: Condition) -> bool {
        match condition {
            Condition::NotZero => !self.z,
            Condition::Zero => self.z,
            Condition::NoCarry => !self.cy,
            Condition::Carry => self.cy,
            Condition::ParityOdd => !self.p,
            Condition::ParityEven => self.p,
            Condition::Plus => !self.s,
            Condition::Minus => self.s,
        }
    }
}

/// Branch condition encoded in bits 3..5 of Jcc/Ccc/Rcc opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub fn from_field(field: u8) -> Condition {
        match field & 0x7 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_word_layout() {
        let cc = ConditionCodes {
            s: true,
            z: false,
            ac: true,
            p: false,
            cy: true,
        };
        assert_eq!(cc.get_f(), 0b1001_0011);
        assert_eq!(ConditionCodes::default().get_f(), 0b0000_0010);
    }

    #[test]
    fn set_f_ignores_padding() {
        let mut cc = ConditionCodes::default();
        cc.set_f(0b0010_1010);
        assert_eq!(cc, ConditionCodes::default());

        cc.set_f(0xff);
        assert!(cc.s && cc.z && cc.ac && cc.p && cc.cy);
        assert_eq!(cc.get_f(), 0b1101_0111);
    }

    #[test]
    fn parity_is_even_set_bits() {
        assert!(parity(0x00));
        assert!(parity(0x03));
        assert!(!parity(0x01));
        assert!(!parity(0x80));
        assert!(parity(0xff));
    }

    #[test]
    fn logic_flags_clear_carries() {
        let mut cc = ConditionCodes {
            cy: true,
            ac: true,
            ..Default::default()
        };
        cc.set_logic_flags(0x80);
        assert!(!cc.cy && !cc.ac);
        assert!(cc.s && !cc.z && !cc.p);
    }

    #[test]
    fn inc_dec_flags_keep_carries() {
        let mut cc = ConditionCodes {
            cy: true,
            ac: true,
            ..Default::default()
        };
        cc.set_inc_dec_flags(0);
        assert!(cc.cy && cc.ac && cc.z && cc.p);
    }

    #[test]
    fn conditions_follow_opcode_field() {
        let cc = ConditionCodes {
            z: true,
            p: true,
            ..Default::default()
        };
        let taken: Vec<bool> = (0..8).map(|f| cc.test(Condition::from_field(f))).collect();
        assert_eq!(
            taken,
            vec![false, true, true, false, false, true, true, false]
        );
    }
}
