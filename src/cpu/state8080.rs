use std::fmt;

use crate::cpu::flags::ConditionCodes;
use crate::cpu::memory::Memory;

/// An 8-bit register named by an opcode operand field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    B,
    C,
    D,
    E,
    H,
    L,
    A,
}

/// What a 3-bit operand field (B,C,D,E,H,L,M,A) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Register),
    /** the byte at H:L */
    Memory,
}

impl Operand {
    pub fn from_field(field: u8) -> Operand {
        match field & 0x7 {
            0 => Operand::Reg(Register::B),
            1 => Operand::Reg(Register::C),
            2 => Operand::Reg(Register::D),
            3 => Operand::Reg(Register::E),
            4 => Operand::Reg(Register::H),
            5 => Operand::Reg(Register::L),
            6 => Operand::Memory,
            _ => Operand::Reg(Register::A),
        }
    }
}

/// Register pair selected by bits 4..5 of LXI/INX/DCX/DAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPair {
    BC,
    DE,
    HL,
    SP,
}

impl RegisterPair {
    pub fn from_field(field: u8) -> RegisterPair {
        match field & 0x3 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::SP,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,

    pub sp: u16,
    pub pc: u16,

    pub cc: ConditionCodes,

    pub int_enable: bool,
    /** set by HLT, cleared by an accepted interrupt */
    pub halted: bool,
}

impl State8080 {
    pub fn new() -> State8080 {
        State8080::default()
    }

    pub fn with_pc_sp(pc: u16, sp: u16) -> State8080 {
        State8080 {
            pc,
            sp,
            ..State8080::default()
        }
    }

    pub fn get_reg(&self, reg: Register) -> u8 {
        match reg {
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
            Register::A => self.a,
        }
    }

    pub fn set_reg(&mut self, reg: Register, val: u8) {
        match reg {
            Register::B => self.b = val,
            Register::C => self.c = val,
            Register::D => self.d = val,
            Register::E => self.e = val,
            Register::H => self.h = val,
            Register::L => self.l = val,
            Register::A => self.a = val,
        }
    }

    pub fn get_bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    pub fn set_bc(&mut self, val: u16) {
        [self.b, self.c] = val.to_be_bytes();
    }

    pub fn get_de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    pub fn set_de(&mut self, val: u16) {
        [self.d, self.e] = val.to_be_bytes();
    }

    pub fn get_hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    pub fn set_hl(&mut self, val: u16) {
        [self.h, self.l] = val.to_be_bytes();
    }

    /** accumulator in the high byte, status word in the low byte */
    pub fn get_psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.cc.get_f()])
    }

    pub fn set_psw(&mut self, val: u16) {
        let [a, f] = val.to_be_bytes();
        self.a = a;
        self.cc.set_f(f);
    }

    pub fn get_pair(&self, pair: RegisterPair) -> u16 {
        match pair {
            RegisterPair::BC => self.get_bc(),
            RegisterPair::DE => self.get_de(),
            RegisterPair::HL => self.get_hl(),
            RegisterPair::SP => self.sp,
        }
    }

    pub fn set_pair(&mut self, pair: RegisterPair, val: u16) {
        match pair {
            RegisterPair::BC => self.set_bc(val),
            RegisterPair::DE => self.set_de(val),
            RegisterPair::HL => self.set_hl(val),
            RegisterPair::SP => self.sp = val,
        }
    }

    /// Reads an operand field; `M` is the byte at H:L.
    pub fn read_operand(&self, operand: Operand, memory: &Memory) -> u8 {
        match operand {
            Operand::Reg(reg) => self.get_reg(reg),
            Operand::Memory => memory.read(self.get_hl()),
        }
    }

    pub fn write_operand(&mut self, operand: Operand, memory: &mut Memory, val: u8) {
        match operand {
            Operand::Reg(reg) => self.set_reg(reg, val),
            Operand::Memory => memory.write(self.get_hl(), val),
        }
    }
}

impl fmt::Display for State8080 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc:{:04x} sp:{:04x} a:{:02x} bc:{:02x}{:02x} de:{:02x}{:02x} hl:{:02x}{:02x} \
             z:{} s:{} p:{} cy:{} ac:{} ie:{}",
            self.pc,
            self.sp,
            self.a,
            self.b,
            self.c,
            self.d,
            self.e,
            self.h,
            self.l,
            u8::from(self.cc.z),
            u8::from(self.cc.s),
            u8::from(self.cc.p),
            u8::from(self.cc.cy),
            u8::from(self.cc.ac),
            u8::from(self.int_enable),
        )
    }
}
