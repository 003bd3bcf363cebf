//! Optional host hooks a step can consult: an I/O port handler for IN/OUT
//! and diagnostic traps that turn CALLs to a console routine into text.

use crate::cpu::memory::Memory;
use crate::cpu::state8080::State8080;

/// Port device behind IN/OUT. Without one both opcodes are unimplemented.
pub trait Ports {
    fn read_port(&mut self, port: u8) -> u8;
    fn write_port(&mut self, port: u8, value: u8);
}

/// How a trap turns machine state into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapFormat {
    /// Bytes from the address in DE up to a terminating `'$'`.
    DollarString,
    /// The single byte in E.
    Character,
}

/// Intercepts `CALL address` while register C holds `selector`.
pub struct DiagnosticTrap<'h> {
    pub address: u16,
    pub selector: u8,
    pub format: TrapFormat,
    pub output: Box<dyn FnMut(&str) + 'h>,
}

impl<'h> DiagnosticTrap<'h> {
    pub fn new(
        address: u16,
        selector: u8,
        format: TrapFormat,
        output: impl FnMut(&str) + 'h,
    ) -> DiagnosticTrap<'h> {
        DiagnosticTrap {
            address,
            selector,
            format,
            output: Box::new(output),
        }
    }

    pub fn matches(&self, target: u16, state: &State8080) -> bool {
        self.address == target && self.selector == state.c
    }

    pub fn render(&self, state: &State8080, memory: &Memory) -> String {
        match self.format {
            TrapFormat::Character => char::from(state.e).to_string(),
            TrapFormat::DollarString => {
                let mut text = String::new();
                let mut addr = state.get_de();
                // at most one lap of memory when no '$' is present
                for _ in 0..=u16::MAX {
                    let byte = memory.read(addr);
                    if byte == b'$' {
                        break;
                    }
                    text.push(char::from(byte));
                    addr = addr.wrapping_add(1);
                }
                text
            }
        }
    }

    fn fire(&mut self, state: &State8080, memory: &Memory) {
        let text = self.render(state, memory);
        log::debug!("diagnostic trap {:#06x}/{}: {:?}", self.address, self.selector, text);
        (self.output)(&text);
    }
}

/// Everything optional a step may call out to.
#[derive(Default)]
pub struct Hooks<'h> {
    pub ports: Option<&'h mut dyn Ports>,
    pub traps: Vec<DiagnosticTrap<'h>>,
}

impl<'h> Hooks<'h> {
    pub fn new() -> Hooks<'h> {
        Hooks::default()
    }

    pub fn with_ports(mut self, ports: &'h mut dyn Ports) -> Hooks<'h> {
        self.ports = Some(ports);
        self
    }

    pub fn with_trap(mut self, trap: DiagnosticTrap<'h>) -> Hooks<'h> {
        self.traps.push(trap);
        self
    }

    /// Runs the first trap matching a CALL to `target`. Returns false when no
    /// trap applies and the call should go ahead.
    pub(crate) fn try_trap(&mut self, target: u16, state: &State8080, memory: &Memory) -> bool {
        match self.traps.iter_mut().find(|t| t.matches(target, state)) {
            Some(trap) => {
                trap.fire(state, memory);
                true
            }
            None => false,
        }
    }
}
