use thiserror::Error;

/// Errors surfaced by the core and its host-side helpers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// No behaviour is defined for this opcode (IN/OUT without a port hook).
    #[error("unimplemented opcode {0:#04x}")]
    UnimplementedOpcode(u8),

    /// Interrupt vectors are 0..=7.
    #[error("interrupt vector {0} out of range 0..=7")]
    InvalidInterrupt(u8),

    /// An image or patch does not fit below 0x10000.
    #[error("{len} bytes at {offset:#06x} run past the end of memory")]
    AddressOutOfRange { offset: u16, len: usize },
}
