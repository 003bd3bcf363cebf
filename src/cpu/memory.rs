use crate::error::CpuError;

pub const MEMORY_SIZE: usize = 0x10000;

/// The full 64K address space. Owned by the host and lent to the core for
/// each step, so every `u16` address is in range.
#[derive(Clone)]
pub struct Memory {
    pub memory: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.memory.len()).finish()
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Memory holding `program` at address 0, the rest zeroed.
    pub fn with_program(program: &[u8]) -> Result<Memory, CpuError> {
        let mut memory = Memory::new();
        memory.load(0, program)?;
        Ok(memory)
    }

    pub fn read(&self, index: u16) -> u8 {
        self.memory[usize::from(index)]
    }

    /// Little endian; the high byte comes from `index + 1`, wrapping at 0xffff.
    pub fn read_word(&self, index: u16) -> u16 {
        u16::from_le_bytes([self.read(index), self.read(index.wrapping_add(1))])
    }

    pub fn write(&mut self, index: u16, val: u8) {
        self.memory[usize::from(index)] = val;
    }

    pub fn write_word(&mut self, index: u16, val: u16) {
        let [low, high] = val.to_le_bytes();
        self.write(index, low);
        self.write(index.wrapping_add(1), high);
    }

    /// Copies an image into memory at `offset`.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) -> Result<(), CpuError> {
        let start = usize::from(offset);
        let end = start + bytes.len();
        if end > MEMORY_SIZE {
            return Err(CpuError::AddressOutOfRange {
                offset,
                len: bytes.len(),
            });
        }
        self.memory[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Overwrites a few bytes, e.g. bootstrap jumps for a test program.
    pub fn patch(&mut self, address: u16, bytes: &[u8]) -> Result<(), CpuError> {
        self.load(address, bytes)
    }
}

/// Pushes `val`: high byte at SP-1, low byte at SP-2, then SP -= 2.
pub fn push(sp: &mut u16, memory: &mut Memory, val: u16) {
    let [low, high] = val.to_le_bytes();
    memory.write(sp.wrapping_sub(1), high);
    memory.write(sp.wrapping_sub(2), low);
    *sp = sp.wrapping_sub(2);
}

/// Pops a word: low byte at SP, high byte at SP+1, then SP += 2.
pub fn pop(sp: &mut u16, memory: &Memory) -> u16 {
    let val = memory.read_word(*sp);
    *sp = sp.wrapping_add(2);
    val
}
