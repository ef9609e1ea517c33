use log::warn;
use thiserror::Error;

pub const FULL_ADDRESS_SPACE: usize = 0x10000;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    #[error("No backing store configured, tried to access {addr:#06X}")]
    Unconfigured { addr: u16 },
    #[error("Address {addr:#06X} is outside of the {size:#X} byte backing store")]
    OutOfBounds { addr: u16, size: usize },
}

/// The bus seen by the CPU. Every access may fail; the core never recovers
/// from a failed access and hands the error straight back to the caller.
pub trait Memory {
    fn ld8(&mut self, addr: u16) -> Result<u8, MemoryError>;
    fn store(&mut self, addr: u16, val: u8) -> Result<(), MemoryError>;

    fn ld16(&mut self, addr: u16) -> Result<u16, MemoryError> {
        let l_byte = self.ld8(addr)?;
        let r_byte = self.ld8(addr.wrapping_add(1))?;
        Ok((r_byte as u16) << 8 | (l_byte as u16))
    }
}

/// Flat, linearly addressed RAM.
#[derive(Clone, Debug)]
pub struct Ram(Option<Box<[u8]>>);

impl Default for Ram {
    fn default() -> Ram {
        Ram::new()
    }
}

impl Ram {
    /// A RAM covering the whole 16 bit address space.
    pub fn new() -> Ram {
        Ram::with_size(FULL_ADDRESS_SPACE)
    }

    pub fn with_size(size: usize) -> Ram {
        Ram(Some(vec![0; size].into_boxed_slice()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Ram {
        Ram(Some(bytes.into()))
    }

    /// A RAM with no backing store; every access fails.
    pub fn unconfigured() -> Ram {
        Ram(None)
    }

    pub fn size(&self) -> usize {
        self.0.as_ref().map_or(0, |mem| mem.len())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_deref().unwrap_or(&[])
    }

    /// Copies `image` into RAM starting at `addr`. Nothing is written unless
    /// the whole image fits.
    pub fn load(&mut self, addr: u16, image: &[u8]) -> Result<(), MemoryError> {
        let mem = self.0.as_mut().ok_or(MemoryError::Unconfigured { addr })?;
        let start = addr as usize;
        let end = start + image.len();
        if end > mem.len() {
            let size = mem.len();
            let first_missing = addr.wrapping_add(size.saturating_sub(start) as u16);
            warn!(
                "Image of {} bytes at {:04X} overruns {:X} bytes of RAM",
                image.len(),
                addr,
                size
            );
            return Err(MemoryError::OutOfBounds {
                addr: first_missing,
                size,
            });
        }
        mem[start..end].copy_from_slice(image);
        Ok(())
    }

    fn cell(&mut self, addr: u16) -> Result<&mut u8, MemoryError> {
        let mem = self.0.as_mut().ok_or(MemoryError::Unconfigured { addr })?;
        let size = mem.len();
        match mem.get_mut(addr as usize) {
            Some(cell) => Ok(cell),
            None => {
                warn!("Access to {:04X} outside of {:X} bytes of RAM", addr, size);
                Err(MemoryError::OutOfBounds { addr, size })
            }
        }
    }
}

impl Memory for Ram {
    fn ld8(&mut self, addr: u16) -> Result<u8, MemoryError> {
        self.cell(addr).map(|cell| *cell)
    }

    fn store(&mut self, addr: u16, val: u8) -> Result<(), MemoryError> {
        *self.cell(addr)? = val;
        Ok(())
    }
}
