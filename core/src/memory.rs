use log::info;

use crate::constants::{MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_ADDRESS};
use crate::error::{Fault, LoadError};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000-0x04F  sprite sheet
/// 0x050-0x1FF  reserved for the interpreter
/// 0x200-0xFFF  program
/// ```
///
/// Addresses are u16 as per the chip-8; lengths are usize to stop endless casting.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zeroed memory with the sprite sheet baked in
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_SIZE]);
        let sheet = SPRITE_SHEET_ADDRESS as usize;
        bytes[sheet..sheet + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copy a program image into memory starting at `PROGRAM_START`.
    ///
    /// Images are sequences of 16-bit instruction words, so odd lengths are rejected,
    /// as is anything that would run past the end of memory.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() % 2 != 0 {
            return Err(LoadError::OddLength(image.len()));
        }
        let start = PROGRAM_START as usize;
        let capacity = MEMORY_SIZE - start;
        if image.len() > capacity {
            return Err(LoadError::ImageTooLarge {
                len: image.len(),
                capacity,
            });
        }
        self.bytes[start..start + image.len()].copy_from_slice(image);
        info!("loaded {} byte image at {:#05X}", image.len(), start);
        Ok(())
    }

    pub fn read_byte(&self, address: u16) -> Result<u8, Fault> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(Fault::AddressingFault(address as usize))
    }

    pub fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Fault> {
        let byte = self
            .bytes
            .get_mut(address as usize)
            .ok_or(Fault::AddressingFault(address as usize))?;
        *byte = value;
        Ok(())
    }

    /// Opcodes are 16 bits so we combine two subsequent bytes, big-endian.
    pub fn read_word(&self, address: u16) -> Result<u16, Fault> {
        let bytes = self.slice(address, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// `len` bytes starting at `address`, or the first out of bounds address
    pub fn slice(&self, address: u16, len: usize) -> Result<&[u8], Fault> {
        let range = Self::range(address, len)?;
        Ok(&self.bytes[range])
    }

    pub fn slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], Fault> {
        let range = Self::range(address, len)?;
        Ok(&mut self.bytes[range])
    }

    fn range(address: u16, len: usize) -> Result<std::ops::Range<usize>, Fault> {
        let start = address as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            Err(Fault::AddressingFault(start.max(MEMORY_SIZE)))
        } else {
            Ok(start..end)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
