use std::io::Read;

use log::info;

use crate::constants::{FONT_START, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000..0x200  reserved for the interpreter
/// 0x050..0x0A0  font sprites (see constants::SPRITE_SHEET)
/// 0x200..0x1000 program
/// ```
///
/// Reads outside of memory are reported as `Error::AddressOutOfBounds`
/// rather than wrapped or clamped.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: Box::new([0; MEMORY_SIZE]),
        };
        memory.load_font();
        memory
    }

    /// Copy the raw bytes of a program to `PROGRAM_START`, then (re)load the font
    ///
    /// Whatever an earlier program left above `PROGRAM_START` is zeroed first.
    ///
    /// # Arguments
    /// * `program` the complete program; its length is the program's length
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        for byte in self.bytes[PROGRAM_START..].iter_mut() {
            *byte = 0;
        }
        self.bytes[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
        self.load_font();
        info!("Loaded program [size: {}]", program.len());
        Ok(())
    }

    /// Read a program until the end of the stream and load it
    ///
    /// Only the bytes actually read are copied; nothing is written past the
    /// true end of the stream.
    ///
    /// # Arguments
    /// * `reader` a source that contains a program, e.g. a file
    pub fn load_from(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        let size = reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(size)
    }

    pub fn get_byte(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Error::AddressOutOfBounds(address))
    }

    fn load_font(&mut self) {
        self.bytes[FONT_START..FONT_START + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
