use std::io;

use thiserror::Error;

/// Everything that can stop the Chip-8 from making progress
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read program: {0}")]
    ProgramLoadFailed(#[from] io::Error),

    #[error("program is {size} bytes but only {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("memory access out of bounds at {0:#06X}")]
    AddressOutOfBounds(usize),

    #[error("returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
