pub use chip8::Chip8;
pub use config::{Config, UnknownOpcodePolicy};
pub use cpu::Cpu;
pub use display::{Display, FrameBuffer};
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use memory::Memory;
pub use opcode::Opcode;
pub use timer::{Bell, Mute, Sound, Timer, TimerClock, Timers};

mod chip8;
mod config;
pub mod constants;
mod cpu;
mod display;
mod error;
mod instruction;
mod memory;
pub mod opcode;
mod operations;
mod timer;
