use log::{trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::{Config, UnknownOpcodePolicy};
use crate::constants::{OPCODE_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::display::Display;
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::opcode;
use crate::operations;
use crate::timer::Timers;

/// # CPU
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the carry/borrow/collision flag and is only written
///       by arithmetic, shift and draw instructions
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter starting at 0x200
///
/// Stack
/// - return addresses of the subroutines currently being called; unlike the
///   16 levels of the original interpreter it has no fixed depth
///
/// Timers
/// - 2 8-bit timers (delay & sound) shared with the clocks that decrement them
///
/// The CPU owns its memory and display and holds one random source for its
/// whole lifetime.
pub struct Cpu {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub memory: Memory,
    pub display: Display,
    pub timers: Timers,
    pub(crate) rng: Box<dyn RngCore + Send>,
    unknown_opcodes: UnknownOpcodePolicy,
}

impl Cpu {
    /// Creates a CPU whose random source is seeded from `config.seed`, or
    /// from the OS if there is none
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, Box::new(rng))
    }

    /// Creates a CPU that draws its random bytes from `rng`
    pub fn with_rng(config: &Config, rng: Box<dyn RngCore + Send>) -> Self {
        Cpu {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            stack: Vec::new(),
            memory: Memory::new(),
            display: Display::new(),
            timers: Timers::new(),
            rng,
            unknown_opcodes: config.unknown_opcodes,
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    pub fn step(&mut self) -> Result<()> {
        let op = self.fetch()?;
        self.execute(op)
    }

    /// Gets the opcode currently pointed at by the pc and advances the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&mut self) -> Result<u16> {
        let high = self.memory.get_byte(self.pc as usize)?;
        let low = self.memory.get_byte(self.pc as usize + 1)?;
        self.pc += OPCODE_SIZE;
        Ok(opcode::from_bytes(high, low))
    }

    /// Decodes and executes a single opcode
    ///
    /// Opcodes without an instruction are handled according to the
    /// configured `UnknownOpcodePolicy`.
    pub fn execute(&mut self, op: u16) -> Result<()> {
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.v,
            self.i,
            self.pc
        );
        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => return self.unknown(op),
        };

        match instruction {
            Instruction::Cls => operations::clr(self),
            Instruction::Ret => operations::ret(self)?,
            Instruction::Jump(addr) => operations::jump(self, addr),
            Instruction::Call(addr) => operations::call(self, addr),
            Instruction::Load { x, kk } => operations::load(self, x, kk),
            Instruction::Add { x, kk } => operations::add(self, x, kk),
            Instruction::Move { x, y } => operations::mv(self, x, y),
            Instruction::Or { x, y } => operations::or(self, x, y),
            Instruction::And { x, y } => operations::and(self, x, y),
            Instruction::Xor { x, y } => operations::xor(self, x, y),
            Instruction::AddReg { x, y } => operations::addr(self, x, y),
            Instruction::Sub { x, y } => operations::sub(self, x, y),
            Instruction::Shr { x, y } => operations::shr(self, x, y),
            Instruction::Shl { x, y } => operations::shl(self, x, y),
            Instruction::LoadI(addr) => operations::loadi(self, addr),
            Instruction::JumpV0(addr) => operations::jumpi(self, addr),
            Instruction::Rand { x, kk } => operations::rand(self, x, kk),
            Instruction::Draw { x, y, n } => operations::draw(self, x, y, n)?,
            Instruction::LoadDelay { x } => operations::moved(self, x),
            Instruction::SetDelay { x } => operations::loads(self, x),
            Instruction::SetSound { x } => operations::ld(self, x),
        }
        Ok(())
    }

    fn unknown(&self, op: u16) -> Result<()> {
        match self.unknown_opcodes {
            UnknownOpcodePolicy::Skip => {
                warn!("Skipping unknown opcode {:04X} at {:04X}", op, self.pc);
                Ok(())
            }
            UnknownOpcodePolicy::Fail => Err(Error::UnknownOpcode(op)),
        }
    }
}
