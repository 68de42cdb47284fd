use crate::opcode::Opcode;

/// # Instructions
/// The subset of the Chip-8 instruction set this interpreter executes.
///
/// Register operands (`x`, `y`) are nibbles, so they always index V0..VF.
/// Skips (`3xkk`, `4xkk`, `5xy0`, `9xy0`), keyboard input (`Ex9E`, `ExA1`,
/// `Fx0A`), `8xy7`, `Fx1E`, `Fx29`, `Fx33`, `Fx55` and `Fx65` are not
/// implemented and decode to `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Cls,
    /// `00EE` PC = STACK.pop()
    Ret,
    /// `1nnn` PC = nnn
    Jump(u16),
    /// `2nnn` STACK.push(PC); PC = nnn
    Call(u16),
    /// `6xkk` Vx = kk
    Load { x: u8, kk: u8 },
    /// `7xkk` Vx += kk
    Add { x: u8, kk: u8 },
    /// `8xy0` Vx = Vy
    Move { x: u8, y: u8 },
    /// `8xy1` Vx |= Vy
    Or { x: u8, y: u8 },
    /// `8xy2` Vx &= Vy
    And { x: u8, y: u8 },
    /// `8xy3` Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// `8xy4` Vx += Vy; VF = carry
    AddReg { x: u8, y: u8 },
    /// `8xy5` Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// `8xy6` Vx = Vy >> 1; VF = shifted out bit
    Shr { x: u8, y: u8 },
    /// `8xyE` Vx = Vy << 1; VF = shifted out bit
    Shl { x: u8, y: u8 },
    /// `Annn` I = nnn
    LoadI(u16),
    /// `Bnnn` PC = nnn + V0
    JumpV0(u16),
    /// `Cxkk` Vx = random & kk
    Rand { x: u8, kk: u8 },
    /// `Dxyn` draw an n byte sprite from I at (Vx, Vy)
    Draw { x: u8, y: u8, n: u8 },
    /// `Fx07` Vx = DT
    LoadDelay { x: u8 },
    /// `Fx15` DT = Vx
    SetDelay { x: u8 },
    /// `Fx18` ST = Vx
    SetSound { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for an opcode, or `None` if it has none
    ///
    /// Whole-word matches come first since `00E0` and `00EE` live in the
    /// `0nnn` space.
    pub fn decode(op: u16) -> Option<Instruction> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x1, ..) => Instruction::Jump(addr),
            (0x2, ..) => Instruction::Call(addr),
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x, y },
            (0xA, ..) => Instruction::LoadI(addr),
            (0xB, ..) => Instruction::JumpV0(addr),
            (0xC, ..) => Instruction::Rand { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            _ => return None,
        };
        Some(instruction)
    }
}
