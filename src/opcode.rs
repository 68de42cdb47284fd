/// # Opcodes
///
/// An opcode is the 16-bit word formed by a high byte at `pc` and a low
/// byte at `pc + 1`. Decoding looks at it one nibble at a time:
///
/// ```text
///  word   0xD125
///  nibble   D 1 2 5
///  field    | x y n
///           group
/// ```
///
/// The same bits are read as different operands depending on the group:
/// `nnn` is a 12-bit address (`1nnn`, `2nnn`, `Annn`, `Bnnn`), `kk` is an
/// immediate byte (`6xkk`, `7xkk`, `Cxkk`), `x` and `y` name registers and
/// `n` is a sprite height or an `8xy_` sub-operation.
pub trait Opcode {
    /// All four nibbles as `(group, x, y, n)`
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// Register index in bits 8..12
    fn x(&self) -> u8;

    /// Register index in bits 4..8
    fn y(&self) -> u8;

    /// Bits 0..4
    fn n(&self) -> u8;

    /// Low byte
    fn kk(&self) -> u8;

    /// Low 12 bits
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0xFFF
    }
}

/// Joins the two bytes of an opcode, high byte first
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
