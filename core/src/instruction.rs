use std::fmt;

use crate::registers::Register;

/// A decoded instruction word.
///
/// Operand fields are typed: `x`/`y` name registers, `byte` is the low byte of the
/// word, `addr` the low 12 bits and `rows` the low nibble of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipIfEqual { x: Register, byte: u8 },
    /// 4xkk
    SkipIfNotEqual { x: Register, byte: u8 },
    /// 5xy0
    SkipIfRegistersEqual { x: Register, y: Register },
    /// 6xkk
    SetImmediate { x: Register, byte: u8 },
    /// 7xkk
    AddImmediate { x: Register, byte: u8 },
    /// 8xy0
    Copy { x: Register, y: Register },
    /// 8xy1
    Or { x: Register, y: Register },
    /// 8xy2
    And { x: Register, y: Register },
    /// 8xy3
    Xor { x: Register, y: Register },
    /// 8xy4
    AddRegisters { x: Register, y: Register },
    /// 8xy5
    Subtract { x: Register, y: Register },
    /// 8xy6
    ShiftRight { x: Register },
    /// 8xy7
    SubtractReversed { x: Register, y: Register },
    /// 8xyE
    ShiftLeft { x: Register },
    /// 9xy0
    SkipIfRegistersNotEqual { x: Register, y: Register },
    /// Annn
    SetAddress { addr: u16 },
    /// Bnnn
    JumpOffset { addr: u16 },
    /// Cxkk
    Random { x: Register, mask: u8 },
    /// Dxyn
    Draw { x: Register, y: Register, rows: u8 },
    /// Ex9E
    SkipIfKeyPressed { x: Register },
    /// ExA1
    SkipIfKeyNotPressed { x: Register },
    /// Fx07
    ReadDelayTimer { x: Register },
    /// Fx0A
    WaitForKey { x: Register },
    /// Fx15
    SetDelayTimer { x: Register },
    /// Fx18
    SetSoundTimer { x: Register },
    /// Fx1E
    AddToAddress { x: Register },
    /// Fx29
    LoadGlyph { x: Register },
    /// Fx33
    StoreBcd { x: Register },
    /// Fx55
    StoreRegisters { x: Register },
    /// Fx65
    LoadRegisters { x: Register },
    /// Anything else, including 0nnn machine code calls
    Unknown(u16),
}

impl Operation {
    /// Decodes a 16-bit instruction word.
    ///
    /// The most significant nibble selects the family; the rest of the word is
    /// reinterpreted as operands for that family. Never fails: words outside the
    /// supported set become `Operation::Unknown`.
    pub fn decode(word: u16) -> Self {
        let x = Register::new(((word & 0x0F00) >> 8) as u8);
        let y = Register::new(((word & 0x00F0) >> 4) as u8);
        let n = (word & 0x000F) as u8;
        let byte = (word & 0x00FF) as u8;
        let addr = word & 0x0FFF;

        match ((word & 0xF000) >> 12, byte, n) {
            (0x0, 0xE0, _) if addr == 0x0E0 => Operation::ClearScreen,
            (0x0, 0xEE, _) if addr == 0x0EE => Operation::Return,
            (0x1, ..) => Operation::Jump { addr },
            (0x2, ..) => Operation::Call { addr },
            (0x3, ..) => Operation::SkipIfEqual { x, byte },
            (0x4, ..) => Operation::SkipIfNotEqual { x, byte },
            (0x5, _, 0x0) => Operation::SkipIfRegistersEqual { x, y },
            (0x6, ..) => Operation::SetImmediate { x, byte },
            (0x7, ..) => Operation::AddImmediate { x, byte },
            (0x8, _, 0x0) => Operation::Copy { x, y },
            (0x8, _, 0x1) => Operation::Or { x, y },
            (0x8, _, 0x2) => Operation::And { x, y },
            (0x8, _, 0x3) => Operation::Xor { x, y },
            (0x8, _, 0x4) => Operation::AddRegisters { x, y },
            (0x8, _, 0x5) => Operation::Subtract { x, y },
            (0x8, _, 0x6) => Operation::ShiftRight { x },
            (0x8, _, 0x7) => Operation::SubtractReversed { x, y },
            (0x8, _, 0xE) => Operation::ShiftLeft { x },
            (0x9, _, 0x0) => Operation::SkipIfRegistersNotEqual { x, y },
            (0xA, ..) => Operation::SetAddress { addr },
            (0xB, ..) => Operation::JumpOffset { addr },
            (0xC, ..) => Operation::Random { x, mask: byte },
            (0xD, ..) => Operation::Draw { x, y, rows: n },
            (0xE, 0x9E, _) => Operation::SkipIfKeyPressed { x },
            (0xE, 0xA1, _) => Operation::SkipIfKeyNotPressed { x },
            (0xF, 0x07, _) => Operation::ReadDelayTimer { x },
            (0xF, 0x0A, _) => Operation::WaitForKey { x },
            (0xF, 0x15, _) => Operation::SetDelayTimer { x },
            (0xF, 0x18, _) => Operation::SetSoundTimer { x },
            (0xF, 0x1E, _) => Operation::AddToAddress { x },
            (0xF, 0x29, _) => Operation::LoadGlyph { x },
            (0xF, 0x33, _) => Operation::StoreBcd { x },
            (0xF, 0x55, _) => Operation::StoreRegisters { x },
            (0xF, 0x65, _) => Operation::LoadRegisters { x },
            _ => Operation::Unknown(word),
        }
    }
}

impl From<u16> for Operation {
    fn from(word: u16) -> Self {
        Operation::decode(word)
    }
}

/// Mnemonics, for tracing
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operation::ClearScreen => write!(f, "CLS"),
            Operation::Return => write!(f, "RET"),
            Operation::Jump { addr } => write!(f, "JP {:#05X}", addr),
            Operation::Call { addr } => write!(f, "CALL {:#05X}", addr),
            Operation::SkipIfEqual { x, byte } => write!(f, "SE {}, {:#04X}", x, byte),
            Operation::SkipIfNotEqual { x, byte } => write!(f, "SNE {}, {:#04X}", x, byte),
            Operation::SkipIfRegistersEqual { x, y } => write!(f, "SE {}, {}", x, y),
            Operation::SetImmediate { x, byte } => write!(f, "LD {}, {:#04X}", x, byte),
            Operation::AddImmediate { x, byte } => write!(f, "ADD {}, {:#04X}", x, byte),
            Operation::Copy { x, y } => write!(f, "LD {}, {}", x, y),
            Operation::Or { x, y } => write!(f, "OR {}, {}", x, y),
            Operation::And { x, y } => write!(f, "AND {}, {}", x, y),
            Operation::Xor { x, y } => write!(f, "XOR {}, {}", x, y),
            Operation::AddRegisters { x, y } => write!(f, "ADD {}, {}", x, y),
            Operation::Subtract { x, y } => write!(f, "SUB {}, {}", x, y),
            Operation::ShiftRight { x } => write!(f, "SHR {}", x),
            Operation::SubtractReversed { x, y } => write!(f, "SUBN {}, {}", x, y),
            Operation::ShiftLeft { x } => write!(f, "SHL {}", x),
            Operation::SkipIfRegistersNotEqual { x, y } => write!(f, "SNE {}, {}", x, y),
            Operation::SetAddress { addr } => write!(f, "LD I, {:#05X}", addr),
            Operation::JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Operation::Random { x, mask } => write!(f, "RND {}, {:#04X}", x, mask),
            Operation::Draw { x, y, rows } => write!(f, "DRW {}, {}, {}", x, y, rows),
            Operation::SkipIfKeyPressed { x } => write!(f, "SKP {}", x),
            Operation::SkipIfKeyNotPressed { x } => write!(f, "SKNP {}", x),
            Operation::ReadDelayTimer { x } => write!(f, "LD {}, DT", x),
            Operation::WaitForKey { x } => write!(f, "LD {}, K", x),
            Operation::SetDelayTimer { x } => write!(f, "LD DT, {}", x),
            Operation::SetSoundTimer { x } => write!(f, "LD ST, {}", x),
            Operation::AddToAddress { x } => write!(f, "ADD I, {}", x),
            Operation::LoadGlyph { x } => write!(f, "LD F, {}", x),
            Operation::StoreBcd { x } => write!(f, "LD B, {}", x),
            Operation::StoreRegisters { x } => write!(f, "LD [I], {}", x),
            Operation::LoadRegisters { x } => write!(f, "LD {}, [I]", x),
            Operation::Unknown(word) => write!(f, "??? {:#06X}", word),
        }
    }
}
