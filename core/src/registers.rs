use std::fmt;

/// Mask applied to every write to V0..VF
pub const BYTE_MASK: u16 = 0x00FF;

/// Mask applied to every write to I
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Index of one of the 16 general purpose registers.
///
/// Only the low nibble is kept, so a `Register` always names V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    /// The flag register, used for carry/borrow and sprite collisions
    pub const VF: Register = Register(0xF);
    pub const V0: Register = Register(0x0);

    pub fn new(index: u8) -> Self {
        Register(index & 0xF)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/collision flag
/// - (i) a 12-bit memory address register
///
/// Values are accepted as `u16` and masked to the register's width on the way in,
/// so arithmetic can be done wide and stored through `set`/`set_i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registers {
    v: [u8; 16],
    i: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, register: Register) -> u8 {
        self.v[register.index()]
    }

    pub fn set(&mut self, register: Register, value: u16) {
        self.v[register.index()] = (value & BYTE_MASK) as u8;
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value & ADDRESS_MASK;
    }

    pub fn flag(&self) -> u8 {
        self.get(Register::VF)
    }

    pub fn set_flag(&mut self, set: bool) {
        self.set(Register::VF, u16::from(set));
    }

    /// V0..=Vx, used by the bulk load/store instructions
    pub fn up_to(&self, last: Register) -> &[u8] {
        &self.v[..=last.index()]
    }

    pub fn up_to_mut(&mut self, last: Register) -> &mut [u8] {
        &mut self.v[..=last.index()]
    }
}
