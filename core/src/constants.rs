/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// 0x000 - 0x1FF is reserved for the interpreter; ROMs are loaded at 0x200
pub const PROGRAM_START: u16 = 0x200;

/// Every instruction is a single big-endian 16-bit word
pub const INSTRUCTION_WIDTH: u16 = 0x2;

/// Number of return addresses the call stack holds unless configured otherwise
pub const STACK_DEPTH: usize = 16;

/// Classic display resolution
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Extended (high resolution) display
pub const EXTENDED_DISPLAY_WIDTH: usize = 128;
pub const EXTENDED_DISPLAY_HEIGHT: usize = 64;

/// Sprites are always 8 pixels wide
pub const SPRITE_WIDTH: usize = 8;

/// Nanoseconds per CPU cycle (500Hz)
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Timers run at 60Hz which is approximately once every 8 CPU cycles
pub const CPU_CYCLES_PER_TIMER_CYCLE: u8 = 8;

/// Where the sprite sheet lives in memory
pub const SPRITE_SHEET_ADDRESS: u16 = 0x000;

/// Bytes per glyph in the sprite sheet
pub const SPRITE_SHEET_GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Sprites for the hex digits 0..F, each 4 pixels wide and 5 rows tall.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
