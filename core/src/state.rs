use crate::config::Config;
use crate::constants::PROGRAM_START;
use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::{Register, Registers};
use crate::stack::CallStack;

/// Everything a single interpreter instance owns
///
/// ## CPU
/// - (registers) V0..VF and I
/// - (pc) a 16-bit program counter
/// - (stack) return addresses for subroutine calls
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - (delay_counter) CPU cycles until the timers next tick
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - a frame buffer holding the contents of the next frame to be drawn
///
/// ## Input
/// - pressed status of keys 0..F
/// - emulation halts until a key's value is written to `register_needing_key`
#[derive(Clone)]
pub struct State {
    pub registers: Registers,
    pub pc: u16,
    pub stack: CallStack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub delay_counter: u8,
    pub pressed_keys: [bool; 16],
    pub register_needing_key: Option<Register>,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let (width, height) = config.resolution.dimensions();
        State {
            registers: Registers::new(),
            pc: PROGRAM_START,
            stack: CallStack::new(config.stack_depth),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(width, height),
            draw_flag: false,
            delay_timer: 0,
            sound_timer: 0,
            delay_counter: 0,
            pressed_keys: [false; 16],
            register_needing_key: None,
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys[(key & 0xF) as usize]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
