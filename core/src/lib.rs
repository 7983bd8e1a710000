//! A CHIP-8 interpreter core: memory, registers, call stack, frame buffer and the
//! fetch-decode-execute engine that drives them. Windowing, input devices and
//! audio are left to the host.

pub use chip8::{Chip8, HaltReason, Status};
pub use config::{Config, Resolution};
pub use constants::CLOCK_SPEED;
pub use error::{Fault, LoadError};
pub use frame_buffer::FrameBuffer;
pub use instruction::Operation;
pub use registers::{Register, Registers};
pub use sink::{DisplaySink, FrameLog, NullSink, StopSignal};

mod chip8;
mod config;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
pub mod memory;
mod operations;
mod registers;
pub mod stack;
mod sink;
pub mod state;
