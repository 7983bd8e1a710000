use std::io::Read;

use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::config::Config;
use crate::constants::{CPU_CYCLES_PER_TIMER_CYCLE, INSTRUCTION_WIDTH};
use crate::error::{Fault, LoadError};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Operation;
use crate::operations::{self, Flow};
use crate::registers::Register;
use crate::sink::{DisplaySink, StopSignal};
use crate::state::State;

/// Why an interpreter stopped running
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    #[error(transparent)]
    Fault(#[from] Fault),
    #[error("stopped by the host")]
    ExternalStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(HaltReason),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether it is still running, or why it halted
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU, either one instruction at a time or until halted
/// - advancing its timers
/// - handing its frame buffer to some display when it changes
///
/// Each instance owns all of its state, so any number of them can run side by side.
pub struct Chip8 {
    state: State,
    status: Status,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(&config),
            status: Status::Running,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        self.load_image(&image)
    }

    /// Place a program image at 0x200
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_image(image)
    }

    /// Read-only view of everything the interpreter owns, for inspection
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self.status {
            Status::Running => None,
            Status::Halted(reason) => Some(reason),
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Presents the frame buffer if it has changed since it was last presented.
    /// Returns whether anything was presented.
    pub fn present<D: DisplaySink>(&mut self, sink: &mut D) -> Result<bool, D::Error> {
        if !self.state.draw_flag {
            return Ok(false);
        }
        self.state.draw_flag = false;
        sink.present(&self.state.frame_buffer)?;
        Ok(true)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        let key = key & 0xF;
        self.state.pressed_keys[key as usize] = true;
        if let Some(register) = self.state.register_needing_key.take() {
            debug!("key {:X} satisfies wait on {}", key, register);
            self.state.registers.set(register, u16::from(key));
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.pressed_keys[(key & 0xF) as usize] = false;
    }

    /// Whether the buzzer should be sounding
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Halt with `ExternalStop`, unless already halted
    pub fn stop(&mut self) {
        if self.is_running() {
            self.halt(HaltReason::ExternalStop);
        }
    }

    /// Advances the CPU by a single instruction
    /// - does nothing once halted
    /// - does nothing while awaiting a keypress
    /// - otherwise fetches, decodes and executes the instruction at the pc
    pub fn step(&mut self) -> Status {
        if self.is_running() && self.state.register_needing_key.is_none() {
            if let Err(fault) = self.cycle() {
                self.halt(fault.into());
            }
        }
        self.status
    }

    /// Runs until halted, polling `stop` before every fetch.
    ///
    /// Timers advance once per instruction. The frame buffer is presented to `sink`
    /// after every instruction that changes it.
    /// Hosts that need to feed keys in while running should drive `step` themselves.
    pub fn run<D, S>(&mut self, sink: &mut D, stop: &mut S) -> Result<HaltReason, D::Error>
    where
        D: DisplaySink,
        S: StopSignal,
    {
        loop {
            if let Status::Halted(reason) = self.status {
                return Ok(reason);
            }
            if stop.should_stop() {
                self.stop();
                continue;
            }
            self.step();
            self.advance_timers();
            self.present(sink)?;
        }
    }

    /// Handles delay counter and timers
    /// - decrements the delay counter
    /// - decrements timers when the counter hits 0 and resets the counter to `CPU_CYCLES_PER_TIMER_CYCLE`
    pub fn advance_timers(&mut self) {
        if self.state.delay_counter == 0 {
            self.state.delay_counter = CPU_CYCLES_PER_TIMER_CYCLE;
            self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
            self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
        } else {
            self.state.delay_counter -= 1;
        }
    }

    /// Fetch, decode, execute; only moves the pc once the operation has succeeded
    fn cycle(&mut self) -> Result<(), Fault> {
        let pc = self.state.pc;
        let word = self.state.memory.read_word(pc)?;
        let operation = Operation::decode(word);
        trace!(
            "{:03X}: {:04X} {} v{:02X?} i{:03X}",
            pc,
            word,
            operation,
            self.state.registers.up_to(Register::VF),
            self.state.registers.i()
        );

        self.state.pc = match operations::execute(&mut self.state, operation)? {
            Flow::Next => pc + INSTRUCTION_WIDTH,
            Flow::Skip => pc + 2 * INSTRUCTION_WIDTH,
            Flow::Goto(address) => {
                debug!("{:03X}: {} -> {:03X}", pc, operation, address);
                address
            }
        };
        Ok(())
    }

    fn halt(&mut self, reason: HaltReason) {
        let pc = self.state.pc;
        match reason {
            HaltReason::Fault(Fault::StackUnderflow) => {
                info!("{:03X}: returned with an empty call stack", pc)
            }
            HaltReason::Fault(fault) => warn!("{:03X}: halted: {}", pc, fault),
            HaltReason::ExternalStop => info!("{:03X}: stopped by the host", pc),
        }
        self.status = Status::Halted(reason);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
