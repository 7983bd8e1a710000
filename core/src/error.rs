use std::io;

use thiserror::Error;

/// Conditions that end a run of the interpreter.
///
/// None of these are recoverable; the engine halts and keeps its state around
/// for inspection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("address {0:#05X} is outside of memory")]
    AddressingFault(usize),
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("call stack is full ({0} frames)")]
    StackOverflow(usize),
    #[error("unknown instruction {0:#06X}")]
    UnknownInstruction(u16),
}

/// Failures while placing a program image in memory
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program image has an odd number of bytes ({0})")]
    OddLength(usize),
    #[error("program image is {len} bytes but only {capacity} fit in memory")]
    ImageTooLarge { len: usize, capacity: usize },
    #[error("unable to read program image: {0}")]
    Io(#[from] io::Error),
}
