use crate::error::Fault;

/// # Call Stack
/// Stores return addresses when subroutines are called.
///
/// Conflicting sources cite the depth as anywhere from 12 to 16 frames, so it is
/// bounded by whatever the interpreter was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<u16>,
    depth: usize,
}

impl CallStack {
    pub fn new(depth: usize) -> Self {
        CallStack {
            frames: Vec::with_capacity(depth),
            depth,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        if self.frames.len() == self.depth {
            return Err(Fault::StackOverflow(self.depth));
        }
        self.frames.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.frames.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn peek(&self) -> Option<u16> {
        self.frames.last().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
