use std::convert::Infallible;

use crate::frame_buffer::FrameBuffer;

/// Something that presents frames, e.g. a window or a terminal.
///
/// The interpreter hands over a snapshot whenever the frame buffer changes and
/// doesn't care what happens to it afterwards.
pub trait DisplaySink {
    type Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    type Error = Infallible;

    fn present(&mut self, _frame: &FrameBuffer) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Keeps every frame it is given
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames: Vec<FrameBuffer>,
}

impl DisplaySink for FrameLog {
    type Error = Infallible;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.frames.push(frame.snapshot());
        Ok(())
    }
}

/// Polled by the run loop before every fetch; must not block.
pub trait StopSignal {
    fn should_stop(&mut self) -> bool;
}

impl<F> StopSignal for F
where
    F: FnMut() -> bool,
{
    fn should_stop(&mut self) -> bool {
        self()
    }
}
