use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, EXTENDED_DISPLAY_HEIGHT, EXTENDED_DISPLAY_WIDTH, STACK_DEPTH,
};

/// Size of the frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 64x32
    Classic,
    /// 128x64
    Extended,
}

impl Resolution {
    /// (width, height) in pixels
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Resolution::Classic => (DISPLAY_WIDTH, DISPLAY_HEIGHT),
            Resolution::Extended => (EXTENDED_DISPLAY_WIDTH, EXTENDED_DISPLAY_HEIGHT),
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Classic
    }
}

/// Knobs that vary between historical interpreters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub resolution: Resolution,
    pub stack_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolution: Resolution::default(),
            stack_depth: STACK_DEPTH,
        }
    }
}
