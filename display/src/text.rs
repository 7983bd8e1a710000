use std::io::{self, Write};

use chip8_core::{DisplaySink, FrameBuffer};

const ON: char = '█';
const OFF: char = ' ';

/// Writes each frame as text, one line per row, framed by a border.
///
/// Used when running without a window, e.g. in a terminal or over ssh.
pub struct TextDisplay<W: Write> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        TextDisplay { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// A text rendering of `frame`
pub fn render(frame: &FrameBuffer) -> String {
    let border: String = std::iter::repeat('-').take(frame.width()).collect();
    let mut text = format!("+{}+\n", border);
    for row in frame.rows() {
        text.push('|');
        text.extend(row.iter().map(|&pixel| if pixel { ON } else { OFF }));
        text.push_str("|\n");
    }
    text.push_str(&format!("+{}+\n", border));
    text
}

impl<W: Write> DisplaySink for TextDisplay<W> {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.out.write_all(render(frame).as_bytes())?;
        self.out.flush()
    }
}
