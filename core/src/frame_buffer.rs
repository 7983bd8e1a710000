use std::fmt;

/// # Frame Buffer
/// A monochrome grid of pixels, stored row-major so it is indexed as [y][x].
///
/// Coordinates wrap around both edges of the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[self.offset(x, y)]
    }

    /// Toggles a single pixel.
    /// Returns true if the pixel was previously set (i.e. it has just been erased).
    pub fn xor_pixel(&mut self, x: usize, y: usize) -> bool {
        let offset = self.offset(x, y);
        let was_set = self.pixels[offset];
        self.pixels[offset] = !was_set;
        was_set
    }

    /// XORs an 8 pixel wide sprite onto the buffer with its top left corner at x, y.
    /// Returns true if any pixel was erased.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collided = false;
        for (row, byte) in sprite.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    collided |= self.xor_pixel(x + bit, y + row);
                }
            }
        }
        collided
    }

    /// An independent copy for handing off to a display
    pub fn snapshot(&self) -> FrameBuffer {
        self.clone()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&pixel| !pixel)
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y % self.height) * self.width + (x % self.width)
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "FrameBuffer {}x{}", self.width, self.height)?;
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
