use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use chip8_core::{DisplaySink, FrameBuffer};

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl error: {0}")]
    Sdl(String),
    #[error("unable to create window: {0}")]
    Window(#[from] WindowBuildError),
    #[error("unable to create canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
}

/// # Display
/// The Chip-8 display is composed of black/white pixels, 64x32 or 128x64 of them.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `width` the horizontal size of the display measured in pixels
    /// * `height` the vertical size of the display measured in pixels
    /// * `scale` the size multiplier for each pixel
    pub fn new(
        sdl: &sdl2::Sdl,
        width: usize,
        height: usize,
        scale: usize,
    ) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::Sdl)?;
        let window = video_subsystem
            .window("Emu-8", (width * scale) as u32, (height * scale) as u32)
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        debug!("opened {}x{} window at scale {}", width, height, scale);

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Mapping each value from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(if pixel { 255 } else { 0 }).take(3))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            frame.width() as u32,
            frame.height() as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_len = frame.width() * 3;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out to `pitch` bytes
                for (y, row) in pixels.chunks(row_len).enumerate() {
                    buffer[y * pitch..y * pitch + row_len].copy_from_slice(row);
                }
            })
            .map_err(DisplayError::Sdl)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::Sdl)?;
        self.canvas.present();
        Ok(())
    }
}

impl DisplaySink for Display {
    type Error = DisplayError;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.render(frame)
    }
}
