use std::io;
use std::time::{Duration, Instant};

use anyhow::{Error, Result};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, HaltReason};
use chip8_display::{Display, TextDisplay};

use crate::keymap::keymap;

/// Runs `chip8` in an SDL2 window until the program halts or the window is closed.
///
/// - Escape or closing the window stops the interpreter
/// - holding Space ignores the clock speed
///
/// If the program halts on its own the last frame stays up until the window is closed.
pub fn run(chip8: &mut Chip8, scale: usize, clock_hz: u64) -> Result<HaltReason> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(Error::msg)?;
    let frame = chip8.frame_buffer();
    let mut display = Display::new(&sdl, frame.width(), frame.height(), scale)?;
    display.render(frame)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set initial timing
    let cycle_time = Duration::from_nanos(1_000_000_000 / clock_hz);
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    while chip8.is_running() {
        // Render the current frame if it has changed
        chip8.present(&mut display)?;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => chip8.stop(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        chip8.step();
        chip8.advance_timers();

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }

    chip8.present(&mut display)?;
    let reason = chip8.halt_reason().unwrap_or(HaltReason::ExternalStop);
    if reason != HaltReason::ExternalStop {
        info!("{}; close the window to exit", reason);
        for event in events.wait_iter() {
            if let Event::Quit { .. } = event {
                break;
            }
        }
    }
    Ok(reason)
}

/// Runs `chip8` without a window, writing every frame to stdout as text.
///
/// There is no keypad, so programs waiting on a key only end via `max_cycles`.
pub fn run_headless(chip8: &mut Chip8, max_cycles: Option<u64>) -> Result<HaltReason> {
    let stdout = io::stdout();
    let mut display = TextDisplay::new(stdout.lock());
    let mut cycles: u64 = 0;
    let reason = chip8.run(&mut display, &mut || {
        cycles += 1;
        max_cycles.map_or(false, |max| cycles > max)
    })?;
    debug!("ran {} cycles", cycles);
    Ok(reason)
}
