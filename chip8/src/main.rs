use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use chip8_core::constants::STACK_DEPTH;
use chip8_core::{Chip8, Config, Resolution, CLOCK_SPEED};

mod keymap;
mod run;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionArg {
    /// 64x32
    Classic,
    /// 128x64
    Extended,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Classic => Resolution::Classic,
            ResolutionArg::Extended => Resolution::Extended,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Runs a CHIP-8 program", long_about = None)]
struct Args {
    /// Path to a CHIP-8 program image
    rom: PathBuf,

    /// Size of the display
    #[arg(long, value_enum, default_value_t = ResolutionArg::Classic)]
    resolution: ResolutionArg,

    /// Maximum number of nested subroutine calls
    #[arg(long, default_value_t = STACK_DEPTH)]
    stack_depth: usize,

    /// Window pixels per CHIP-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: usize,

    /// Instructions per second
    #[arg(long, default_value_t = 1_000_000_000 / CLOCK_SPEED, value_parser = clap::value_parser!(u64).range(1..))]
    clock_hz: u64,

    /// Write frames to stdout as text instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many instructions
    #[arg(long)]
    max_cycles: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut chip8 = Chip8::with_config(Config {
        resolution: args.resolution.into(),
        stack_depth: args.stack_depth,
    });

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", args.rom.display()))?;

    let reason = if args.headless {
        run::run_headless(&mut chip8, args.max_cycles)?
    } else {
        run::run(&mut chip8, args.scale, args.clock_hz)?
    };
    info!("halted at {:#05X}: {}", chip8.state().pc, reason);
    Ok(())
}
