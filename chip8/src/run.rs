use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_display::Display;
use chip8_vm::{Bell, Chip8, Config};

/// The display is redrawn at most this often
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

pub fn run(rom: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new(Config::default());

    // Load ROM
    let size = chip8.load_rom_file(&rom)?;
    info!("Loaded ROM {} [size: {}]", rom.display(), size);

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl)?;
    let mut events = sdl.event_pump()?;

    chip8.start_timers(Box::new(Bell));

    // Set initial timing
    let cycle_time = chip8.cycle_time();
    let mut last_cycle = Instant::now();
    let mut last_frame = Instant::now();

    'event: loop {
        // Render the current frame if it changed since the last one
        if last_frame.elapsed() >= FRAME_TIME {
            if let Some(frame) = chip8.get_frame() {
                display.render(frame)?;
            }
            last_frame = Instant::now();
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                _ => continue,
            };
        }

        // Update state
        chip8.advance_cpu()?;

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if cycle_time > elapsed_cycle_time {
            thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    chip8.stop_timers();
    Ok(())
}
