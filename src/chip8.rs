use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::config::Config;
use crate::cpu::Cpu;
use crate::display::{Display, FrameBuffer};
use crate::error::Result;
use crate::timer::{Sound, TimerClock};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the `cpu` with its memory, display and timers
///  - the `clocks` that count the timers down in the background
///
/// Supplies interfaces for:
/// - loading roms
/// - starting and stopping the timer clocks
/// - advancing the CPU at the configured clock speed
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    cpu: Cpu,
    config: Config,
    clocks: Vec<TimerClock>,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8 {
            cpu: Cpu::new(&config),
            config,
            clocks: Vec::new(),
        }
    }

    /// Load a rom from a source
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM, read until it is exhausted
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        self.cpu.memory.load_from(reader)
    }

    /// Load a rom from a file
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file = File::open(path)?;
        self.load_rom(&mut BufReader::new(file))
    }

    /// Starts one clock per timer, ticking at the configured timer frequency.
    /// Any clocks already running are stopped first. With a timer frequency
    /// of 0 no clocks are started.
    ///
    /// # Arguments
    /// * `sound` plays the tone while the sound timer runs
    pub fn start_timers(&mut self, sound: Box<dyn Sound>) {
        self.stop_timers();
        let period = match self.config.timer_period() {
            Some(period) => period,
            None => {
                debug!("Timer frequency is 0, timers stay off");
                return;
            }
        };
        self.clocks = vec![
            TimerClock::delay(self.cpu.timers.delay.clone(), period),
            TimerClock::sound(self.cpu.timers.sound.clone(), period, sound),
        ];
    }

    pub fn stop_timers(&mut self) {
        for clock in self.clocks.iter_mut() {
            clock.stop();
        }
        self.clocks.clear();
    }

    /// Advances the CPU by a single cycle
    pub fn advance_cpu(&mut self) -> Result<()> {
        self.cpu.step()
    }

    /// How long a single CPU cycle should take
    pub fn cycle_time(&self) -> Duration {
        self.config.cycle_time()
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if self.cpu.display.take_draw_flag() {
            Some(self.cpu.display.frame())
        } else {
            None
        }
    }

    pub fn display(&self) -> &Display {
        &self.cpu.display
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Drop for Chip8 {
    fn drop(&mut self) {
        self.stop_timers();
    }
}
