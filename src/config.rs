use std::time::Duration;

use crate::constants::{CLOCK_SPEED, TIMER_FREQUENCY};

/// What the CPU does with an opcode it has no instruction for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Log it and carry on with the next opcode
    Skip,
    /// Stop with `Error::UnknownOpcode`
    Fail,
}

/// # Config
/// Knobs for a Chip-8 machine.
///
/// - `clock_speed` CPU steps per second
/// - `timer_frequency` delay/sound timer ticks per second; 0 turns the timer
///   clocks off
/// - `unknown_opcodes` see `UnknownOpcodePolicy`
/// - `seed` fixes the random source used by `Cxkk`; `None` seeds from the OS
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub clock_speed: u32,
    pub timer_frequency: u32,
    pub unknown_opcodes: UnknownOpcodePolicy,
    pub seed: Option<u64>,
}

impl Config {
    /// Time between two CPU steps
    pub fn cycle_time(&self) -> Duration {
        period(self.clock_speed)
    }

    /// Time between two timer ticks, or `None` if the timers don't run
    pub fn timer_period(&self) -> Option<Duration> {
        if self.timer_frequency == 0 {
            None
        } else {
            Some(period(self.timer_frequency))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_frequency: TIMER_FREQUENCY,
            unknown_opcodes: UnknownOpcodePolicy::Skip,
            seed: None,
        }
    }
}

// a frequency of 0 means "as fast as possible"
fn period(hz: u32) -> Duration {
    if hz == 0 {
        Duration::from_secs(0)
    } else {
        Duration::from_nanos(1_000_000_000 / u64::from(hz))
    }
}
