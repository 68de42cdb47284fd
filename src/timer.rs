use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};

/// # Timer
/// An 8-bit counter that counts down to zero.
///
/// Clones share the same counter and the same lock, so the CPU and the
/// clock decrementing the timer always contend on one mutex.
#[derive(Clone, Default)]
pub struct Timer {
    value: Arc<Mutex<u8>>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u8 {
        *self.lock()
    }

    pub fn set(&self, value: u8) {
        *self.lock() = value;
    }

    /// Decrements the timer unless it is already zero.
    /// Returns whether the timer was running before this tick.
    pub fn tick(&self) -> bool {
        let mut value = self.lock();
        if *value > 0 {
            *value -= 1;
            true
        } else {
            false
        }
    }

    // a u8 can't be left half written, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, u8> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Something that can make the tone played while the sound timer runs
pub trait Sound: Send {
    fn beep(&mut self);
}

/// Rings the terminal bell
pub struct Bell;

impl Sound for Bell {
    fn beep(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
    }
}

pub struct Mute;

impl Sound for Mute {
    fn beep(&mut self) {}
}

/// The delay and sound timers
#[derive(Clone, Default)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances both timers by a single tick without any clock thread.
    /// Beeps if the sound timer was still running.
    pub fn tick(&self, sound: &mut dyn Sound) {
        self.delay.tick();
        if self.sound.tick() {
            sound.beep();
        }
    }
}

/// # Timer Clock
/// A background thread that ticks a `Timer` once every `period` until it is
/// stopped. Dropping the clock stops it. A zero `period` never ticks.
pub struct TimerClock {
    name: &'static str,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TimerClock {
    /// Clock for the delay timer
    pub fn delay(timer: Timer, period: Duration) -> Self {
        Self::spawn("delay", timer, period, || {})
    }

    /// Clock for the sound timer; beeps on every tick where the timer was running
    pub fn sound(timer: Timer, period: Duration, mut sound: Box<dyn Sound>) -> Self {
        Self::spawn("sound", timer, period, move || sound.beep())
    }

    fn spawn<F>(name: &'static str, timer: Timer, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            debug!("Started {} timer [period: {:?}]", name, period);
            if period == Duration::from_secs(0) {
                let _ = stopped.recv();
            } else {
                // waiting on the channel doubles as the sleep between ticks
                while let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(period) {
                    if timer.tick() {
                        on_tick();
                    }
                }
            }
            debug!("Stopped {} timer", name);
        });
        TimerClock {
            name,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Signals the clock to stop and waits for its thread to finish
    pub fn stop(&mut self) {
        // dropping the sender wakes the thread with `Disconnected`
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("The {} timer thread panicked", self.name);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerClock {
    fn drop(&mut self) {
        self.stop();
    }
}
