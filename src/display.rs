use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; `true` is an "on" pixel
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// A 64x32 monochrome pixel grid addressed by column `x` and row `y`.
///
/// Coordinates must be within `0..DISPLAY_WIDTH` and `0..DISPLAY_HEIGHT`;
/// the CPU clips sprites before they get here.
///
/// Remembers whether it has changed since the last time its frame was taken
/// so a renderer only has to redraw when there is something new.
pub struct Display {
    frame_buffer: FrameBuffer,
    draw_flag: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.frame_buffer[y][x] = on;
        self.draw_flag = true;
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Checks and clears the draw flag
    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.draw_flag, false)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
