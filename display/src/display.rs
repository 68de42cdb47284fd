use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::WindowCanvas;

use chip8_vm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_vm::FrameBuffer;

/// Side length of one Chip-8 pixel on screen
pub const SCALE: u32 = 10;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// Every "on" pixel is drawn as a `SCALE` sized white square.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
    scale: u32,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * SCALE,
                DISPLAY_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display {
            canvas,
            scale: SCALE,
        })
    }

    /// Clears the window and draws the "on" cells of a Chip-8 FrameBuffer.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();
        self.canvas.set_draw_color(Color::WHITE);
        self.canvas.fill_rects(&on_cells(frame, self.scale))?;
        self.canvas.present();
        Ok(())
    }
}

/// One square at (x * scale, y * scale) for each pixel that is on
pub fn on_cells(frame: &FrameBuffer, scale: u32) -> Vec<Rect> {
    frame
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(move |(x, _)| (x, y))
        })
        .map(|(x, y)| {
            Rect::new(
                (x as u32 * scale) as i32,
                (y as u32 * scale) as i32,
                scale,
                scale,
            )
        })
        .collect()
}
