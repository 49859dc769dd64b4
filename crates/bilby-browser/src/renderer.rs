//! Software rasterizer: executes a display list onto a pixel buffer.
//!
//! The renderer knows nothing about CSS, layout, or the DOM. It executes
//! fill commands in order - the display list is back to front, so plain
//! last-write-wins overwriting produces correct stacking. There is no
//! antialiasing and no alpha compositing; the dialect paints hard-edged,
//! fully-resolved rectangles.

use std::path::Path;

use anyhow::{Context, Result};
use bilby_css::{ColorValue, DisplayCommand, DisplayList};
use image::{ImageBuffer, Rgba, RgbaImage};

/// Software renderer that executes a display list to an RGBA buffer.
pub struct Renderer {
    /// RGBA pixel buffer, white-initialized.
    buffer: RgbaImage,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
}

impl Renderer {
    /// Create a renderer with a white `width` x `height` canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let white = ColorValue::WHITE;
        let buffer =
            ImageBuffer::from_pixel(width, height, Rgba([white.r, white.g, white.b, white.a]));
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Execute a display list, drawing all commands to the pixel buffer.
    ///
    /// Commands execute in list order (back to front).
    pub fn render(&mut self, display_list: &DisplayList) {
        for command in display_list.commands() {
            self.execute_command(command);
        }
    }

    /// Execute a single display command.
    fn execute_command(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::FillRect { rect, color } => {
                self.fill_rect(rect.x, rect.y, rect.width, rect.height, *color);
            }
        }
    }

    /// Fill a rectangle with the given color, clipped to the canvas.
    ///
    /// Every row and every column of the clipped range is written - the
    /// whole area, not just its corners - and each write replaces the pixel
    /// outright.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: ColorValue) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        // Clip the rectangle to the canvas boundaries.
        let x0 = x.clamp(0.0, self.width as f32) as u32;
        let y0 = y.clamp(0.0, self.height as f32) as u32;
        let x1 = (x + width).clamp(0.0, self.width as f32) as u32;
        let y1 = (y + height).clamp(0.0, self.height as f32) as u32;

        let rgba = Rgba([color.r, color.g, color.b, color.a]);
        for py in y0..y1 {
            for px in x0..x1 {
                self.buffer.put_pixel(px, py, rgba);
            }
        }
    }

    /// The color currently at pixel (x, y), if inside the canvas.
    #[must_use]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<ColorValue> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.buffer.get_pixel(x, y);
        Some(ColorValue { r, g, b, a })
    }

    /// Consume the renderer, returning the pixel buffer.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Save the rendered image to a file (format chosen by extension).
    ///
    /// # Errors
    ///
    /// Returns an error when the image cannot be encoded or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save(path)
            .with_context(|| format!("failed to save render to '{}'", path.display()))
    }
}
