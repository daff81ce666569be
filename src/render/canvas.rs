//! Software drawing surface.
//!
//! Provides the [`Canvas`] struct which owns the color buffer and implements
//! [`DisplayAdapter`] with per-pixel alpha blending.

use super::display::{DisplayAdapter, Rect};
use crate::colors;
use crate::texture::Texture;

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Returns the frame as bytes (ARGB8888, native endian) for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // byte slice covers exactly the buffer's memory and borrows it.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: u32, opacity: f32) {
        let index = (y * self.width + x) as usize;
        self.color_buffer[index] = colors::blend(self.color_buffer[index], color, opacity);
    }

    /// Pixel columns (or rows) whose centers fall inside `[start, start + len)`,
    /// clipped to `[0, limit)`.
    #[inline]
    fn covered(start: f32, len: f32, limit: u32) -> std::ops::Range<u32> {
        if !(len > 0.0) {
            return 0..0;
        }
        let first = (start - 0.5).ceil().max(0.0);
        let last = (start + len - 0.5).ceil().min(limit as f32);
        if first >= last {
            return 0..0;
        }
        (first as u32)..(last as u32)
    }
}

impl DisplayAdapter for Canvas {
    /// Nearest-neighbor stretch of `src` onto `dst`, honoring texel alpha.
    fn draw_image_region(&mut self, image: &Texture, src: Rect, dst: Rect) {
        let columns = Self::covered(dst.x, dst.width, self.width);
        let rows = Self::covered(dst.y, dst.height, self.height);
        let scale_x = src.width / dst.width;
        let scale_y = src.height / dst.height;

        for y in rows {
            let v = src.y + (y as f32 + 0.5 - dst.y) * scale_y;
            let ty = v.floor() as i64;
            for x in columns.clone() {
                let u = src.x + (x as f32 + 0.5 - dst.x) * scale_x;
                let texel = image.texel(u.floor() as i64, ty);
                let alpha = texel >> 24;
                if alpha == 0 {
                    continue;
                }
                self.blend_pixel(x, y, texel, alpha as f32 / 255.0);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: u32, opacity: f32) {
        if !(opacity > 0.0) {
            return;
        }
        let columns = Self::covered(rect.x, rect.width, self.width);
        for y in Self::covered(rect.y, rect.height, self.height) {
            for x in columns.clone() {
                self.blend_pixel(x, y, color, opacity);
            }
        }
    }

    fn measure(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}
