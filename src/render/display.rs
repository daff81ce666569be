//! Drawing surface abstraction.
//!
//! The renderer never touches pixels directly. It describes what to draw as
//! [`DrawCommand`]s and replays them on anything implementing
//! [`DisplayAdapter`]: the software [`Canvas`](super::Canvas) in the game, a
//! recorder in tests.

use crate::texture::Texture;

/// Axis-aligned rectangle in screen (or texture) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of `texture`.
    pub fn of_texture(texture: &Texture) -> Self {
        Self::new(0.0, 0.0, texture.width() as f32, texture.height() as f32)
    }
}

/// Output capabilities required by the frame renderer.
pub trait DisplayAdapter {
    /// Draw the `src` region of `image` stretched over `dst`.
    fn draw_image_region(&mut self, image: &Texture, src: Rect, dst: Rect);

    /// Fill `rect` with `color` at `opacity` (clamped to `[0, 1]`).
    fn fill_rect(&mut self, rect: Rect, color: u32, opacity: f32);

    /// Size of the drawing surface as `(width, height)`.
    fn measure(&self) -> (f32, f32);
}

/// One deferred draw call.
#[derive(Debug, Clone)]
pub enum DrawCommand<'a> {
    Image {
        image: &'a Texture,
        src: Rect,
        dst: Rect,
    },
    Fill {
        rect: Rect,
        color: u32,
        opacity: f32,
    },
    /// Atmospheric streaks layered over one ray sample. May be empty.
    Streaks {
        rects: Vec<Rect>,
        color: u32,
        opacity: f32,
    },
}

impl DrawCommand<'_> {
    pub fn execute<D: DisplayAdapter + ?Sized>(&self, display: &mut D) {
        match self {
            DrawCommand::Image { image, src, dst } => display.draw_image_region(image, *src, *dst),
            DrawCommand::Fill {
                rect,
                color,
                opacity,
            } => display.fill_rect(*rect, *color, *opacity),
            DrawCommand::Streaks {
                rects,
                color,
                opacity,
            } => {
                for rect in rects {
                    display.fill_rect(*rect, *color, *opacity);
                }
            }
        }
    }
}
