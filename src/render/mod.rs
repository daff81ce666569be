//! Frame rendering.
//!
//! - [`FrameRenderer`]: sky, one ray-cast column per screen strip, weapon sprite
//! - [`ColumnRenderer`]: draw commands for a single column
//! - [`DisplayAdapter`]: the output surface; [`Canvas`] is the software one

mod canvas;
mod column;
pub(crate) mod display;
mod frame;

pub use canvas::Canvas;
pub use column::{hit_index, ColumnRenderer};
pub use display::{DisplayAdapter, DrawCommand, Rect};
pub use frame::FrameRenderer;
