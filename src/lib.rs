//! A first-person ray-casting renderer for tile maps.
//!
//! For each screen column a ray is marched across the grid from the player's
//! position; the first wall it meets is projected into a vertical textured
//! strip, darkened by distance and face orientation, with rain streaks and a
//! lightning flash layered on top. Everything is drawn on the CPU; SDL2 is
//! used only for the window and presentation.
//!
//! # Quick Start
//!
//! ```ignore
//! use raycaster::prelude::*;
//!
//! let config = GameConfig::load(DEFAULT_CONFIG_PATH)?;
//! let mut engine = Engine::new(&config, Assets::load_or_placeholder(&config.assets));
//! engine.tick(&Controls::default(), 1.0 / 60.0);
//! ```

// Public API - exposed to library consumers
pub mod assets;
pub mod colors;
pub mod config;
pub mod engine;
pub mod grid;
pub mod math;
pub mod player;
pub mod projection;
pub mod raycast;
pub mod render;
pub mod texture;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use engine::Engine;
pub use grid::{Grid, GridView};
pub use projection::{ProjectedSpan, Projector};
pub use raycast::{cast, RaySample};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use raycaster::prelude::*;
/// ```
pub mod prelude {
    // Assets & configuration
    pub use crate::assets::{Assets, LoadError};
    pub use crate::config::{GameConfig, DEFAULT_CONFIG_PATH};

    // Engine
    pub use crate::engine::Engine;

    // World
    pub use crate::grid::{Grid, GridView};
    pub use crate::math::Vec2;
    pub use crate::player::{Controls, Player, Pose};

    // Ray casting & projection
    pub use crate::projection::{ProjectedSpan, Projector};
    pub use crate::raycast::{cast, Face, Ray, RaySample};

    // Rendering
    pub use crate::render::{Canvas, ColumnRenderer, DisplayAdapter, DrawCommand, FrameRenderer, Rect};
    pub use crate::texture::Texture;

    // Window & timing
    pub use crate::window::{FrameClock, FrameLimiter, Window, WindowEvent};
}
