//! Small math types shared by the grid, ray caster and player.

pub mod vec2;

pub use vec2::Vec2;
