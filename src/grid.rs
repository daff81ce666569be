//! Tile map of wall and empty cells.
//!
//! The [`Grid`] is a square, row-major array of integer cell codes. The
//! renderer only ever reads it through the [`GridView`] trait; the mutating
//! helpers here ([`Grid::populate`], [`Grid::update`]) are driven by the game
//! loop, never by the ray caster.

use rand::Rng;
use tracing::debug;

use crate::math::Vec2;

/// Code reported for coordinates outside `[0, size)` on either axis.
pub const OUT_OF_BOUNDS: i32 = -1;
/// Code of an empty cell.
pub const EMPTY: i32 = 0;
/// Code written for walls by [`Grid::populate`].
pub const WALL: i32 = 1;

/// Ambient light value set by a lightning strike.
const LIGHTNING_FLASH: f32 = 2.0;
/// Ambient light lost per second while a flash fades.
const LIGHTNING_DECAY: f32 = 10.0;
/// Average seconds between strikes.
const LIGHTNING_INTERVAL: f32 = 5.0;

/// Read-only access to a tile map, as consumed by the renderer.
pub trait GridView {
    /// Cell code at continuous coordinates, or [`OUT_OF_BOUNDS`].
    fn height_at(&self, x: f32, y: f32) -> i32;

    /// Number of cells along each axis.
    fn size(&self) -> usize;

    /// Current ambient light scalar (0 when dark).
    fn ambient_light(&self) -> f32;
}

#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<i32>,
    light: f32,
}

impl Grid {
    /// Creates an empty `size × size` grid.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be non-zero");
        Self {
            size,
            cells: vec![EMPTY; size * size],
            light: 0.0,
        }
    }

    /// Creates a grid from row-major cell codes (`cells[y * size + x]`).
    ///
    /// # Panics
    /// Panics if `size` is zero or `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<i32>) -> Self {
        assert!(size > 0, "grid size must be non-zero");
        assert_eq!(
            cells.len(),
            size * size,
            "cell count doesn't match grid dimensions"
        );
        Self {
            size,
            cells,
            light: 0.0,
        }
    }

    /// Fills every cell with a wall with probability `wall_density`.
    ///
    /// The cell containing `spawn` is left empty so the player never starts
    /// inside a wall.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, wall_density: f32, spawn: Vec2) {
        for cell in self.cells.iter_mut() {
            *cell = if rng.gen::<f32>() < wall_density {
                WALL
            } else {
                EMPTY
            };
        }
        if let Some(index) = self.index(spawn.x, spawn.y) {
            self.cells[index] = EMPTY;
        }
        debug!(
            size = self.size,
            walls = self.cells.iter().filter(|&&c| c > 0).count(),
            "populated grid"
        );
    }

    /// Advances the lightning effect by `seconds`.
    ///
    /// A lit grid fades back to dark; a dark grid is struck on average once
    /// every few seconds.
    pub fn update<R: Rng + ?Sized>(&mut self, seconds: f32, rng: &mut R) {
        if self.light > 0.0 {
            self.light = (self.light - LIGHTNING_DECAY * seconds).max(0.0);
        } else if rng.gen::<f32>() * LIGHTNING_INTERVAL < seconds {
            debug!("lightning strike");
            self.light = LIGHTNING_FLASH;
        }
    }

    pub fn set_ambient_light(&mut self, light: f32) {
        self.light = light;
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Row-major index of the cell containing `(x, y)`, truncating toward zero.
    fn index(&self, x: f32, y: f32) -> Option<usize> {
        let (x, y) = (x as i32, y as i32);
        let size = self.size as i32;
        if x < 0 || x >= size || y < 0 || y >= size {
            return None;
        }
        Some(y as usize * self.size + x as usize)
    }
}

impl GridView for Grid {
    #[inline]
    fn height_at(&self, x: f32, y: f32) -> i32 {
        self.index(x, y)
            .map_or(OUT_OF_BOUNDS, |index| self.cells[index])
    }

    fn size(&self) -> usize {
        self.size
    }

    fn ambient_light(&self) -> f32 {
        self.light
    }
}
