//! Game state and per-frame update.
//!
//! The [`Engine`] owns everything a frame needs: the grid, the player, the
//! frame renderer, the software canvas, the textures and the random source.
//! The host loop feeds it held controls and elapsed time; it never reads the
//! clock or the keyboard itself.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::math::Vec2;
use crate::player::{Controls, Player};
use crate::render::{Canvas, FrameRenderer};

pub struct Engine {
    grid: Grid,
    player: Player,
    renderer: FrameRenderer,
    canvas: Canvas,
    assets: Assets,
    rng: StdRng,
}

impl Engine {
    /// Builds a populated world from `config`.
    ///
    /// With `config.world.seed` set, the map, lightning and rain are
    /// reproducible.
    pub fn new(config: &GameConfig, assets: Assets) -> Self {
        let mut rng = match config.world.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let [x, y] = config.player.start_position;
        let spawn = Vec2::new(x, y);
        let mut grid = Grid::new(config.world.grid_size);
        grid.populate(&mut rng, config.world.wall_density, spawn);

        let mut player = Player::new(spawn, config.player.start_direction);
        player.move_speed = config.player.move_speed;
        player.turn_speed = config.player.turn_speed;

        info!(
            grid_size = config.world.grid_size,
            resolution = config.graphics.resolution,
            seed = ?config.world.seed,
            "engine ready"
        );

        Self {
            grid,
            player,
            renderer: FrameRenderer::from_config(&config.graphics),
            canvas: Canvas::new(config.graphics.window_width, config.graphics.window_height),
            assets,
            rng,
        }
    }

    /// Advances the world by `seconds` and renders a frame.
    pub fn tick(&mut self, controls: &Controls, seconds: f32) {
        self.grid.update(seconds, &mut self.rng);
        self.player.update(controls, &self.grid, seconds);
        self.render();
    }

    /// Renders the current state without advancing it.
    pub fn render(&mut self) {
        self.renderer.render(
            self.player.pose(),
            &self.grid,
            &self.assets,
            &mut self.canvas,
            &mut self.rng,
        );
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.canvas.as_bytes()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}
