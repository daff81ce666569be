//! Whole-frame rendering: sky, wall columns, weapon sprite.

use std::f32::consts::TAU;

use rand::Rng;

use super::column::ColumnRenderer;
use super::display::{DisplayAdapter, Rect};
use crate::assets::Assets;
use crate::colors;
use crate::config::GraphicsConfig;
use crate::grid::GridView;
use crate::player::Pose;
use crate::projection::Projector;
use crate::raycast::cast;

/// Ambient light to sky-wash opacity.
const AMBIENT_WASH: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    resolution: usize,
    focal_length: f32,
    range: f32,
    light_range: f32,
}

impl FrameRenderer {
    /// # Panics
    /// Panics if `resolution` is zero.
    pub fn new(resolution: usize, focal_length: f32, range: f32, light_range: f32) -> Self {
        assert!(resolution > 0, "resolution must be at least one column");
        Self {
            resolution,
            focal_length,
            range,
            light_range,
        }
    }

    pub fn from_config(config: &GraphicsConfig) -> Self {
        Self::new(
            config.resolution,
            config.focal_length,
            config.range,
            config.light_range,
        )
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Angle of a column's ray relative to the view direction.
    pub fn column_angle(&self, column: usize) -> f32 {
        let x = column as f32 / self.resolution as f32 - 0.5;
        x.atan2(self.focal_length)
    }

    pub fn render<D, G, R>(
        &self,
        pose: &Pose,
        grid: &G,
        assets: &Assets,
        display: &mut D,
        rng: &mut R,
    ) where
        D: DisplayAdapter + ?Sized,
        G: GridView + ?Sized,
        R: Rng + ?Sized,
    {
        self.draw_sky(pose.direction, assets, grid.ambient_light(), display);
        self.draw_columns(pose, grid, assets, display, rng);
        self.draw_weapon(pose.paces, assets, display);
    }

    /// Panorama scrolled by view direction, plus a lightning wash on the
    /// lower half when the grid is lit.
    fn draw_sky<D: DisplayAdapter + ?Sized>(
        &self,
        direction: f32,
        assets: &Assets,
        ambient: f32,
        display: &mut D,
    ) {
        let (view_width, view_height) = display.measure();
        let sky = &assets.sky;
        let width = sky.width() as f32 * (view_height / sky.height() as f32) * 2.0;
        let left = (direction / TAU) * -width;
        let src = Rect::of_texture(sky);

        display.draw_image_region(sky, src, Rect::new(left, 0.0, width, view_height));
        if left + width < view_width {
            display.draw_image_region(sky, src, Rect::new(left + width, 0.0, width, view_height));
        }
        if ambient > 0.0 {
            display.fill_rect(
                Rect::new(0.0, view_height * 0.5, view_width, view_height * 0.5),
                colors::WHITE,
                ambient * AMBIENT_WASH,
            );
        }
    }

    fn draw_columns<D, G, R>(
        &self,
        pose: &Pose,
        grid: &G,
        assets: &Assets,
        display: &mut D,
        rng: &mut R,
    ) where
        D: DisplayAdapter + ?Sized,
        G: GridView + ?Sized,
        R: Rng + ?Sized,
    {
        let (view_width, view_height) = display.measure();
        let columns = ColumnRenderer::new(
            Projector::new(view_height),
            view_width / self.resolution as f32,
            self.light_range,
            &assets.wall,
        );

        for column in 0..self.resolution {
            let angle = self.column_angle(column);
            let ray = cast(grid, pose.position, pose.direction + angle, self.range);
            for command in columns.render(column, &ray, angle, grid, rng) {
                command.execute(display);
            }
        }
    }

    /// Weapon sprite, bobbing with the distance walked.
    fn draw_weapon<D: DisplayAdapter + ?Sized>(&self, paces: f32, assets: &Assets, display: &mut D) {
        let (view_width, view_height) = display.measure();
        let weapon = &assets.weapon;
        let scale = (view_width + view_height) / 1200.0;
        let bob_x = (paces * 2.0).cos() * scale * 6.0;
        let bob_y = (paces * 4.0).sin() * scale * 6.0;

        display.draw_image_region(
            weapon,
            Rect::of_texture(weapon),
            Rect::new(
                view_width * 0.66 + bob_x,
                view_height * 0.6 + bob_y,
                weapon.width() as f32 * scale,
                weapon.height() as f32 * scale,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::math::Vec2;
    use crate::render::display::recording::{Call, Recorder};
    use crate::render::Canvas;
    use crate::texture::Texture;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn assets() -> Assets {
        Assets {
            sky: Texture::solid(200, 75, 0xFF336699),
            wall: Texture::solid(16, 16, 0xFF996633),
            weapon: Texture::solid(10, 20, 0xFFAAAAAA),
        }
    }

    fn pose(direction: f32) -> Pose {
        Pose {
            position: Vec2::new(2.5, 2.5),
            direction,
            paces: 0.0,
        }
    }

    /// Grid of size 5 with walls on every border cell.
    fn room() -> Grid {
        let cells = (0..25)
            .map(|i| {
                let (x, y) = (i % 5, i / 5);
                i32::from(x == 0 || y == 0 || x == 4 || y == 4)
            })
            .collect();
        Grid::from_cells(5, cells)
    }

    #[test]
    fn column_angles_are_symmetric_about_center() {
        let renderer = FrameRenderer::new(4, 0.8, 14.0, 5.0);
        assert_relative_eq!(renderer.column_angle(0), (-0.5f32).atan2(0.8));
        assert_relative_eq!(renderer.column_angle(2), 0.0);
        assert_relative_eq!(renderer.column_angle(1), -renderer.column_angle(3), epsilon = 1e-6);
    }

    #[test]
    fn every_column_in_a_closed_room_draws_one_wall_slice() {
        let renderer = FrameRenderer::new(32, 0.8, 14.0, 5.0);
        let mut recorder = Recorder::new(320.0, 200.0);
        renderer.render(&pose(0.7), &room(), &assets(), &mut recorder, &mut StdRng::seed_from_u64(3));

        let wall_slices = recorder
            .images()
            .filter(|c| matches!(c, Call::Image { size: (16, 16), .. }))
            .count();
        assert_eq!(wall_slices, 32);
    }

    #[test]
    fn sky_is_drawn_first_and_weapon_last() {
        let renderer = FrameRenderer::new(8, 0.8, 14.0, 5.0);
        let mut recorder = Recorder::new(320.0, 200.0);
        renderer.render(&pose(0.0), &room(), &assets(), &mut recorder, &mut StdRng::seed_from_u64(5));

        assert!(matches!(recorder.calls[0], Call::Image { size: (200, 75), .. }));
        match recorder.calls.last().unwrap() {
            Call::Image { size, dst, .. } => {
                assert_eq!(*size, (10, 20));
                // scale = (320 + 200) / 1200, bob_x = cos(0) * scale * 6
                let scale = 520.0 / 1200.0;
                assert_relative_eq!(dst.x, 320.0 * 0.66 + scale * 6.0, epsilon = 1e-3);
                assert_relative_eq!(dst.y, 200.0 * 0.6, epsilon = 1e-3);
                assert_relative_eq!(dst.width, 10.0 * scale, epsilon = 1e-4);
            }
            other => panic!("expected weapon, got {other:?}"),
        }
    }

    #[test]
    fn sky_wraps_with_second_copy() {
        let renderer = FrameRenderer::new(1, 0.8, 1.0, 5.0);
        let assets = assets();
        // Sky width = 200 * (200 / 75) * 2 ≈ 1066.7
        let mut facing_start = Recorder::new(320.0, 200.0);
        renderer.draw_sky(0.0, &assets, 0.0, &mut facing_start);
        assert_eq!(facing_start.calls.len(), 1);

        let mut facing_back = Recorder::new(320.0, 200.0);
        renderer.draw_sky(1.5 * PI, &assets, 0.0, &mut facing_back);
        assert_eq!(facing_back.calls.len(), 2);
        match (&facing_back.calls[0], &facing_back.calls[1]) {
            (Call::Image { dst: a, .. }, Call::Image { dst: b, .. }) => {
                assert_relative_eq!(a.x, -0.75 * a.width, epsilon = 1e-2);
                assert_relative_eq!(b.x, a.x + a.width, epsilon = 1e-2);
            }
            other => panic!("expected two sky images, got {other:?}"),
        }
    }

    #[test]
    fn lightning_washes_lower_half() {
        let renderer = FrameRenderer::new(1, 0.8, 1.0, 5.0);
        let mut recorder = Recorder::new(320.0, 200.0);
        renderer.draw_sky(0.0, &assets(), 2.0, &mut recorder);
        assert_eq!(
            recorder.calls[1],
            Call::Fill {
                rect: Rect::new(0.0, 100.0, 320.0, 100.0),
                color: colors::WHITE,
                opacity: 0.2,
            }
        );
    }

    #[test]
    fn renders_into_canvas() {
        let renderer = FrameRenderer::new(40, 0.8, 8.0, 5.0);
        let mut canvas = Canvas::new(80, 60);
        canvas.clear(0);
        renderer.render(&pose(1.0), &room(), &assets(), &mut canvas, &mut StdRng::seed_from_u64(8));

        // Sky covers the top row, every pixel is opaque afterward.
        assert_eq!(canvas.pixel(0, 0).map(|c| c >> 24), Some(0xFF));
        assert!(canvas
            .as_bytes()
            .chunks(4)
            .all(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24 == 0xFF));
    }

    #[test]
    #[should_panic]
    fn zero_resolution_panics() {
        let _ = FrameRenderer::new(0, 0.8, 14.0, 5.0);
    }
}
