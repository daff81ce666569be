//! Per-column drawing.
//!
//! A [`ColumnRenderer`] turns the samples of one cast ray into draw commands
//! for one vertical strip of the screen. Samples are emitted far to near, so
//! rain streaks of nearer samples are layered on top of the wall slice.

use rand::Rng;

use super::display::{DrawCommand, Rect};
use crate::colors;
use crate::grid::GridView;
use crate::projection::Projector;
use crate::raycast::RaySample;
use crate::texture::Texture;

/// Height (in wall units) of a rain streak.
const RAIN_HEIGHT: f32 = 0.1;
const RAIN_OPACITY: f32 = 0.15;
const RAIN_WIDTH: f32 = 1.0;

/// Index of the first sample that hit a wall, if any.
pub fn hit_index(ray: &[RaySample]) -> Option<usize> {
    ray.iter().position(|sample| sample.height > 0)
}

/// Number of streaks drawn for `drops`: how many of `drops - 1, drops - 2, …`
/// stay positive.
fn streak_count(drops: f32) -> usize {
    if drops > 0.0 {
        (drops.ceil() - 1.0) as usize
    } else {
        0
    }
}

#[derive(Clone, Copy)]
pub struct ColumnRenderer<'a> {
    projector: Projector,
    /// Screen width of one column, unrounded.
    spacing: f32,
    light_range: f32,
    wall: &'a Texture,
}

impl<'a> ColumnRenderer<'a> {
    pub fn new(projector: Projector, spacing: f32, light_range: f32, wall: &'a Texture) -> Self {
        Self {
            projector,
            spacing,
            light_range,
            wall,
        }
    }

    /// Left edge and width of a column on screen.
    pub fn column_bounds(&self, column: usize) -> (f32, f32) {
        ((column as f32 * self.spacing).floor(), self.spacing.ceil())
    }

    /// Builds the draw commands for `column`.
    ///
    /// `angle` is the ray's deviation from the view direction, `ray` its
    /// samples nearest first. Every sample yields exactly one
    /// [`DrawCommand::Streaks`]; the hit sample is preceded by its wall slice
    /// and a black fog overlay whose opacity grows with distance and shading
    /// and drops with the grid's ambient light.
    pub fn render<G, R>(
        &self,
        column: usize,
        ray: &[RaySample],
        angle: f32,
        grid: &G,
        rng: &mut R,
    ) -> Vec<DrawCommand<'a>>
    where
        G: GridView + ?Sized,
        R: Rng + ?Sized,
    {
        let (left, width) = self.column_bounds(column);
        let hit = hit_index(ray);
        let mut commands = Vec::with_capacity(ray.len() + 2);

        for (index, sample) in ray.iter().enumerate().rev() {
            let drops = rng.gen::<f32>().powi(3) * index as f32;

            if hit == Some(index) {
                let wall = self.projector.project(sample.height as f32, angle, sample.distance);
                let texture_x = (self.wall.width() as f32 * sample.offset).floor();
                let span = Rect::new(left, wall.top, width, wall.height);

                commands.push(DrawCommand::Image {
                    image: self.wall,
                    src: Rect::new(texture_x, 0.0, 1.0, self.wall.height() as f32),
                    dst: span,
                });
                commands.push(DrawCommand::Fill {
                    rect: span,
                    color: colors::BLACK,
                    opacity: ((sample.distance + sample.shade()) / self.light_range
                        - grid.ambient_light())
                    .max(0.0),
                });
            }

            let count = streak_count(drops);
            let mut rects = Vec::with_capacity(count);
            if count > 0 {
                let rain = self.projector.project(RAIN_HEIGHT, angle, sample.distance);
                for _ in 0..count {
                    rects.push(Rect::new(
                        left,
                        rng.gen::<f32>() * rain.top,
                        RAIN_WIDTH,
                        rain.height,
                    ));
                }
            }
            commands.push(DrawCommand::Streaks {
                rects,
                color: colors::WHITE,
                opacity: RAIN_OPACITY,
            });
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, EMPTY};
    use crate::math::Vec2;
    use crate::raycast::{cast, Face};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wall_texture() -> Texture {
        Texture::checkerboard(64, 64, 8, colors::WALL_LIGHT, colors::WALL_DARK)
    }

    fn count_images(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count()
    }

    fn count_streak_groups(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Streaks { .. }))
            .count()
    }

    fn sample(distance: f32, height: i32, offset: f32, face: Face) -> RaySample {
        RaySample {
            position: Vec2::ZERO,
            height,
            distance,
            face: Some(face),
            offset,
            length2: 1.0,
        }
    }

    #[test]
    fn streak_count_matches_predecrement_loop() {
        assert_eq!(streak_count(0.0), 0);
        assert_eq!(streak_count(0.4), 0);
        assert_eq!(streak_count(1.0), 0);
        assert_eq!(streak_count(1.5), 1);
        assert_eq!(streak_count(2.0), 1);
        assert_eq!(streak_count(2.5), 2);
    }

    #[test]
    fn no_hit_emits_no_wall_but_streaks_for_every_sample() {
        let grid = Grid::new(64);
        let ray = cast(&grid, Vec2::new(32.5, 32.5), 0.4, 14.0);
        assert_eq!(hit_index(&ray), None);

        let texture = wall_texture();
        let renderer = ColumnRenderer::new(Projector::new(300.0), 2.0, 5.0, &texture);
        let commands = renderer.render(10, &ray, 0.1, &grid, &mut StdRng::seed_from_u64(9));

        assert_eq!(count_images(&commands), 0);
        assert_eq!(count_streak_groups(&commands), ray.len());
        assert_eq!(commands.len(), ray.len());
    }

    #[test]
    fn hit_emits_textured_slice_and_fog() {
        let texture = wall_texture();
        let renderer = ColumnRenderer::new(Projector::new(400.0), 2.5, 5.0, &texture);
        let ray = vec![
            RaySample::origin(Vec2::ZERO),
            sample(1.0, 0, 0.2, Face::West),
            sample(3.0, 1, 0.25, Face::North),
            sample(4.0, 1, 0.9, Face::West),
        ];
        let mut grid = Grid::new(4);
        grid.set_ambient_light(0.2);

        let commands = renderer.render(3, &ray, 0.0, &grid, &mut StdRng::seed_from_u64(1));
        assert_eq!(count_images(&commands), 1);
        assert_eq!(count_streak_groups(&commands), 4);

        let image_at = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Image { .. }))
            .unwrap();
        // Samples are emitted far to near: sample 3's streaks come first.
        assert_eq!(image_at, 1);

        match &commands[image_at] {
            DrawCommand::Image { src, dst, .. } => {
                assert_eq!(src.x, 16.0);
                assert_eq!(src.width, 1.0);
                assert_eq!(src.height, 64.0);
                assert_eq!(dst.x, 7.0);
                assert_eq!(dst.width, 3.0);
                assert_relative_eq!(dst.height, 400.0 / 3.0, epsilon = 1e-3);
                assert_relative_eq!(dst.y, 200.0 * (1.0 - 1.0 / 3.0), epsilon = 1e-3);
            }
            other => panic!("expected image, got {other:?}"),
        }
        match &commands[image_at + 1] {
            DrawCommand::Fill { color, opacity, .. } => {
                assert_eq!(*color, colors::BLACK);
                // (3 + 1) / 5 - 0.2
                assert_relative_eq!(*opacity, 0.6, epsilon = 1e-5);
            }
            other => panic!("expected fog, got {other:?}"),
        }
    }

    #[test]
    fn bright_ambient_light_clears_fog() {
        let texture = wall_texture();
        let renderer = ColumnRenderer::new(Projector::new(400.0), 2.0, 5.0, &texture);
        let ray = vec![RaySample::origin(Vec2::ZERO), sample(2.0, 1, 0.5, Face::East)];
        let mut grid = Grid::new(4);
        grid.set_ambient_light(2.0);

        let commands = renderer.render(0, &ray, 0.0, &grid, &mut StdRng::seed_from_u64(4));
        let fog = commands.iter().find_map(|c| match c {
            DrawCommand::Fill { opacity, .. } => Some(*opacity),
            _ => None,
        });
        assert_eq!(fog, Some(0.0));
    }

    #[test]
    fn streaks_stay_inside_column_and_above_rain_top() {
        let mut grid = Grid::new(32);
        grid.populate(&mut StdRng::seed_from_u64(2), 0.1, Vec2::new(16.5, 16.5));
        let ray = cast(&grid, Vec2::new(16.5, 16.5), 1.1, 14.0);
        let texture = wall_texture();
        let renderer = ColumnRenderer::new(Projector::new(300.0), 3.0, 5.0, &texture);
        let projector = Projector::new(300.0);

        let mut rng = StdRng::seed_from_u64(77);
        let commands = renderer.render(5, &ray, 0.2, &grid, &mut rng);
        // Walk commands back to their sample index (far to near).
        let groups: Vec<&Vec<Rect>> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Streaks { rects, .. } => Some(rects),
                _ => None,
            })
            .collect();
        assert!(groups.last().unwrap().is_empty(), "origin sample never rains");
        for (group, sample) in groups.iter().zip(ray.iter().rev()) {
            for rect in group.iter() {
                let rain = projector.project(RAIN_HEIGHT, 0.2, sample.distance);
                assert_eq!(rect.x, 15.0);
                assert_eq!(rect.width, RAIN_WIDTH);
                assert_relative_eq!(rect.height, rain.height, epsilon = 1e-4);
                assert!(rect.y <= rain.top.max(0.0) + 1e-4);
            }
        }
    }

    #[test]
    fn hit_index_skips_out_of_bounds_and_empty() {
        let ray = vec![
            RaySample::origin(Vec2::ZERO),
            sample(1.0, EMPTY, 0.0, Face::West),
            sample(2.0, -1, 0.0, Face::West),
            sample(3.0, 2, 0.0, Face::West),
        ];
        assert_eq!(hit_index(&ray), Some(3));
        assert_eq!(hit_index(&ray[..3]), None);
    }
}
