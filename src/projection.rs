//! Wall projection into screen space.
//!
//! The [`Projector`] turns a wall code and the radial distance of a ray hit
//! into the vertical span the wall occupies on screen. Radial distances are
//! first converted to perpendicular depth (`distance × cos(angle)`), which
//! keeps straight walls straight instead of bulging toward the screen center.

/// Vertical screen-space interval covered by a projected wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSpan {
    pub top: f32,
    pub height: f32,
}

impl ProjectedSpan {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    viewport_height: f32,
}

impl Projector {
    pub fn new(viewport_height: f32) -> Self {
        Self { viewport_height }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Projects a wall of `wall_height` seen at `distance` along a ray that
    /// deviates `angle` radians from the view direction.
    ///
    /// # Panics
    /// Panics if the perpendicular depth is not positive (wall behind or at
    /// the viewer).
    pub fn project(&self, wall_height: f32, angle: f32, distance: f32) -> ProjectedSpan {
        let z = distance * angle.cos();
        assert!(z > 0.0, "projected depth must be positive, got {z}");

        let height = self.viewport_height * wall_height / z;
        let bottom = self.viewport_height / 2.0 * (1.0 + 1.0 / z);
        ProjectedSpan {
            top: bottom - height,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn straight_ahead_matches_hand_computed_values() {
        let span = Projector::new(400.0).project(1.0, 0.0, 5.0);
        assert_relative_eq!(span.height, 80.0, epsilon = 1e-4);
        assert_relative_eq!(span.top, 160.0, epsilon = 1e-4);
        assert_relative_eq!(span.bottom(), 240.0, epsilon = 1e-4);
    }

    #[test]
    fn unit_walls_straight_ahead_reduce_to_closed_form() {
        let projector = Projector::new(300.0);
        for d in [0.5, 2.0, 7.5, 13.0] {
            let span = projector.project(1.0, 0.0, d);
            assert_relative_eq!(span.top, 150.0 * (1.0 - 1.0 / d), epsilon = 1e-3);
            assert_relative_eq!(span.height, 300.0 / d, epsilon = 1e-3);
        }
    }

    #[test]
    fn taller_walls_grow_upward_from_the_same_base() {
        let projector = Projector::new(300.0);
        let low = projector.project(1.0, 0.0, 3.0);
        let high = projector.project(2.0, 0.0, 3.0);
        assert_relative_eq!(low.bottom(), high.bottom(), epsilon = 1e-3);
        assert_relative_eq!(high.height, 2.0 * low.height, epsilon = 1e-3);
    }

    #[test]
    fn oblique_rays_are_fisheye_corrected() {
        // A flat wall 4 units ahead, seen along a ray 0.5 rad off-axis, has
        // radial distance 4 / cos(0.5) but must project like one at depth 4.
        let projector = Projector::new(480.0);
        let angle: f32 = 0.5;
        let straight = projector.project(1.0, 0.0, 4.0);
        let oblique = projector.project(1.0, angle, 4.0 / angle.cos());
        assert_relative_eq!(straight.top, oblique.top, epsilon = 1e-3);
        assert_relative_eq!(straight.height, oblique.height, epsilon = 1e-3);
    }

    #[test]
    #[should_panic]
    fn zero_depth_panics() {
        Projector::new(400.0).project(1.0, 0.0, 0.0);
    }
}
