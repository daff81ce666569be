//! Grid ray casting.
//!
//! A ray is marched from grid line to grid line: at every step the next
//! crossing of a vertical line (`x` integer) and of a horizontal line (`y`
//! integer) are computed, and the nearer one becomes the next [`RaySample`].
//! Each sample records the code of the cell the ray enters, the accumulated
//! distance from the ray origin, which face of that cell was crossed, and the
//! fractional position along the face (used to pick a texture column).
//!
//! ```text
//!        x=1       x=2
//!         |         |
//!   ------+---------+------ y=1
//!         |   .     |
//!         | .       |
//!   ------*---------+------ y=2     * = horizontal crossing
//!       . |         |
//!     o   |         |               o = origin
//! ```
//!
//! This is an incremental DDA walk; the result is an ordered `Vec`, nearest
//! sample first, with non-decreasing distance.

use crate::grid::GridView;
use crate::math::Vec2;

/// The cell face a ray crossed to produce a sample.
///
/// Faces are named for a map drawn with `y` growing downward: a ray moving
/// toward `+x` enters the next cell through its west face, a ray moving toward
/// `+y` through its north face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    West,
    East,
    North,
    South,
}

impl Face {
    /// Brightness tier added to the distance when fogging a wall.
    ///
    /// Larger values render darker.
    pub fn shade(self) -> f32 {
        match self {
            Face::West => 0.0,
            Face::East => 2.0,
            Face::North => 1.0,
            Face::South => 2.0,
        }
    }

    /// Whether this face lies on a vertical grid line (`x` integer).
    pub fn is_vertical(self) -> bool {
        matches!(self, Face::West | Face::East)
    }
}

/// One grid-line crossing along a cast ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub position: Vec2,
    /// Code of the cell entered at this crossing (0 at the origin).
    pub height: i32,
    /// Distance along the ray from its origin.
    pub distance: f32,
    /// Face crossed, `None` for the origin sample.
    pub face: Option<Face>,
    /// Fractional position along the crossed face, in `[0, 1)`.
    pub offset: f32,
    /// Squared length of the step that produced this sample.
    pub length2: f32,
}

/// Candidate used for an axis the ray never crosses.
pub const NO_WALL: RaySample = RaySample {
    position: Vec2::ZERO,
    height: 0,
    distance: 0.0,
    face: None,
    offset: 0.0,
    length2: f32::INFINITY,
};

impl RaySample {
    /// The zero-distance sample every ray starts with.
    pub fn origin(position: Vec2) -> Self {
        Self {
            position,
            length2: 0.0,
            ..NO_WALL
        }
    }

    /// Shading tier of this sample (0 for the origin).
    pub fn shade(&self) -> f32 {
        self.face.map_or(0.0, Face::shade)
    }
}

/// A ray with a fixed origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Vec2,
    sin: f32,
    cos: f32,
}

impl Ray {
    /// Creates a ray leaving `origin` at `angle` radians.
    pub fn new(origin: Vec2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { origin, sin, cos }
    }

    /// Creates a ray from an explicit direction. Only the ratio of the
    /// components matters for the crossings; distances are measured in
    /// grid units either way.
    pub fn from_direction(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            sin: direction.y,
            cos: direction.x,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Point looked up in the grid for `sample`.
    ///
    /// A crossing lies exactly on a grid line, which belongs to the cell on its
    /// positive side. When the ray travels toward negative coordinates the
    /// entered cell is on the other side, so the lookup shifts one unit back
    /// along the crossed axis.
    pub fn probe(&self, sample: &RaySample) -> Vec2 {
        let Vec2 { x, y } = sample.position;
        match sample.face {
            Some(face) if face.is_vertical() && self.cos < 0.0 => Vec2::new(x - 1.0, y),
            Some(face) if !face.is_vertical() && self.sin < 0.0 => Vec2::new(x, y - 1.0),
            _ => sample.position,
        }
    }

    /// Marches the ray through `grid` until the accumulated distance reaches
    /// `max_range`.
    ///
    /// The first sample at or beyond `max_range` is kept as the last element;
    /// filter by distance if a hard cutoff is needed. A range of zero yields
    /// only the origin sample.
    pub fn march<G: GridView + ?Sized>(&self, grid: &G, max_range: f32) -> Vec<RaySample> {
        let mut current = RaySample::origin(self.origin);
        let mut samples = vec![current];

        while current.distance < max_range {
            let Vec2 { x, y } = current.position;
            let step_x = step(self.sin, self.cos, x, y, false);
            let step_y = step(self.cos, self.sin, y, x, true);

            // Ties go to the horizontal crossing.
            let (candidate, vertical) = if step_x.length2 < step_y.length2 {
                (step_x, true)
            } else {
                (step_y, false)
            };
            if !candidate.length2.is_finite() {
                break;
            }

            current = self.inspect(grid, candidate, vertical, current.distance);
            samples.push(current);
        }

        samples
    }

    /// Fills in height, distance, face and texture offset of a chosen step.
    fn inspect<G: GridView + ?Sized>(
        &self,
        grid: &G,
        mut sample: RaySample,
        vertical: bool,
        distance: f32,
    ) -> RaySample {
        let (face, along) = if vertical {
            let face = if self.cos < 0.0 { Face::East } else { Face::West };
            (face, sample.position.y)
        } else {
            let face = if self.sin < 0.0 { Face::South } else { Face::North };
            (face, sample.position.x)
        };

        sample.face = Some(face);
        let probe = self.probe(&sample);
        sample.height = grid.height_at(probe.x, probe.y);
        sample.distance = distance + sample.length2.sqrt();
        sample.offset = fract01(along);
        sample
    }
}

/// Casts a ray from `origin` at `angle` radians out to `max_range`.
pub fn cast<G: GridView + ?Sized>(
    grid: &G,
    origin: Vec2,
    angle: f32,
    max_range: f32,
) -> Vec<RaySample> {
    Ray::new(origin, angle).march(grid, max_range)
}

/// Next crossing of a grid line perpendicular to the `run` axis.
///
/// `x` is the coordinate along `run`, `y` the one along `rise`. With
/// `inverted` the two are swapped back when building the position. The
/// crossed coordinate is stored as the exact grid-line value.
fn step(rise: f32, run: f32, x: f32, y: f32, inverted: bool) -> RaySample {
    if run == 0.0 {
        return NO_WALL;
    }
    let next = if run > 0.0 {
        (x + 1.0).floor()
    } else {
        (x - 1.0).ceil()
    };
    let dx = next - x;
    let dy = dx * (rise / run);
    let position = if inverted {
        Vec2::new(y + dy, next)
    } else {
        Vec2::new(next, y + dy)
    };

    RaySample {
        position,
        length2: dx * dx + dy * dy,
        ..NO_WALL
    }
}

/// Fractional part in `[0, 1)`, also for negative input.
#[inline]
pub fn fract01(value: f32) -> f32 {
    let fract = value - value.floor();
    // -1e-9 - floor(-1e-9) rounds up to 1.0 in f32.
    if fract >= 1.0 {
        0.0
    } else {
        fract
    }
}
