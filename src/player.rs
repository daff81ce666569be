//! Player pose and movement.

use std::f32::consts::{PI, TAU};

use crate::grid::{GridView, EMPTY};
use crate::math::Vec2;

/// Where the viewer stands and looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// View direction in radians, in `[0, 2π)`.
    pub direction: f32,
    /// Total distance walked, drives the weapon bob.
    pub paces: f32,
}

/// Movement keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pose: Pose,
    /// Walking speed in grid units per second.
    pub move_speed: f32,
    /// Turning speed in radians per second.
    pub turn_speed: f32,
}

impl Player {
    pub fn new(position: Vec2, direction: f32) -> Self {
        Self {
            pose: Pose {
                position,
                direction: direction.rem_euclid(TAU),
                paces: 0.0,
            },
            move_speed: 3.0,
            turn_speed: PI,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Turns by `angle` radians, keeping the direction in `[0, 2π)`.
    pub fn rotate(&mut self, angle: f32) {
        let direction = (self.pose.direction + angle).rem_euclid(TAU);
        // rem_euclid can round up to TAU for tiny negative inputs
        self.pose.direction = if direction >= TAU { 0.0 } else { direction };
    }

    /// Walks `distance` along the view direction (negative walks backward).
    ///
    /// Each axis is resolved separately so the player slides along walls. A
    /// move is only taken when it ends in an empty cell; leaving the grid is
    /// blocked too.
    pub fn walk<G: GridView + ?Sized>(&mut self, distance: f32, grid: &G) {
        let delta = Vec2::from_angle(self.pose.direction) * distance;
        let Vec2 { x, y } = self.pose.position;

        if grid.height_at(x + delta.x, y) == EMPTY {
            self.pose.position.x += delta.x;
        }
        if grid.height_at(self.pose.position.x, y + delta.y) == EMPTY {
            self.pose.position.y += delta.y;
        }
        self.pose.paces += distance;
    }

    pub fn update<G: GridView + ?Sized>(&mut self, controls: &Controls, grid: &G, seconds: f32) {
        if controls.left {
            self.rotate(-self.turn_speed * seconds);
        }
        if controls.right {
            self.rotate(self.turn_speed * seconds);
        }
        if controls.forward {
            self.walk(self.move_speed * seconds, grid);
        }
        if controls.backward {
            self.walk(-self.move_speed * seconds, grid);
        }
    }
}
