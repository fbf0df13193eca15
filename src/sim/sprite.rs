//! Entity geometry
//!
//! Every entity is an axis-aligned box anchored at its top-left corner, in
//! field coordinates (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Sprite {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square sprite whose center is `center`
    pub fn centered_at(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// AABB overlap test. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Sprite) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Same sprite with its left edge clamped inside `[0, field_width]`
    pub fn clamped_x(self, field_width: f32) -> Self {
        Self {
            x: crate::clamp_span(self.x, self.w, field_width),
            ..self
        }
    }
}

/// A falling (or batted) bomb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub sprite: Sprite,
    /// Velocity in px/s; positive y is falling
    pub vel: Vec2,
}

impl Bomb {
    /// Bomb falling straight down at `speed`
    pub fn falling(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            sprite: Sprite::new(x, y, size, size),
            vel: Vec2::new(0.0, speed),
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.vel.y > 0.0
    }

    /// Position after `dt` seconds of free flight
    pub fn advanced(self, dt: f32) -> Self {
        let delta = self.vel * dt;
        Self {
            sprite: Sprite {
                x: self.sprite.x + delta.x,
                y: self.sprite.y + delta.y,
                ..self.sprite
            },
            ..self
        }
    }

    /// Bounce off the hands: send it back up, with english from the hit offset
    pub fn batted(self, hands: &Sprite, bat_speed: f32) -> Self {
        let half_width = (hands.w / 2.0).max(f32::EPSILON);
        let offset = ((self.sprite.center().x - hands.center().x) / half_width).clamp(-1.0, 1.0);
        Self {
            vel: Vec2::new(self.vel.x + offset * bat_speed, -self.vel.y.abs()),
            ..self
        }
    }
}

/// What left a cross mark behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossKind {
    /// Bomb landed in the bucket
    Catch,
    /// Bomb hit the ground
    Miss,
}

/// Explosion/cross mark with a limited lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub sprite: Sprite,
    pub kind: CrossKind,
    /// Seconds since the mark appeared
    pub age: f32,
}

impl Cross {
    /// Mark centred on a caught bomb
    pub fn catch_at(bomb: &Bomb, size: f32) -> Self {
        Self {
            sprite: Sprite::centered_at(bomb.sprite.center(), size),
            kind: CrossKind::Catch,
            age: 0.0,
        }
    }

    /// Mark sitting on the bottom edge under a missed bomb
    pub fn miss_at(bomb: &Bomb, size: f32, field_height: f32) -> Self {
        let x = bomb.sprite.center().x - size / 2.0;
        Self {
            sprite: Sprite::new(x, field_height - size, size, size),
            kind: CrossKind::Miss,
            age: 0.0,
        }
    }

    pub fn aged(self, dt: f32) -> Self {
        Self {
            age: self.age + dt,
            ..self
        }
    }
}
