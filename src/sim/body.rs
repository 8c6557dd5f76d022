//! Axis-aligned bodies and per-tick integration
//!
//! Screen space: x grows to the right, y grows downward, so "up" is -y.
//! Everything advances by explicit Euler once per tick, no substeps.

use glam::Vec2;

/// Axis-aligned bounding box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { min: pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Horizontal extents overlap. Shared edges don't count.
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Vertical extents overlap. Shared edges don't count.
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// True once a box spanning `[x, x + width]` touches either side of the screen
#[inline]
pub fn at_horizontal_bound(x: f32, width: f32, screen_width: f32) -> bool {
    x <= 0.0 || x + width >= screen_width
}

/// Position, velocity and fixed size shared by the player, enemies and bullets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel.y += gravity;
    }

    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Slow horizontal velocity toward zero without crossing it
    pub fn apply_friction(&mut self, friction: f32) {
        if self.vel.x > 0.0 {
            self.vel.x = (self.vel.x - friction).max(0.0);
        } else if self.vel.x < 0.0 {
            self.vel.x = (self.vel.x + friction).min(0.0);
        }
    }

    /// Leaving one side of the screen re-enters from the opposite edge
    pub fn wrap_horizontal(&mut self, screen_width: f32) {
        if self.pos.x < 0.0 {
            self.pos.x = screen_width;
        } else if self.pos.x > screen_width {
            self.pos.x = 0.0;
        }
    }

    /// Reverse horizontal direction at the screen edges. Returns true on a bounce.
    pub fn bounce_horizontal(&mut self, screen_width: f32) -> bool {
        if at_horizontal_bound(self.pos.x, self.size.x, screen_width) {
            self.vel.x = -self.vel.x;
            return true;
        }
        false
    }
}
