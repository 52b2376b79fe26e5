//! Shared entity record for the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// Sprite-sheet bookkeeping. The simulation owns the frame index; the
/// presentation layer only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frame_count: u32,
    pub frame: u32,
    pub timer: f32,
    /// Seconds per frame
    pub frame_time: f32,
}

impl Animation {
    pub fn new(frame_count: u32, frame_time: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame: 0,
            timer: 0.0,
            frame_time,
        }
    }

    /// Single-frame sprite
    pub fn still() -> Self {
        Self::new(1, 0.0)
    }

    /// Advance by `dt`, wrapping the frame index
    pub fn advance(&mut self, dt: f32) {
        if self.frame_count <= 1 || self.frame_time <= 0.0 {
            return;
        }
        self.timer += dt;
        while self.timer >= self.frame_time {
            self.timer -= self.frame_time;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::still()
    }
}

/// Position, size and animation shared by every actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Feet anchor: bottom-centre of the collision box
    pub pos: Vec2,
    pub size: Vec2,
    pub anim: Animation,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            anim: Animation::still(),
        }
    }

    pub fn with_animation(mut self, anim: Animation) -> Self {
        self.anim = anim;
        self
    }

    /// Collision rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_feet(self.pos, self.size)
    }

    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn head(&self) -> f32 {
        self.pos.y - self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_wraps() {
        let mut a = Animation::new(3, 0.1);
        for _ in 0..4 {
            a.advance(0.1001);
        }
        assert_eq!(a.frame, 1);
        assert!(a.frame < a.frame_count);
    }

    #[test]
    fn test_animation_large_step_stays_in_range() {
        let mut a = Animation::new(6, 0.1);
        a.advance(2.55);
        assert!(a.frame < 6);
        assert!(a.timer < 0.1);
    }

    #[test]
    fn test_still_animation_never_moves() {
        let mut a = Animation::still();
        a.advance(10.0);
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn test_zero_frame_count_is_clamped() {
        let a = Animation::new(0, 0.1);
        assert_eq!(a.frame_count, 1);
    }

    #[test]
    fn test_entity_rect_from_feet() {
        let e = Entity::new(Vec2::new(50.0, 100.0), Vec2::new(20.0, 30.0));
        let r = e.rect();
        assert_eq!(r.pos, Vec2::new(40.0, 70.0));
        assert_eq!(e.head(), 70.0);
        assert_eq!(e.right(), 60.0);
    }
}
