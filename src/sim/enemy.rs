//! Night-time enemies and their patrols

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Animation, Entity};
use super::geom::Rect;
use super::platform::Platform;
use crate::consts::*;

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Stationary blocker
    Roach,
    /// Walks back and forth along its platform
    Spider,
}

impl EnemyKind {
    /// Side length as a fraction of the vertical resolution
    pub fn size_ratio(&self) -> f32 {
        match self {
            EnemyKind::Roach => ROACH_SIZE_RATIO,
            EnemyKind::Spider => SPIDER_SIZE_RATIO,
        }
    }

    fn animation(&self) -> Animation {
        match self {
            EnemyKind::Roach => Animation::still(),
            EnemyKind::Spider => Animation::new(SPIDER_FRAMES, SPIDER_FRAME_TIME),
        }
    }
}

/// An enemy bound to one platform of the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Entity,
    pub kind: EnemyKind,
    /// Walking toward +x
    pub patrol_right: bool,
    /// Index of the platform whose span bounds the patrol
    pub platform: usize,
    /// Pixels per second (unused by stationary kinds)
    pub speed: f32,
    /// Set when the platform binding failed validation; a frozen enemy never moves
    pub frozen: bool,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        pos: Vec2,
        size: Vec2,
        patrol_right: bool,
        platform: usize,
        speed: f32,
    ) -> Self {
        Self {
            body: Entity::new(pos, size).with_animation(kind.animation()),
            kind,
            patrol_right,
            platform,
            speed,
            frozen: false,
        }
    }

    /// Enemies only roam at night
    #[inline]
    pub fn is_active(&self, is_day: bool) -> bool {
        !is_day
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Advance one frame. Returns true if the enemy turned around.
    pub fn update(&mut self, dt: f32, platforms: &[Platform], level_width: f32) -> bool {
        if self.frozen {
            return false;
        }
        // Bad binding: do nothing rather than index out of bounds
        let Some(span) = platforms.get(self.platform).map(|p| p.rect) else {
            return false;
        };

        self.body.anim.advance(dt);
        match self.kind {
            EnemyKind::Roach => false,
            EnemyKind::Spider => self.patrol(dt, &span, platforms, level_width),
        }
    }

    fn patrol(&mut self, dt: f32, span: &Rect, platforms: &[Platform], level_width: f32) -> bool {
        let mut turned = false;

        // Leading edge at or past the patrolled platform's edge
        let at_edge = if self.patrol_right {
            self.body.right() >= span.right()
        } else {
            self.body.left() <= span.left()
        };
        if at_edge {
            self.patrol_right = !self.patrol_right;
            turned = true;
        }

        let step = if self.patrol_right { self.speed * dt } else { -self.speed * dt };
        self.body.pos.x += step;

        // Screen bounds
        if self.body.left() < 0.0 && !self.patrol_right {
            self.patrol_right = true;
            turned = true;
        } else if self.body.right() > level_width && self.patrol_right {
            self.patrol_right = false;
            turned = true;
        }

        // Ground check just past the leading foot
        let check_x = if step > 0.0 {
            self.body.right() + SPIDER_LOOKAHEAD
        } else {
            self.body.left() - SPIDER_LOOKAHEAD
        };
        let foothold = Vec2::new(check_x, self.body.feet() + SPIDER_GROUND_DEPTH);
        let has_ground = platforms.iter().any(|p| p.rect.contains_point(foothold));
        if !has_ground && step != 0.0 {
            self.patrol_right = step < 0.0;
            self.body.pos.x -= step * 2.0;
            turned = true;
        }

        turned
    }
}
