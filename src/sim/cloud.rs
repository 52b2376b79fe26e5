//! Drifting clouds: sun blockers the player can ride

use serde::{Deserialize, Serialize};

use super::geom::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub rect: Rect,
    /// Pixels per second
    pub speed: f32,
    pub left_limit: f32,
    pub right_limit: f32,
    pub moving_right: bool,
}

impl Cloud {
    pub fn new(rect: Rect, speed: f32, left_limit: f32, right_limit: f32, moving_right: bool) -> Self {
        Self {
            rect,
            speed,
            left_limit,
            right_limit,
            moving_right,
        }
    }

    /// Drift one frame, turning around past a limit. Returns the x delta.
    pub fn update(&mut self, dt: f32) -> f32 {
        let step = self.speed * dt;
        if self.moving_right {
            self.rect.pos.x += step;
            if self.rect.pos.x > self.right_limit {
                self.moving_right = false;
            }
            step
        } else {
            self.rect.pos.x -= step;
            if self.rect.pos.x < self.left_limit {
                self.moving_right = true;
            }
            -step
        }
    }
}
