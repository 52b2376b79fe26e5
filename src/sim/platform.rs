//! Platforms and their day/night solidity

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::approach;
use crate::consts::*;

/// Platform kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Solid by day, sinks and turns intangible at night
    Flower,
    /// Intangible by day, a trampoline at night
    Mushroom,
    /// Always solid, never drawn (level bounds, enemy perches)
    Invisible,
}

/// A platform in the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    /// Resting height by day; flowers animate relative to it
    pub initial_y: f32,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind) -> Self {
        Self {
            rect,
            kind,
            initial_y: rect.pos.y,
        }
    }

    /// Does this platform take part in collision for the given phase?
    pub fn is_solid(&self, is_day: bool) -> bool {
        match self.kind {
            PlatformKind::Normal | PlatformKind::Invisible => true,
            PlatformKind::Flower => is_day,
            PlatformKind::Mushroom => !is_day,
        }
    }

    /// Is this platform present in the level at all?
    pub fn is_active(&self) -> bool {
        true
    }

    /// Mushrooms launch whatever lands on them
    pub fn is_bouncy(&self) -> bool {
        self.kind == PlatformKind::Mushroom
    }

    /// Where a flower wants to rest for the given phase
    pub fn target_y(&self, is_day: bool) -> f32 {
        if is_day {
            self.initial_y
        } else {
            self.initial_y + FLOWER_NIGHT_DROP
        }
    }

    /// Ease a flower toward its phase height. Returns this frame's Y delta.
    pub fn animate(&mut self, is_day: bool, dt: f32) -> f32 {
        match self.kind {
            PlatformKind::Flower => {
                let target = self.target_y(is_day);
                approach(&mut self.rect.pos.y, target, FLOWER_RATE, dt)
            }
            PlatformKind::Normal | PlatformKind::Mushroom | PlatformKind::Invisible => 0.0,
        }
    }
}
