//! Axis-separated collision response against platforms
//!
//! Movement is resolved in two independent passes per frame: the horizontal
//! pass runs to completion before gravity is applied and the vertical pass
//! begins. There is no swept test, so a body moving more than a platform's
//! thickness in one frame can tunnel through it.

use glam::Vec2;

use super::entity::Entity;
use super::platform::Platform;

/// What the vertical pass ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Came to rest on top of a platform
    pub landed: bool,
    /// Landed on a bouncy platform and was launched
    pub bounced: bool,
    /// Hit the underside of a platform while rising
    pub ceiling: bool,
}

/// Push `body` out of every solid platform it overlaps, along whichever side
/// needs the smaller correction. Returns true if any push happened.
///
/// Every overlapping platform is handled in order, so a body wedged between
/// adjacent platforms is pushed by each.
pub fn resolve_horizontal(
    body: &mut Entity,
    vel: &mut Vec2,
    platforms: &[Platform],
    is_day: bool,
) -> bool {
    let mut hit = false;
    for plat in platforms.iter().filter(|p| p.is_solid(is_day)) {
        let rect = body.rect();
        if !rect.overlaps(&plat.rect) {
            continue;
        }

        let push_left = rect.right() - plat.rect.left();
        let push_right = plat.rect.right() - rect.left();
        if push_left < push_right {
            body.pos.x = plat.rect.left() - body.size.x / 2.0;
        } else {
            body.pos.x = plat.rect.right() + body.size.x / 2.0;
        }
        vel.x = 0.0;
        hit = true;
    }
    hit
}

/// Snap `body` onto or under every solid platform it overlaps after the
/// vertical move. `bounce_speed` is the upward speed a bouncy platform gives.
pub fn resolve_vertical(
    body: &mut Entity,
    vel: &mut Vec2,
    platforms: &[Platform],
    is_day: bool,
    bounce_speed: f32,
) -> VerticalContact {
    let mut contact = VerticalContact::default();
    for plat in platforms.iter().filter(|p| p.is_solid(is_day)) {
        if !body.rect().overlaps(&plat.rect) {
            continue;
        }

        if vel.y > 0.0 {
            // Falling onto the top edge
            body.pos.y = plat.rect.top();
            if plat.is_bouncy() {
                vel.y = -bounce_speed;
                contact.bounced = true;
                contact.landed = false;
            } else {
                vel.y = 0.0;
                contact.landed = true;
            }
        } else if vel.y < 0.0 {
            // Head bump
            body.pos.y = plat.rect.bottom() + body.size.y;
            vel.y = 0.0;
            contact.ceiling = true;
        }
    }
    contact
}
