//! Player movement, collision and health

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cloud::Cloud;
use super::collision::{resolve_horizontal, resolve_vertical};
use super::enemy::Enemy;
use super::entity::{Animation, Entity};
use super::geom::Rect;
use super::platform::Platform;
use crate::consts::*;
use crate::settings::PhysicsConfig;

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Grounded,
    Airborne,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Movement input for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// What happened to the player during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStep {
    pub jumped: bool,
    pub landed: bool,
    pub bounced: bool,
    pub bumped_head: bool,
    pub hit_wall: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub vel: Vec2,
    pub facing: Facing,
    /// Horizontal input held this frame (drives the walk cycle)
    pub moving: bool,
    pub state: PlayerState,
    pub hp: f32,
    pub max_hp: f32,
}

impl Player {
    /// A player sized for the given vertical resolution, standing at `spawn`
    pub fn new(spawn: Vec2, screen_height: f32) -> Self {
        let side = screen_height * PLAYER_SIZE_RATIO;
        Self::with_size(spawn, Vec2::splat(side))
    }

    pub fn with_size(spawn: Vec2, size: Vec2) -> Self {
        Self {
            body: Entity::new(spawn, size)
                .with_animation(Animation::new(PLAYER_WALK_FRAMES, PLAYER_WALK_FRAME_TIME)),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            moving: false,
            state: PlayerState::Airborne,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == PlayerState::Grounded
    }

    /// Advance one frame: input, horizontal pass, gravity, vertical pass.
    pub fn update(
        &mut self,
        input: &PlayerInput,
        dt: f32,
        platforms: &[Platform],
        is_day: bool,
        physics: &PhysicsConfig,
    ) -> PlayerStep {
        let mut step = PlayerStep::default();
        if self.is_dead() {
            return step;
        }

        // 1. Input
        self.moving = input.left != input.right;
        if input.left && !input.right {
            self.vel.x = -physics.player_speed;
            self.facing = Facing::Left;
        } else if input.right && !input.left {
            self.vel.x = physics.player_speed;
            self.facing = Facing::Right;
        } else {
            self.vel.x = 0.0;
        }

        if input.jump && self.is_grounded() {
            self.vel.y = -physics.jump_force;
            self.state = PlayerState::Airborne;
            step.jumped = true;
        }

        if self.moving {
            self.body.anim.advance(dt);
        } else {
            self.body.anim.reset();
        }

        // 2-3. Horizontal move, then push out of walls
        self.body.pos.x += self.vel.x * dt;
        step.hit_wall = resolve_horizontal(&mut self.body, &mut self.vel, platforms, is_day);

        // 4-5. Gravity, vertical move, then land / bounce / bump
        self.vel.y += physics.gravity * dt;
        self.body.pos.y += self.vel.y * dt;
        let contact = resolve_vertical(
            &mut self.body,
            &mut self.vel,
            platforms,
            is_day,
            physics.jump_force * MUSHROOM_BOUNCE,
        );
        step.landed = contact.landed;
        step.bounced = contact.bounced;
        step.bumped_head = contact.ceiling;

        self.state = if contact.landed {
            PlayerState::Grounded
        } else {
            PlayerState::Airborne
        };
        step
    }

    /// Ride a platform that moved vertically by `dy` this frame.
    ///
    /// `before` is the platform's rectangle prior to the move. Returns true if
    /// the player was standing on it and got carried.
    pub fn carry(&mut self, before: &Rect, dy: f32) -> bool {
        if self.is_dead() || dy == 0.0 {
            return false;
        }
        let feet = self.body.feet();
        let on_top = (feet - before.top()).abs() <= CARRY_TOLERANCE;
        if on_top && self.rect().overlaps_x(before) {
            self.body.pos.y += dy;
            return true;
        }
        false
    }

    /// Stand on a cloud if falling onto its top band, drifting with it by `dx`.
    pub fn ride_cloud(&mut self, cloud: &Cloud, dx: f32) -> bool {
        if self.is_dead() || self.vel.y < 0.0 {
            return false;
        }
        let feet = self.body.feet();
        let top = cloud.rect.top();
        let x = self.body.pos.x;
        if feet >= top
            && feet <= top + CLOUD_RIDE_BAND
            && x >= cloud.rect.left()
            && x <= cloud.rect.right()
        {
            self.vel.y = 0.0;
            self.body.pos.y = top;
            self.body.pos.x += dx;
            self.state = PlayerState::Grounded;
            return true;
        }
        false
    }

    /// Apply contact damage for every active enemy overlapping the player.
    /// Returns true if any enemy was touched.
    pub fn touch_enemies(&mut self, enemies: &[Enemy], is_day: bool) -> bool {
        if self.is_dead() {
            return false;
        }
        let rect = self.rect();
        let mut touched = false;
        for enemy in enemies.iter().filter(|e| e.is_active(is_day)) {
            if rect.overlaps(&enemy.rect()) {
                touched = true;
                self.take_damage(ENEMY_CONTACT_DAMAGE);
            }
        }
        touched
    }

    /// Lose health; returns true if this blow was fatal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() || amount <= 0.0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.state = PlayerState::Dead;
            self.vel = Vec2::ZERO;
            return true;
        }
        false
    }

    /// Back to `spawn` with full health
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.vel = Vec2::ZERO;
        self.hp = self.max_hp;
        self.state = PlayerState::Airborne;
        self.facing = Facing::Right;
        self.moving = false;
        self.body.anim.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::PlatformKind;

    const DT: f32 = 1.0 / 60.0;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::for_height(800.0)
    }

    fn floor() -> Platform {
        Platform::new(Rect::new(0.0, 400.0, 200.0, 20.0), PlatformKind::Normal)
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::with_size(Vec2::new(x, y), Vec2::new(40.0, 60.0))
    }

    fn settle(player: &mut Player, platforms: &[Platform], is_day: bool) {
        for _ in 0..120 {
            player.update(&PlayerInput::default(), DT, platforms, is_day, &physics());
            if player.is_grounded() {
                return;
            }
        }
    }

    #[test]
    fn test_falls_and_lands() {
        let plats = [floor()];
        let mut p = player_at(100.0, 300.0);
        settle(&mut p, &plats, true);
        assert!(p.is_grounded());
        assert_eq!(p.rect().top(), 400.0 - 60.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_resting_player_does_not_sink() {
        let plats = [floor()];
        let mut p = player_at(100.0, 300.0);
        settle(&mut p, &plats, true);
        let y = p.pos().y;
        for _ in 0..300 {
            p.update(&PlayerInput::default(), DT, &plats, true, &physics());
            assert_eq!(p.pos().y, y);
            assert!(p.is_grounded());
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let plats = [floor()];
        let mut p = player_at(100.0, 300.0);
        let jump = PlayerInput {
            jump: true,
            ..Default::default()
        };
        // Airborne: no jump
        let step = p.update(&jump, DT, &plats, true, &physics());
        assert!(!step.jumped);

        settle(&mut p, &plats, true);
        let step = p.update(&jump, DT, &plats, true, &physics());
        assert!(step.jumped);
        assert!(p.vel.y < 0.0);
        assert_eq!(p.state, PlayerState::Airborne);
    }

    #[test]
    fn test_walk_sets_facing_and_animates() {
        let plats = [floor()];
        let mut p = player_at(100.0, 300.0);
        settle(&mut p, &plats, true);
        let left = PlayerInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            p.update(&left, DT, &plats, true, &physics());
        }
        assert_eq!(p.facing, Facing::Left);
        assert!(p.pos().x < 100.0);
        assert!(p.body.anim.frame > 0);

        p.update(&PlayerInput::default(), DT, &plats, true, &physics());
        assert_eq!(p.body.anim.frame, 0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_walks_into_wall_and_stops() {
        let wall = Platform::new(Rect::new(150.0, 200.0, 50.0, 200.0), PlatformKind::Normal);
        let plats = [floor(), wall];
        let mut p = player_at(100.0, 300.0);
        settle(&mut p, &plats, true);
        let right = PlayerInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..60 {
            p.update(&right, DT, &plats, true, &physics());
        }
        assert_eq!(p.rect().right(), 150.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn test_mushroom_bounce_at_night_only() {
        let shroom = Platform::new(Rect::new(0.0, 400.0, 200.0, 20.0), PlatformKind::Mushroom);
        let ground = Platform::new(Rect::new(0.0, 600.0, 200.0, 20.0), PlatformKind::Normal);
        let plats = [shroom, ground];

        let mut night = player_at(100.0, 390.0);
        let mut bounced = false;
        for _ in 0..60 {
            let step = night.update(&PlayerInput::default(), DT, &plats, false, &physics());
            if step.bounced {
                bounced = true;
                assert_eq!(night.vel.y, -physics().jump_force * MUSHROOM_BOUNCE);
                assert_eq!(night.pos().y, 400.0);
                assert!(!night.is_grounded());
                break;
            }
        }
        assert!(bounced);

        // By day the mushroom is intangible; the player falls to the ground below
        let mut day = player_at(100.0, 390.0);
        settle(&mut day, &plats, true);
        assert_eq!(day.pos().y, 600.0);
    }

    #[test]
    fn test_take_damage_clamps_and_kills() {
        let mut p = player_at(0.0, 0.0);
        assert!(!p.take_damage(2.0));
        assert_eq!(p.hp, 3.0);
        assert!(p.take_damage(10.0));
        assert_eq!(p.hp, 0.0);
        assert!(p.is_dead());
        // Dead players take no further damage
        assert!(!p.take_damage(1.0));
        assert_eq!(p.hp, 0.0);
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let plats = [floor()];
        let mut p = player_at(100.0, 300.0);
        p.take_damage(100.0);
        let before = p.pos();
        let right = PlayerInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        p.update(&right, DT, &plats, true, &physics());
        assert_eq!(p.pos(), before);
    }

    #[test]
    fn test_respawn_restores_health() {
        let mut p = player_at(0.0, 0.0);
        p.take_damage(100.0);
        p.respawn(Vec2::new(50.0, 60.0));
        assert_eq!(p.hp, p.max_hp);
        assert_eq!(p.pos(), Vec2::new(50.0, 60.0));
        assert_eq!(p.state, PlayerState::Airborne);
    }

    #[test]
    fn test_carry_moves_player_standing_on_platform() {
        let before = Rect::new(0.0, 400.0, 200.0, 20.0);
        let mut p = player_at(100.0, 400.0);
        assert!(p.carry(&before, 3.0));
        assert_eq!(p.pos().y, 403.0);

        // Off to the side: not carried
        let mut q = player_at(400.0, 400.0);
        assert!(!q.carry(&before, 3.0));
    }

    #[test]
    fn test_ride_cloud() {
        let cloud = Cloud::new(Rect::new(50.0, 200.0, 150.0, 40.0), 75.0, 0.0, 500.0, true);
        let mut p = player_at(100.0, 205.0);
        p.vel.y = 50.0;
        assert!(p.ride_cloud(&cloud, 2.0));
        assert_eq!(p.pos(), Vec2::new(102.0, 200.0));
        assert!(p.is_grounded());

        // Rising through the cloud: no ride
        let mut q = player_at(100.0, 205.0);
        q.vel.y = -100.0;
        assert!(!q.ride_cloud(&cloud, 2.0));
    }
}
