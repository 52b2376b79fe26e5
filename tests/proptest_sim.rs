//! Property tests for the simulation.
//!
//! Randomised geometry, timings and toggle sequences; each property must hold
//! for every generated case.

use glam::Vec2;
use jasmin::consts::MUSHROOM_BOUNCE;
use jasmin::sim::sunlight::ray_fan_exposure;
use jasmin::sim::{
    BurnState, Enemy, EnemyKind, GameState, Platform, PlatformKind, Player, PlayerInput, RayFan, Rect,
};
use jasmin::{PhysicsConfig, Settings, SunConfig};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn kind_strategy() -> impl Strategy<Value = PlatformKind> {
    prop_oneof![
        Just(PlatformKind::Normal),
        Just(PlatformKind::Flower),
        Just(PlatformKind::Mushroom),
        Just(PlatformKind::Invisible),
    ]
}

/// Step until grounded; false if it never lands
fn settle(player: &mut Player, platforms: &[Platform], is_day: bool, physics: &PhysicsConfig) -> bool {
    for _ in 0..240 {
        player.update(&PlayerInput::default(), DT, platforms, is_day, physics);
        if player.is_grounded() {
            return true;
        }
    }
    false
}

proptest! {
    #[test]
    fn solidity_table(kind in kind_strategy(), is_day in any::<bool>()) {
        let p = Platform::new(Rect::new(0.0, 0.0, 10.0, 10.0), kind);
        let expected = match kind {
            PlatformKind::Normal | PlatformKind::Invisible => true,
            PlatformKind::Flower => is_day,
            PlatformKind::Mushroom => !is_day,
        };
        prop_assert_eq!(p.is_solid(is_day), expected);
    }

    #[test]
    fn resting_player_keeps_constant_y(
        x0 in -500i32..500,
        width in 100i32..600,
        top in 200i32..700,
        offset in 0.1f32..0.9,
        drop in 10i32..150,
    ) {
        let (x0, width, top) = (x0 as f32, width as f32, top as f32);
        let floor = [Platform::new(Rect::new(x0, top, width, 20.0), PlatformKind::Normal)];
        let physics = PhysicsConfig::for_height(800.0);
        let mut player = Player::with_size(
            Vec2::new(x0 + width * offset, top - drop as f32),
            Vec2::new(40.0, 60.0),
        );
        prop_assert!(settle(&mut player, &floor, true, &physics));
        prop_assert_eq!(player.rect().top(), top - 60.0);

        let y = player.pos().y;
        for _ in 0..60 {
            player.update(&PlayerInput::default(), DT, &floor, true, &physics);
            prop_assert_eq!(player.pos().y, y);
            prop_assert_eq!(player.vel.y, 0.0);
        }
    }

    #[test]
    fn mushroom_launch_is_fixed_and_never_embeds(drop in 5i32..300, height in 400.0f32..1200.0) {
        let shroom = [Platform::new(Rect::new(0.0, 500.0, 300.0, 40.0), PlatformKind::Mushroom)];
        let physics = PhysicsConfig::for_height(height);
        let mut player = Player::with_size(Vec2::new(150.0, 500.0 - drop as f32), Vec2::new(40.0, 60.0));

        let mut bounced = false;
        for _ in 0..240 {
            let step = player.update(&PlayerInput::default(), DT, &shroom, false, &physics);
            if step.bounced {
                bounced = true;
                prop_assert_eq!(player.vel.y, -physics.jump_force * MUSHROOM_BOUNCE);
                prop_assert!(player.pos().y <= 500.0);
                break;
            }
        }
        prop_assert!(bounced);
    }

    #[test]
    fn roof_between_sun_and_player_shadows(px in 300.0f32..700.0, feet in 300.0f32..600.0) {
        let sun = Vec2::new(500.0, -50.0);
        let fan = RayFan::new(1280.0, 800.0, 200.0, 30.0);
        let player = Rect::from_feet(Vec2::new(px, feet), Vec2::new(40.0, 60.0));
        let roof = Rect::new(0.0, 150.0, 1000.0, 20.0);
        let far_floor = Rect::new(0.0, 780.0, 1280.0, 20.0);

        prop_assert!(!ray_fan_exposure(sun, &player, &[roof, far_floor], &fan));
        prop_assert!(ray_fan_exposure(sun, &player, &[far_floor], &fan));
    }

    #[test]
    fn burn_drains_at_configured_rate(
        dts in prop::collection::vec(0.001f32..0.1, 1..120),
        rate in 0.1f32..5.0,
    ) {
        let config = SunConfig { burn_rate: rate, ..Default::default() };
        let mut day = BurnState::default();
        let mut night = BurnState::default();
        let mut hp = 1000.0f32;
        let mut elapsed = 0.0f32;
        for dt in &dts {
            let before = hp;
            hp -= day.update(true, true, *dt, &config).damage;
            prop_assert!(hp <= before);
            elapsed += dt;

            prop_assert_eq!(night.update(true, false, *dt, &config).damage, 0.0);
        }
        prop_assert!((day.total - rate * elapsed).abs() <= 1e-3 * (1.0 + rate * elapsed));
        prop_assert_eq!(night.total, 0.0);
    }

    #[test]
    fn spider_patrol_stays_within_one_step(
        x0 in -200.0f32..800.0,
        width in 120.0f32..600.0,
        start in 0.2f32..0.8,
        speed in 40.0f32..400.0,
        right in any::<bool>(),
    ) {
        let ledge = [Platform::new(Rect::new(x0, 400.0, width, 30.0), PlatformKind::Normal)];
        let mut spider = Enemy::new(
            EnemyKind::Spider,
            Vec2::new(x0 + width * start, 400.0),
            Vec2::splat(40.0),
            right,
            0,
            speed,
        );
        let step = speed * DT;
        for _ in 0..600 {
            spider.update(DT, &ledge, 10_000.0);
            prop_assert!(spider.rect().left() >= x0 - step - 1e-3);
            prop_assert!(spider.rect().right() <= x0 + width + step + 1e-3);
        }
    }

    #[test]
    fn toggle_pairs_restore_solidity_and_enemies(level in 0usize..3, pairs in 1usize..5) {
        let mut state = GameState::with_campaign(Settings::default()).unwrap();
        state.load_level(level);
        let solid: Vec<bool> = state.platforms.iter().map(|p| p.is_solid(state.is_day)).collect();
        let active: Vec<bool> = state.enemies.iter().map(|e| e.is_active(state.is_day)).collect();
        let is_day = state.is_day;

        for _ in 0..pairs * 2 {
            prop_assert!(state.toggle_day_night());
        }

        prop_assert_eq!(state.is_day, is_day);
        let solid_after: Vec<bool> = state.platforms.iter().map(|p| p.is_solid(state.is_day)).collect();
        let active_after: Vec<bool> = state.enemies.iter().map(|e| e.is_active(state.is_day)).collect();
        prop_assert_eq!(solid, solid_after);
        prop_assert_eq!(active, active_after);
    }
}
