use guard_the_tower::constants::*;
use guard_the_tower::entities::*;
use guard_the_tower::geometry::Rect;

#[test]
fn facing_from_every_key_combination() {
    assert_eq!(Facing::from_delta(0, -1), Some(Facing::North));
    assert_eq!(Facing::from_delta(1, -1), Some(Facing::NorthEast));
    assert_eq!(Facing::from_delta(1, 0), Some(Facing::East));
    assert_eq!(Facing::from_delta(1, 1), Some(Facing::SouthEast));
    assert_eq!(Facing::from_delta(0, 1), Some(Facing::South));
    assert_eq!(Facing::from_delta(-1, 1), Some(Facing::SouthWest));
    assert_eq!(Facing::from_delta(-1, 0), Some(Facing::West));
    assert_eq!(Facing::from_delta(-1, -1), Some(Facing::NorthWest));
}

#[test]
fn facing_none_without_net_movement() {
    // Opposite keys cancel out
    assert_eq!(Facing::from_delta(0, 0), None);
}

#[test]
fn player_spawns_at_fixed_point() {
    let p = Player::spawn();
    assert_eq!(p.rect.center(), PLAYER_SPAWN);
    assert_eq!(p.speed, 10);
    assert_eq!(p.facing, Facing::East);
}

#[test]
fn tower_sits_at_screen_center() {
    let t = Tower::new();
    assert_eq!(t.rect.center(), (SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));
    assert_eq!(t.life, 3);
    assert_eq!(Tower::default(), t);
}

#[test]
fn player_and_tower_start_apart() {
    assert!(!Player::spawn().rect.intersects(&Tower::new().rect));
}

#[test]
fn default_input_is_idle() {
    let input = TickInput::default();
    assert!(!input.up && !input.down && !input.left && !input.right);
    assert!(!input.toggle_target);
}

#[test]
fn default_anchor_mode_is_fixed() {
    assert_eq!(AnchorMode::default(), AnchorMode::Fixed);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player::spawn(),
        enemies: Vec::new(),
        tower: Tower::new(),
        score: 0,
        target: AttackTarget::Tower,
        switch_timer: 0,
        anchors: SpawnAnchors([(0.0, 0.0); 4]),
        anchor_mode: AnchorMode::Fixed,
        status: GameStatus::Playing,
        tick: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.score = 999;
    cloned.tower.life = 0;
    cloned.enemies.push(Enemy {
        rect: Rect::new(5.0, 5.0, ENEMY_SIZE, ENEMY_SIZE),
        vx: 1.0,
        vy: 0.0,
        speed: ENEMY_SPEED,
        variant: 0,
    });

    assert_eq!(original.score, 0);
    assert_eq!(original.tower.life, 3);
    assert!(original.enemies.is_empty());
}
