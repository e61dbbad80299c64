//! Pure game-logic functions.
//!
//! Every public function takes immutable references to the current state
//! (and, where needed, an RNG handle) and returns a brand-new value.  Side
//! effects are limited to the injected RNG and to `tracing` events.

use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    ENEMY_SIZE, ENEMY_SPEED, ENEMY_VARIANTS, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_INTERVAL,
    SWITCH_COST, SWITCH_DURATION,
};
use crate::entities::{
    AnchorMode, AttackTarget, Enemy, Facing, GameState, GameStatus, Player, SpawnAnchors,
    TickInput, Tower,
};
use crate::error::SimError;
use crate::geometry::{direction_vector, in_bounds, Rect};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Roll four edge anchors: random x on the top and bottom edges, random y on
/// the left and right edges.
pub fn roll_anchors(rng: &mut impl Rng) -> SpawnAnchors {
    let w = SCREEN_WIDTH as u32;
    let h = SCREEN_HEIGHT as u32;
    SpawnAnchors([
        (rng.gen_range(0..=w) as f32, 0.0),
        (rng.gen_range(0..=w) as f32, SCREEN_HEIGHT),
        (0.0, rng.gen_range(0..=h) as f32),
        (SCREEN_WIDTH, rng.gen_range(0..=h) as f32),
    ])
}

/// Build the initial game state.  In `AnchorMode::Fixed` the anchors rolled
/// here are used for the whole run.
pub fn init_state(anchor_mode: AnchorMode, rng: &mut impl Rng) -> GameState {
    GameState {
        player: Player::spawn(),
        enemies: Vec::new(),
        tower: Tower::new(),
        score: 0,
        target: AttackTarget::Tower,
        switch_timer: 0,
        anchors: roll_anchors(rng),
        anchor_mode,
        status: GameStatus::Playing,
        tick: 0,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Sum of the unit vectors of every held direction key.
pub fn movement_delta(input: &TickInput) -> (i32, i32) {
    [
        (input.up, (0, -1)),
        (input.down, (0, 1)),
        (input.left, (-1, 0)),
        (input.right, (1, 0)),
    ]
    .iter()
    .filter(|(held, _)| *held)
    .fold((0, 0), |(x, y), (_, (dx, dy))| (x + dx, y + dy))
}

/// Move the player by the held keys.  A move that leaves the screen on
/// either axis is dropped entirely; facing still follows the keys.
pub fn update_player(player: &Player, input: &TickInput) -> Player {
    let (dx, dy) = movement_delta(input);
    let step = player.speed as f32;
    let moved = player.rect.translated(step * dx as f32, step * dy as f32);

    let rect = if in_bounds(&moved, SCREEN_WIDTH, SCREEN_HEIGHT) == (true, true) {
        moved
    } else {
        player.rect
    };

    Player {
        rect,
        facing: Facing::from_delta(dx, dy).unwrap_or(player.facing),
        ..player.clone()
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Create one enemy at a random anchor, aimed at the player.  The anchor
/// ends up as the enemy's top-center point.
pub fn spawn_enemy(
    anchors: &SpawnAnchors,
    player: &Rect,
    rng: &mut impl Rng,
) -> Result<Enemy, SimError> {
    let variant = rng.gen_range(0..ENEMY_VARIANTS);
    let (ax, ay) = anchors.0[rng.gen_range(0..anchors.0.len())];
    let rect = Rect::with_center(ax, ay, ENEMY_SIZE, ENEMY_SIZE);
    let (vx, vy) = direction_vector(&rect, player)?;

    Ok(Enemy {
        rect: rect.translated(0.0, ENEMY_SIZE / 2.0),
        vx,
        vy,
        speed: ENEMY_SPEED,
        variant,
    })
}

/// Re-aim at `target` and advance one step.  Enemies are never clamped to
/// the screen.
pub fn update_enemy(enemy: &Enemy, target: &Rect) -> Result<Enemy, SimError> {
    let (vx, vy) = direction_vector(&enemy.rect, target)?;
    Ok(Enemy {
        rect: enemy.rect.translated(enemy.speed * vx, enemy.speed * vy),
        vx,
        vy,
        ..enemy.clone()
    })
}

// ── Targeting ────────────────────────────────────────────────────────────────

/// Spend `SWITCH_COST` to point every enemy at the player.  Does nothing
/// while the score is below the cost.
pub fn switch_target(state: &GameState) -> GameState {
    if state.score < SWITCH_COST {
        return state.clone();
    }
    info!(tick = state.tick, score = state.score, "enemies now hunting the player");
    GameState {
        target: AttackTarget::Player,
        switch_timer: 0,
        score: state.score - SWITCH_COST,
        ..state.clone()
    }
}

fn target_rect(state: &GameState) -> Rect {
    match state.target {
        AttackTarget::Tower => state.tower.rect,
        AttackTarget::Player => state.player.rect,
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Split `enemies` into survivors and the number overlapping `rect`.
fn remove_overlapping(rect: &Rect, enemies: Vec<Enemy>) -> (Vec<Enemy>, u32) {
    let (hit, survivors): (Vec<Enemy>, Vec<Enemy>) =
        enemies.into_iter().partition(|e| e.rect.intersects(rect));
    (survivors, hit.len() as u32)
}

/// Remove every enemy touching the player.  Returns survivors and kills.
pub fn resolve_player_collisions(player: &Player, enemies: Vec<Enemy>) -> (Vec<Enemy>, u32) {
    remove_overlapping(&player.rect, enemies)
}

/// Remove every enemy touching the tower.  Returns survivors and hits.
pub fn resolve_tower_collisions(tower: &Tower, enemies: Vec<Enemy>) -> (Vec<Enemy>, u32) {
    remove_overlapping(&tower.rect, enemies)
}

// ── Per-tick update (nearly pure — RNG is injected) ─────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).  A lost game is
/// returned unchanged.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    rng: &mut impl Rng,
) -> Result<GameState, SimError> {
    if state.status == GameStatus::Lost {
        return Ok(state.clone());
    }

    // ── 1. Target toggle & expiry ────────────────────────────────────────────
    let mut next = if input.toggle_target {
        switch_target(state)
    } else {
        state.clone()
    };
    if next.switch_timer > SWITCH_DURATION && next.target == AttackTarget::Player {
        info!(tick = next.tick, "enemies back on the tower");
        next.target = AttackTarget::Tower;
    }

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    if next.tick % SPAWN_INTERVAL == 0 {
        if next.anchor_mode == AnchorMode::PerSpawn {
            next.anchors = roll_anchors(rng);
        }
        let enemy = spawn_enemy(&next.anchors, &next.player.rect, rng)?;
        debug!(tick = next.tick, x = enemy.rect.x, y = enemy.rect.y, "enemy spawned");
        next.enemies.push(enemy);
    }

    // ── 3. Collisions: player first, then tower ──────────────────────────────
    let enemies = std::mem::take(&mut next.enemies);
    let (enemies, kills) = resolve_player_collisions(&next.player, enemies);
    if kills > 0 {
        debug!(tick = next.tick, kills, "player caught enemies");
    }
    next.score += kills;

    let (enemies, hits) = resolve_tower_collisions(&next.tower, enemies);
    next.enemies = enemies;
    if hits > 0 {
        next.tower.life = next.tower.life.saturating_sub(hits);
        info!(tick = next.tick, hits, life = next.tower.life, "tower hit");
        if next.tower.life == 0 {
            info!(tick = next.tick, score = next.score, "tower destroyed");
            next.status = GameStatus::Lost;
            return Ok(next);
        }
    }

    // ── 4. Movement ──────────────────────────────────────────────────────────
    next.player = update_player(&next.player, input);
    let target = target_rect(&next);
    next.enemies = next
        .enemies
        .iter()
        .map(|e| update_enemy(e, &target))
        .collect::<Result<Vec<_>, _>>()?;

    // ── 5. Clock ─────────────────────────────────────────────────────────────
    next.tick += 1;
    next.switch_timer = next.switch_timer.saturating_add(1);
    Ok(next)
}
