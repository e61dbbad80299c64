//! All game entity types — pure data, no logic.

use crate::constants::{
    PLAYER_SIZE, PLAYER_SPAWN, PLAYER_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, TOWER_LIFE, TOWER_SIZE,
};
use crate::geometry::Rect;

// ── Facing ────────────────────────────────────────────────────────────────────

/// Which way the player last moved; the renderer keys its glyph on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    /// Map a summed key delta to a facing.  `None` means no net movement,
    /// which leaves the current facing in place.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Facing::North),
            (1, -1) => Some(Facing::NorthEast),
            (1, 0) => Some(Facing::East),
            (1, 1) => Some(Facing::SouthEast),
            (0, 1) => Some(Facing::South),
            (-1, 1) => Some(Facing::SouthWest),
            (-1, 0) => Some(Facing::West),
            (-1, -1) => Some(Facing::NorthWest),
            _ => None,
        }
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackTarget {
    Tower,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Lost,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Whether the four edge anchors are rolled once per run or per spawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnchorMode {
    #[default]
    Fixed,
    PerSpawn,
}

/// Four candidate spawn points, in order: top, bottom, left, right edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnAnchors(pub [(f32, f32); 4]);

// ── Input ─────────────────────────────────────────────────────────────────────

/// Input for one tick: held direction keys plus the toggle press, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub toggle_target: bool,
}

// ── Player, enemy & tower ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: i32,
    pub facing: Facing,
}

impl Player {
    pub fn spawn() -> Self {
        Player {
            rect: Rect::with_center(PLAYER_SPAWN.0, PLAYER_SPAWN.1, PLAYER_SIZE, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            facing: Facing::East,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Unit velocity, re-aimed every tick.
    pub vx: f32,
    pub vy: f32,
    pub speed: f32,
    /// Visual variant in `0..ENEMY_VARIANTS`.
    pub variant: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    pub rect: Rect,
    pub life: u32,
}

impl Tower {
    pub fn new() -> Self {
        Tower {
            rect: Rect::with_center(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT / 2.0,
                TOWER_SIZE,
                TOWER_SIZE,
            ),
            life: TOWER_LIFE,
        }
    }
}

impl Default for Tower {
    fn default() -> Self {
        Tower::new()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub tower: Tower,
    pub score: u32,
    pub target: AttackTarget,
    /// Ticks since the target last switched to the player.
    pub switch_timer: u32,
    pub anchors: SpawnAnchors,
    pub anchor_mode: AnchorMode,
    pub status: GameStatus,
    pub tick: u64,
}
