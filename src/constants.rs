/// Logical screen size shared by every bounds check.
pub const SCREEN_WIDTH: f32 = 1600.0;
pub const SCREEN_HEIGHT: f32 = 900.0;

pub const PLAYER_SIZE: f32 = 90.0;
pub const PLAYER_SPAWN: (f32, f32) = (900.0, 400.0);
/// Pixels per tick for each held direction key.
pub const PLAYER_SPEED: i32 = 10;

pub const ENEMY_SIZE: f32 = 64.0;
pub const ENEMY_SPEED: f32 = 6.0;
/// Number of visual variants an enemy can be drawn with.
pub const ENEMY_VARIANTS: u8 = 3;
/// One enemy spawns every this many ticks, starting at tick 0.
pub const SPAWN_INTERVAL: u64 = 40;

pub const TOWER_SIZE: f32 = 50.0;
pub const TOWER_LIFE: u32 = 3;

/// Score spent to point the enemies at the player.
pub const SWITCH_COST: u32 = 10;
/// The attack target reverts to the tower once the timer exceeds this.
pub const SWITCH_DURATION: u32 = 100;

pub const TICKS_PER_SECOND: u64 = 50;
