/// All game entity types — pure data, no logic — plus the gameplay constants
/// that define their fixed shapes and speeds.

// ── Play-field dimensions (logical pixels) ───────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const MIN_WIDTH: i32 = 600;
pub const MIN_HEIGHT: i32 = 400;

// ── Entity shapes & speeds ───────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
pub const PLAYER_SPEED: i32 = 5;
/// Gap kept between the player's base and the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;

pub const PROJECTILE_WIDTH: i32 = 4;
pub const PROJECTILE_HEIGHT: i32 = 10;
pub const PROJECTILE_SPEED: i32 = 7;

pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 30;
pub const ENEMY_MIN_SPEED: i32 = 2;
pub const ENEMY_MAX_SPEED: i32 = 4;

/// One enemy appears every time the spawn timer reaches this tick count.
pub const SPAWN_INTERVAL: u32 = 60;
/// Score awarded per enemy destroyed.
pub const KILL_REWARD: u32 = 10;

// ── Screens ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    /// Modal: entered from Menu or GameOver, returns to whichever invoked it.
    History,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    /// Pixels travelled upward per tick.
    pub speed: i32,
}

// ── Player & enemy ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Active shots, oldest first; order is preserved across ticks.
    pub projectiles: Vec<Projectile>,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Pixels travelled downward per tick; fixed at spawn.
    pub speed: i32,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Best score seen across all recorded games (updated live during play).
    pub high_score: u32,
    /// Ticks since the last enemy spawn.
    pub spawn_timer: u32,
    pub screen: Screen,
    pub width: i32,
    pub height: i32,
}
