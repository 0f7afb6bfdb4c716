/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Enemy, GameState, Player, Projectile, Screen, ENEMY_HEIGHT, ENEMY_MAX_SPEED, ENEMY_MIN_SPEED,
    ENEMY_WIDTH, KILL_REWARD, MIN_HEIGHT, MIN_WIDTH, PLAYER_BOTTOM_MARGIN, PLAYER_HEIGHT,
    PLAYER_SPEED, PLAYER_WIDTH, PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH,
    SPAWN_INTERVAL,
};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding-box overlap.  Strict inequalities: rectangles that
/// merely touch along an edge do not overlap.
pub fn rects_overlap(
    ax: i32, ay: i32, aw: i32, ah: i32,
    bx: i32, by: i32, bw: i32, bh: i32,
) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player(width: i32, height: i32) -> Player {
    Player {
        x: width / 2 - PLAYER_WIDTH / 2,
        y: height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
        projectiles: Vec::new(),
    }
}

/// Build the initial game state for the given play-field dimensions.
/// Starts on the menu screen; `reset` begins an actual session.
pub fn init_state(width: i32, height: i32, high_score: u32) -> GameState {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    GameState {
        player: spawn_player(width, height),
        enemies: Vec::new(),
        score: 0,
        high_score,
        spawn_timer: 0,
        screen: Screen::Menu,
        width,
        height,
    }
}

/// The restart transition: every session field back to its initial value,
/// play-field dimensions and recorded high score carried over.
pub fn reset(state: &GameState) -> GameState {
    GameState {
        player: spawn_player(state.width, state.height),
        enemies: Vec::new(),
        score: 0,
        spawn_timer: 0,
        screen: Screen::Playing,
        ..*state
    }
}

/// Build a fresh enemy: random column, random head start above the top edge,
/// random descent speed fixed for its lifetime.
pub fn spawn_enemy(rng: &mut impl Rng, screen_width: i32) -> Enemy {
    Enemy {
        x: rng.gen_range(0..=screen_width - ENEMY_WIDTH),
        y: rng.gen_range(-100..-40),
        speed: rng.gen_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED),
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Shift the player by the held direction flags, clamped to the play field.
/// Both flags held cancel out (apart from clamping at an edge).
pub fn move_player(state: &GameState, left: bool, right: bool) -> GameState {
    let mut x = state.player.x;
    if left {
        x = (x - PLAYER_SPEED).max(0);
    }
    if right {
        x = (x + PLAYER_SPEED).min(state.width - PLAYER_WIDTH);
    }
    GameState {
        player: Player {
            x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a projectile from the player's nose.  No cap: shots self-limit by
/// leaving the screen.
pub fn fire(state: &GameState) -> GameState {
    let shot = Projectile {
        x: state.player.x + PLAYER_WIDTH / 2 - PROJECTILE_WIDTH / 2,
        y: state.player.y,
        speed: PROJECTILE_SPEED,
    };
    let mut projectiles = state.player.projectiles.clone();
    projectiles.push(shot);
    GameState {
        player: Player {
            projectiles,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Apply a new play-field size, clamped to the configured minimums.  The
/// player is re-anchored to the bottom and pulled back inside the right
/// bound; runs on every resize event regardless of screen.
pub fn handle_resize(state: &GameState, new_width: i32, new_height: i32) -> GameState {
    let width = new_width.max(MIN_WIDTH);
    let height = new_height.max(MIN_HEIGHT);
    GameState {
        player: Player {
            x: state.player.x.min(width - PLAYER_WIDTH),
            y: height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            projectiles: state.player.projectiles.clone(),
        },
        width,
        height,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Order within the tick: projectiles, spawner, enemies, then the two
/// collision passes.  A terminal collision flips the screen to `GameOver`;
/// score gained from projectile kills in the same tick is kept.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    // ── 1. Advance projectiles, dropping those past the top edge ─────────────
    let projectiles: Vec<Projectile> = state
        .player
        .projectiles
        .iter()
        .filter_map(|p| {
            let y = p.y - p.speed;
            if y < 0 {
                None
            } else {
                Some(Projectile { y, ..*p })
            }
        })
        .collect();

    // ── 2. Spawner: fixed-period trigger, exactly one enemy per period ───────
    let mut enemies = state.enemies.clone();
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer >= SPAWN_INTERVAL {
        enemies.push(spawn_enemy(rng, state.width));
        spawn_timer = 0;
    }

    // ── 3. Advance enemies, dropping those fully below the bottom ────────────
    let enemies: Vec<Enemy> = enemies
        .iter()
        .filter_map(|e| {
            let y = e.y + e.speed;
            if y > state.height {
                None
            } else {
                Some(Enemy { y, ..*e })
            }
        })
        .collect();

    // ── 4. Collision pass 1: projectiles ↔ enemies ───────────────────────────
    // Mark-then-compact so removal never skips an element mid-scan.  Each
    // projectile destroys at most one enemy (first match in list order), and
    // an already-marked enemy cannot be hit twice.
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut spent_projectiles: Vec<usize> = Vec::new();

    for (pi, p) in projectiles.iter().enumerate() {
        for (ei, e) in enemies.iter().enumerate() {
            if killed_enemies.contains(&ei) {
                continue;
            }
            if rects_overlap(
                p.x, p.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT,
                e.x, e.y, ENEMY_WIDTH, ENEMY_HEIGHT,
            ) {
                killed_enemies.push(ei);
                spent_projectiles.push(pi);
                break;
            }
        }
    }

    let score = state.score + KILL_REWARD * killed_enemies.len() as u32;

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();

    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent_projectiles.contains(i))
        .map(|(_, p)| p)
        .collect();

    // ── 5. Collision pass 2: player ↔ remaining enemies (terminal) ───────────
    let player_hit = enemies.iter().any(|e| {
        rects_overlap(
            state.player.x, state.player.y, PLAYER_WIDTH, PLAYER_HEIGHT,
            e.x, e.y, ENEMY_WIDTH, ENEMY_HEIGHT,
        )
    });

    let screen = if player_hit {
        Screen::GameOver
    } else {
        Screen::Playing
    };

    GameState {
        player: Player {
            projectiles,
            ..state.player.clone()
        },
        enemies,
        score,
        high_score: state.high_score.max(score),
        spawn_timer,
        screen,
        ..*state
    }
}
