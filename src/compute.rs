/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where randomness is involved, an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG, so a seeded generator makes every run reproducible.
///
/// The host drives one `tick` per rendered frame; the step length is
/// the fixed `1/fps` from the configuration, never wall-clock time.

use rand::Rng;

use crate::config::{ConfigError, GameConfig};
use crate::entities::{
    Bullet, Enemy, EnemyBullet, FleetState, GameState, GameStatus, Hitbox, Outcome, Player,
};

/// Sideways slack past the field edges before a drifting enemy bolt is
/// culled; vertical culling has none.
const SIDE_SLACK: f32 = 40.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Strict-overlap AABB test: boxes that merely share an edge do not
/// collide.
pub fn boxes_intersect(a: &Hitbox, b: &Hitbox) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

// ── Constructors ──────────────────────────────────────────────────────────────

fn spawn_player(config: &GameConfig) -> Player {
    Player {
        hit: Hitbox::new(
            (config.width - config.player_w) / 2.0,
            config.height - config.player_margin - config.player_h,
            config.player_w,
            config.player_h,
        ),
        speed: config.player_speed,
        lives: config.lives,
        last_shot: None,
    }
}

fn spawn_fleet(config: &GameConfig) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity((config.fleet_rows * config.fleet_cols) as usize);
    for row in 0..config.fleet_rows {
        for col in 0..config.fleet_cols {
            enemies.push(Enemy {
                hit: Hitbox::new(
                    config.fleet_left + col as f32 * config.spacing_x,
                    config.fleet_top + row as f32 * config.spacing_y,
                    config.enemy_w,
                    config.enemy_h,
                ),
            });
        }
    }
    enemies
}

fn build_state(config: &GameConfig) -> GameState {
    GameState {
        player: spawn_player(config),
        enemies: spawn_fleet(config),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        fleet: FleetState {
            dir: 1,
            speed: config.fleet_speed,
            drop: config.drop_amount,
        },
        score: 0,
        status: GameStatus::Playing,
        outcome: None,
        frame: 0,
        config: config.clone(),
    }
}

/// Build the initial state for a session: player centered at the
/// bottom, the enemy grid in formation, fleet moving right.  Fails
/// fast on a configuration the simulation cannot run on.
pub fn init_state(config: &GameConfig) -> Result<GameState, ConfigError> {
    config.validate()?;
    Ok(build_state(config))
}

/// Rebuild the session from its own configuration: fresh player and
/// fleet, cleared projectiles, score 0, back to `Playing`.  Valid from
/// any state; the embedded configuration was already validated.
pub fn reset(state: &GameState) -> GameState {
    build_state(&state.config)
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    shift_player(state, -1.0)
}

pub fn move_player_right(state: &GameState) -> GameState {
    shift_player(state, 1.0)
}

/// One frame's travel in the given direction, clamped to the field.
fn shift_player(state: &GameState, sign: f32) -> GameState {
    let step = state.player.speed * state.config.frame_dt();
    let mut hit = state.player.hit;
    hit.x = (hit.x + sign * step)
        .max(0.0)
        .min(state.config.width - hit.w);
    GameState {
        player: Player {
            hit,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bolt from the player's mid-top, gated by the shot cooldown.
///
/// `now_ms` comes from the host's monotonic millisecond clock.  A
/// request inside the cooldown window is dropped, not queued.
pub fn player_shoot(state: &GameState, now_ms: u64) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let ready = match state.player.last_shot {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= state.config.cooldown_ms,
    };
    if !ready {
        return state.clone();
    }

    let bolt = Bullet {
        hit: Hitbox::new(
            state.player.hit.center_x() - state.config.bullet_w / 2.0,
            state.player.hit.top() - state.config.bullet_h,
            state.config.bullet_w,
            state.config.bullet_h,
        ),
        speed: state.config.bullet_speed,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bolt);
    GameState {
        player: Player {
            last_shot: Some(now_ms),
            ..state.player.clone()
        },
        bullets,
        ..state.clone()
    }
}

// ── Return fire ───────────────────────────────────────────────────────────────

fn spawn_enemy_bullet(config: &GameConfig, shooter: &Enemy) -> EnemyBullet {
    let shot = &config.enemy_shot;
    let spawn_x = shooter.hit.center_x();
    let y = shooter.hit.bottom();
    EnemyBullet {
        hit: Hitbox::new(spawn_x - shot.w / 2.0, y, shot.w, shot.h),
        spawn_x,
        y,
        t: 0.0,
        speed: shot.speed,
        amplitude: shot.amplitude,
        omega: std::f32::consts::TAU * shot.frequency,
        phase: shot.phase,
        drift: shot.drift,
    }
}

/// One fixed step of the sinusoidal fall.  `y` and `t` stay
/// continuous; the hitbox holds the derived position.
fn advance_enemy_bullet(b: &EnemyBullet, dt: f32) -> EnemyBullet {
    let t = b.t + dt;
    let y = b.y + b.speed * dt;
    let center_x = b.spawn_x + b.amplitude * (b.phase + b.omega * t).sin() + b.drift * t;
    let mut hit = b.hit;
    hit.x = center_x - hit.w / 2.0;
    hit.y = y;
    EnemyBullet {
        hit,
        y,
        t,
        ..b.clone()
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ─────────────────────────────

/// Advance the simulation by one fixed frame step.
///
/// Once the session is over the state passes through unchanged; the
/// only way back to `Playing` is `reset`.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let config = &state.config;
    let dt = config.frame_dt();
    let frame = state.frame + 1;

    // ── 1. Player bolts climb; cull above the field ──────────────────────────
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let mut hit = b.hit;
            hit.y -= b.speed * dt;
            if hit.bottom() < 0.0 {
                None
            } else {
                Some(Bullet { hit, ..b.clone() })
            }
        })
        .collect();

    // ── 2. Enemy bolts fall; cull below the field or far off a side ──────────
    let enemy_bullets: Vec<EnemyBullet> = state
        .enemy_bullets
        .iter()
        .filter_map(|b| {
            let b = advance_enemy_bullet(b, dt);
            let gone = b.hit.top() > config.height
                || b.hit.right() < -SIDE_SLACK
                || b.hit.left() > config.width + SIDE_SLACK;
            if gone {
                None
            } else {
                Some(b)
            }
        })
        .collect();

    // ── 3. Fleet advance: translate, then bounce on edge contact ─────────────
    let step = f32::from(state.fleet.dir) * state.fleet.speed * dt;
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let mut hit = e.hit;
            hit.x += step;
            Enemy { hit }
        })
        .collect();

    let edge_hit = enemies.iter().any(|e| {
        e.hit.right() >= config.width - config.edge_margin || e.hit.left() <= config.edge_margin
    });
    let mut fleet = state.fleet.clone();
    if edge_hit {
        // The reversal takes effect on the next frame; the descent
        // happens now, at the pre-reversal x positions.
        fleet.dir = -fleet.dir;
        for e in &mut enemies {
            e.hit.y += fleet.drop;
        }
    }

    // ── 4. Collision: player bolts ↔ enemies (mark, then sweep) ──────────────
    let mut dead_enemies: Vec<usize> = Vec::new();
    let mut spent_bullets: Vec<usize> = Vec::new();
    for (ei, enemy) in enemies.iter().enumerate() {
        for (bi, bullet) in bullets.iter().enumerate() {
            if boxes_intersect(&enemy.hit, &bullet.hit) {
                if !dead_enemies.contains(&ei) {
                    dead_enemies.push(ei);
                }
                if !spent_bullets.contains(&bi) {
                    spent_bullets.push(bi);
                }
            }
        }
    }
    let score = state.score + dead_enemies.len() as u32 * config.kill_score;

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !dead_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent_bullets.contains(i))
        .map(|(_, b)| b)
        .collect();

    // ── 5. Termination: hazard line, body contact, empty roster ──────────────
    let mut status = GameStatus::Playing;
    let mut outcome = None;
    let mut lives = state.player.lives;

    let hazard_y = config.height - config.hazard_margin;
    for enemy in &enemies {
        if enemy.hit.bottom() >= hazard_y {
            status = GameStatus::GameOver;
            outcome = Some(Outcome::Invaded);
            break;
        }
        if boxes_intersect(&enemy.hit, &state.player.hit) {
            lives = lives.saturating_sub(1);
            status = GameStatus::GameOver;
            outcome = Some(Outcome::Invaded);
            break;
        }
    }

    if status == GameStatus::Playing && enemies.is_empty() {
        status = GameStatus::GameOver;
        outcome = Some(Outcome::FleetDestroyed);
    }

    // ── 6. Return fire: one uniform draw per frame ───────────────────────────
    let mut enemy_bullets = enemy_bullets;
    if status == GameStatus::Playing && !enemies.is_empty() {
        let chance = (config.fire_rate * enemies.len() as f64).max(config.fire_floor);
        if rng.gen::<f64>() < chance {
            let shooter = &enemies[rng.gen_range(0..enemies.len())];
            enemy_bullets.push(spawn_enemy_bullet(config, shooter));
        }
    }

    // ── 7. Collision: enemy bolts ↔ player ───────────────────────────────────
    let mut player_hit = false;
    let enemy_bullets: Vec<EnemyBullet> = enemy_bullets
        .into_iter()
        .filter(|b| {
            if status == GameStatus::Playing && boxes_intersect(&b.hit, &state.player.hit) {
                player_hit = true;
                false
            } else {
                true
            }
        })
        .collect();

    // Several simultaneous hits still cost a single life.
    if player_hit {
        lives = lives.saturating_sub(1);
        if lives == 0 {
            status = GameStatus::GameOver;
            outcome = Some(Outcome::PlayerDestroyed);
        }
    }

    GameState {
        player: Player {
            lives,
            ..state.player.clone()
        },
        enemies,
        bullets,
        enemy_bullets,
        fleet,
        score,
        status,
        outcome,
        frame,
        config: state.config.clone(),
    }
}
