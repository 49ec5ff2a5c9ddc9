/// Session configuration.
///
/// One immutable struct carries every tunable the simulation reads:
/// field size, frame rate, fleet layout and motion, firing parameters,
/// scoring.  A session validates its configuration once, up front, and
/// embeds a copy; nothing is read from globals.

use std::error::Error;
use std::fmt;

// ── Return-fire trajectory parameters ─────────────────────────────────────────

/// Shape of an enemy bolt: box size plus the sinusoidal path it falls
/// along.  All speeds are field units per second.
#[derive(Clone, Debug, PartialEq)]
pub struct SineShot {
    pub w: f32,
    pub h: f32,
    /// Downward speed.
    pub speed: f32,
    /// Half-width of the sway around the spawn column.
    pub amplitude: f32,
    /// Oscillations per second.
    pub frequency: f32,
    /// Initial angle offset, radians.
    pub phase: f32,
    /// Constant sideways speed; positive drifts rightward.
    pub drift: f32,
}

// ── Session configuration ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    // Field
    pub width: f32,
    pub height: f32,
    /// Fixed simulation steps per second; one `tick` covers `1/fps` s.
    pub fps: u32,

    // Player
    pub player_w: f32,
    pub player_h: f32,
    /// Gap between the player's bottom edge and the field bottom.
    pub player_margin: f32,
    /// Horizontal speed, units/s.
    pub player_speed: f32,
    /// Minimum milliseconds between two shots.
    pub cooldown_ms: u64,
    pub lives: u32,

    // Player bolt
    pub bullet_w: f32,
    pub bullet_h: f32,
    /// Upward speed, units/s.
    pub bullet_speed: f32,

    // Fleet grid
    pub fleet_rows: u32,
    pub fleet_cols: u32,
    pub fleet_left: f32,
    pub fleet_top: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub enemy_w: f32,
    pub enemy_h: f32,

    // Fleet motion
    /// Horizontal formation speed, units/s.
    pub fleet_speed: f32,
    /// Descent applied to every ship when the formation bounces.
    pub drop_amount: f32,
    /// Distance from a side at which the formation counts as touching it.
    pub edge_margin: f32,

    // Return fire
    pub enemy_shot: SineShot,
    /// Lower bound on the per-frame firing chance.
    pub fire_floor: f64,
    /// Per-frame firing chance contributed by each surviving enemy.
    pub fire_rate: f64,

    // Scoring and termination
    pub kill_score: u32,
    /// Height of the hazard line above the field bottom; an enemy
    /// crossing it ends the session.
    pub hazard_margin: f32,
}

impl Default for GameConfig {
    /// The 800×600, 60 FPS parameterization: a 3×10 fleet, 250 ms shot
    /// cooldown, 3 lives, 10 points per kill.
    fn default() -> Self {
        GameConfig {
            width: 800.0,
            height: 600.0,
            fps: 60,

            player_w: 60.0,
            player_h: 60.0,
            player_margin: 30.0,
            player_speed: 300.0,
            cooldown_ms: 250,
            lives: 3,

            bullet_w: 8.0,
            bullet_h: 24.0,
            bullet_speed: 480.0,

            fleet_rows: 3,
            fleet_cols: 10,
            fleet_left: 60.0,
            fleet_top: 80.0,
            spacing_x: 70.0,
            spacing_y: 40.0,
            enemy_w: 40.0,
            enemy_h: 25.0,

            fleet_speed: 60.0,
            drop_amount: 15.0,
            edge_margin: 5.0,

            enemy_shot: SineShot {
                w: 4.0,
                h: 12.0,
                speed: 240.0,
                amplitude: 60.0,
                frequency: 1.2,
                phase: 0.0,
                drift: 0.0,
            },
            fire_floor: 0.002,
            fire_rate: 0.05 / 30.0,

            kill_score: 10,
            hazard_margin: 40.0,
        }
    }
}

impl GameConfig {
    /// Duration of one simulation step, seconds.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Reject configurations the simulation cannot run on.  Called by
    /// session construction before any state is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.cooldown_ms == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if self.fleet_rows == 0 || self.fleet_cols == 0 {
            return Err(ConfigError::EmptyFleet);
        }
        Ok(())
    }
}

// ── Validation errors ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    BadDimensions { width: f32, height: f32 },
    ZeroFps,
    ZeroCooldown,
    EmptyFleet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BadDimensions { width, height } => {
                write!(f, "field dimensions must be positive, got {width}x{height}")
            }
            ConfigError::ZeroFps => write!(f, "frame rate must be at least 1"),
            ConfigError::ZeroCooldown => write!(f, "shot cooldown must be at least 1 ms"),
            ConfigError::EmptyFleet => {
                write!(f, "fleet grid needs at least one row and one column")
            }
        }
    }
}

impl Error for ConfigError {}
