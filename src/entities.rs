/// All game entity types: pure data, no behavior.
///
/// The simulation in `compute` builds new values of these types every
/// frame; nothing here mutates itself.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in field units.  Origin is the top-left corner and
/// y grows downward, matching screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Hitbox { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bolt fired by the player.  Climbs at a constant speed (units/s)
/// until it leaves the field top or hits an enemy.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub hit: Hitbox,
    pub speed: f32,
}

/// A bolt fired by an enemy, falling on a sinusoidal path.
///
/// `y` and `t` carry the continuous trajectory as floats so repeated
/// steps accumulate no rounding error; the hitbox holds the position
/// derived from them each frame.
#[derive(Clone, Debug)]
pub struct EnemyBullet {
    pub hit: Hitbox,
    /// Centerline of the sway: the x where the bolt was spawned.
    pub spawn_x: f32,
    /// Continuous vertical position of the top edge.
    pub y: f32,
    /// Seconds since spawn, accumulated in fixed frame steps.
    pub t: f32,
    /// Downward speed, units/s.
    pub speed: f32,
    pub amplitude: f32,
    /// Angular frequency, radians/s.
    pub omega: f32,
    pub phase: f32,
    /// Constant sideways speed, units/s.
    pub drift: f32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub hit: Hitbox,
    /// Horizontal speed, units/s.
    pub speed: f32,
    pub lives: u32,
    /// Host-clock timestamp (ms) of the last successful shot; `None`
    /// until the first one, so a shot at t = 0 always goes out.
    pub last_shot: Option<u64>,
}

/// One ship of the fleet.  Membership in the roster is its only state;
/// all movement comes from the shared `FleetState`.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub hit: Hitbox,
}

/// Shared movement state of the whole formation.
#[derive(Clone, Debug)]
pub struct FleetState {
    /// Always +1 (rightward) or -1 (leftward), never 0.
    pub dir: i8,
    /// Horizontal speed, units/s.
    pub speed: f32,
    /// Vertical descent applied to every ship on an edge bounce.
    pub drop: f32,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why the session ended.  `FleetDestroyed` is the win; the other two
/// are losses.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    FleetDestroyed,
    Invaded,
    PlayerDestroyed,
}

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Bolts in flight fired by the player.
    pub bullets: Vec<Bullet>,
    /// Bolts in flight fired by the fleet.
    pub enemy_bullets: Vec<EnemyBullet>,
    pub fleet: FleetState,
    pub score: u32,
    pub status: GameStatus,
    /// Set exactly once, on the frame the status flips to `GameOver`.
    pub outcome: Option<Outcome>,
    pub frame: u64,
}
