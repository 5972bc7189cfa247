/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FruitColor {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
}

/// Palette the spawner picks from, uniformly.
pub const FRUIT_COLORS: [FruitColor; 6] = [
    FruitColor::Red,
    FruitColor::Green,
    FruitColor::Blue,
    FruitColor::Yellow,
    FruitColor::Orange,
    FruitColor::Purple,
];

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Winning,
}

/// Sound requests emitted by a tick; the platform layer decides how (and
/// whether) to play them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    /// A fruit landed in the basket.
    Happy,
    /// A fruit was lost off the bottom edge.
    Sad,
    /// The winning threshold was just crossed.  Played on a retained channel
    /// whose completion gates the reset back to play.
    Winning,
}

// ── Fruit ─────────────────────────────────────────────────────────────────────

/// Lifecycle of a single fruit.  A fruit never returns to `Falling` once
/// captured; the delay counter only exists while captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FruitPhase {
    Falling,
    /// Held in the basket; ticks remaining until it bursts into an explosion.
    Captured { delay: u32 },
}

#[derive(Clone, Debug)]
pub struct Fruit {
    /// Horizontal center (world units).
    pub x: f64,
    /// Vertical center (world units, grows downward).
    pub y: f64,
    pub radius: f64,
    pub color: FruitColor,
    pub phase: FruitPhase,
}

/// A ring that grows every tick and disappears at its maximum radius.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub color: FruitColor,
    pub radius: f64,
    /// Removal threshold: 3× the originating fruit's radius.
    pub max_radius: f64,
    /// Radius gained per tick.
    pub growth: f64,
}

// ── Basket ────────────────────────────────────────────────────────────────────

/// The player's rectangle.  Only `x` ever changes after init.
#[derive(Clone, Debug)]
pub struct Basket {
    /// Left edge (world units).
    pub x: f64,
    /// Top edge (world units).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ── Per-tick input snapshot ───────────────────────────────────────────────────

/// Everything the outside world feeds into one simulation tick.
#[derive(Clone, Debug)]
pub struct TickInput {
    /// Pointer x in world units; the steering target in manual mode.
    pub pointer_x: f64,
    /// True once the winning fanfare has finished sounding.  Ignored unless
    /// the state was already `Winning` when the tick began.
    pub winning_cue_done: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub basket: Basket,
    pub fruits: Vec<Fruit>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Score at which the game is won; fixed for the session.
    pub winning_score: u32,
    /// True while the basket steers itself to the lowest fruit.
    pub auto_mode: bool,
    pub status: GameStatus,
    pub frame: u64,
    /// World dimensions in world units, fixed at startup.
    pub width: f64,
    pub height: f64,
}
