/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle plus the tick's input
/// snapshot) and returns a brand-new `GameState`.  Sound is not performed
/// here: `tick` reports it as a list of `SoundCue` requests.

use rand::Rng;

use crate::entities::{
    Basket, Explosion, Fruit, FruitPhase, GameState, GameStatus, SoundCue, TickInput,
    FRUIT_COLORS,
};

// ── Gameplay constants ───────────────────────────────────────────────────────

/// Fall speed (world units per tick) at score 0.
pub const BASE_SPEED: f64 = 5.0;
/// Fall speed once the score reaches the winning threshold.
pub const MAX_SPEED: f64 = 25.0;
/// Basket steering cap: world units per tick toward the target.
pub const AUTO_SPEED: f64 = 100.0;

pub const FRUIT_RADIUS: f64 = 40.0;
pub const BASKET_WIDTH: f64 = 100.0;
pub const BASKET_HEIGHT: f64 = 20.0;
/// Gap between the basket and the bottom of the screen.
pub const BASKET_BOTTOM_MARGIN: f64 = 10.0;

/// The catch region reaches this far above the basket's top edge, so a
/// capture lands a touch early instead of a touch late.
pub const COLLISION_OFFSET: f64 = 20.0;
/// Ticks a captured fruit is held before it bursts.
pub const CAPTURE_DELAY: u32 = 10;
/// Explosion radius gained per tick.
pub const EXPLOSION_GROWTH: f64 = 4.0;

/// Used when no usable threshold is given on the command line.
pub const DEFAULT_WINNING_SCORE: u32 = 100;

// ── Score-driven formulas ────────────────────────────────────────────────────

/// Chance per tick of spawning a fruit: 0.05 at score 0, 0.07 at the
/// winning threshold, linear in between.
pub fn spawn_probability(score: u32, winning_score: u32) -> f64 {
    (1.0 + 0.4 * score as f64 / winning_score as f64) / 20.0
}

/// Fall speed per tick: 5 at score 0, 25 at the winning threshold.
pub fn effective_speed(score: u32, winning_score: u32) -> f64 {
    BASE_SPEED + (MAX_SPEED - BASE_SPEED) * score as f64 / winning_score as f64
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// First command-line argument, if it parses as a usable threshold;
/// anything else silently becomes `DEFAULT_WINNING_SCORE`.
pub fn parse_winning_score(arg: Option<&str>) -> u32 {
    arg.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(DEFAULT_WINNING_SCORE)
}

/// Build the initial game state for a given threshold and world dimensions.
pub fn init_state(winning_score: u32, width: f64, height: f64) -> GameState {
    GameState {
        basket: Basket {
            x: (width - BASKET_WIDTH) / 2.0,
            y: height - BASKET_HEIGHT - BASKET_BOTTOM_MARGIN,
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
        },
        fruits: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        winning_score,
        auto_mode: false,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn toggle_auto_mode(state: &GameState) -> GameState {
    GameState {
        auto_mode: !state.auto_mode,
        ..state.clone()
    }
}

// ── Steering & geometry ──────────────────────────────────────────────────────

/// Strict-overlap test between a fruit's bounding box and the basket's catch
/// region: the basket rectangle with its top edge raised by
/// `COLLISION_OFFSET`.
fn in_catch_zone(basket: &Basket, x: f64, y: f64, radius: f64) -> bool {
    let zone_top = basket.y - COLLISION_OFFSET;
    let zone_bottom = basket.y + basket.height;
    x - radius < basket.x + basket.width
        && x + radius > basket.x
        && y - radius < zone_bottom
        && y + radius > zone_top
}

/// x of the fruit closest to the bottom edge, if any.
fn lowest_fruit_x(fruits: &[Fruit]) -> Option<f64> {
    fruits
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|f| f.x)
}

/// Move the basket toward its per-mode target, capped at `AUTO_SPEED` per
/// tick so it never overshoots, then clamp to the screen edges.
fn steer_basket(state: &GameState, input: &TickInput) -> Basket {
    let center = state.basket.x + state.basket.width / 2.0;
    let target = if state.auto_mode {
        lowest_fruit_x(&state.fruits).unwrap_or(center)
    } else {
        input.pointer_x
    };

    let step = AUTO_SPEED.min((target - center).abs());
    let center = if target > center {
        center + step
    } else {
        center - step
    };

    let x = (center - state.basket.width / 2.0).clamp(0.0, state.width - state.basket.width);
    Basket {
        x,
        ..state.basket.clone()
    }
}

// ── Per-frame tick (pure — RNG and input are injected) ──────────────────────

/// Advance the simulation by one tick.
///
/// All randomness comes through `rng` and every outside-world fact comes
/// through `input`, so callers control determinism (useful for tests with a
/// seeded RNG).  Returns the next state plus the sound cues this tick asks
/// the platform to play.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    rng: &mut impl Rng,
) -> (GameState, Vec<SoundCue>) {
    let frame = state.frame + 1;
    let mut cues: Vec<SoundCue> = Vec::new();
    let was_winning = state.status == GameStatus::Winning;

    // ── 1. Winning threshold ─────────────────────────────────────────────────
    let status = if !was_winning && state.score >= state.winning_score {
        cues.push(SoundCue::Winning);
        GameStatus::Winning
    } else {
        state.status.clone()
    };
    let winning = status == GameStatus::Winning;

    // ── 2. Steer the basket ──────────────────────────────────────────────────
    let basket = if winning {
        state.basket.clone()
    } else {
        steer_basket(state, input)
    };

    // ── 3. Spawn a fruit ─────────────────────────────────────────────────────
    let mut fruits = state.fruits.clone();
    if !winning && rng.gen::<f64>() < spawn_probability(state.score, state.winning_score) {
        fruits.push(Fruit {
            x: rng.gen_range(FRUIT_RADIUS..=(state.width - FRUIT_RADIUS)),
            y: -FRUIT_RADIUS,
            radius: FRUIT_RADIUS,
            color: FRUIT_COLORS[rng.gen_range(0..FRUIT_COLORS.len())],
            phase: FruitPhase::Falling,
        });
    }

    // ── 4. Advance fruit: countdown, fall, loss, capture ─────────────────────
    // Speed and spawn odds use the score as of tick entry; captures below do
    // not feed back into this tick.
    let speed = effective_speed(state.score, state.winning_score);
    let mut score = state.score;
    let mut kept: Vec<Fruit> = Vec::with_capacity(fruits.len());
    let mut burst: Vec<Explosion> = Vec::new();

    for fruit in fruits {
        match fruit.phase {
            // Held fruit keep counting down even while winning, then burst.
            FruitPhase::Captured { delay } => {
                let delay = delay.saturating_sub(1);
                if delay == 0 {
                    burst.push(Explosion {
                        x: fruit.x,
                        y: fruit.y,
                        color: fruit.color,
                        radius: fruit.radius,
                        max_radius: fruit.radius * 3.0,
                        growth: EXPLOSION_GROWTH,
                    });
                } else {
                    kept.push(Fruit {
                        phase: FruitPhase::Captured { delay },
                        ..fruit
                    });
                }
            }
            FruitPhase::Falling => {
                if winning {
                    kept.push(fruit); // frozen until the reset
                    continue;
                }
                let y = fruit.y + speed;

                // Off-screen first; a lost fruit can never also be caught.
                if y + fruit.radius > state.height {
                    if score > 0 {
                        score = score.saturating_sub(1);
                        if score > 0 {
                            cues.push(SoundCue::Sad);
                        }
                    }
                    continue;
                }

                if in_catch_zone(&basket, fruit.x, y, fruit.radius) {
                    score += 1;
                    cues.push(SoundCue::Happy);
                    kept.push(Fruit {
                        y,
                        phase: FruitPhase::Captured {
                            delay: CAPTURE_DELAY,
                        },
                        ..fruit
                    });
                } else {
                    kept.push(Fruit { y, ..fruit });
                }
            }
        }
    }
    let fruits = kept;

    // ── 5. Grow explosions (new ones included), drop finished ones ───────────
    let mut explosions = state.explosions.clone();
    explosions.extend(burst);
    let explosions: Vec<Explosion> = explosions
        .into_iter()
        .map(|e| Explosion {
            radius: e.radius + e.growth,
            ..e
        })
        .filter(|e| e.radius < e.max_radius)
        .collect();

    // ── 6. Reset once the fanfare ends ───────────────────────────────────────
    // Gated on the status at tick entry: the cue cannot have finished on the
    // same tick that started it.
    if was_winning && input.winning_cue_done {
        return (
            GameState {
                basket,
                fruits: Vec::new(),
                explosions: Vec::new(),
                score: 0,
                status: GameStatus::Playing,
                frame,
                ..state.clone()
            },
            cues,
        );
    }

    (
        GameState {
            basket,
            fruits,
            explosions,
            score,
            status,
            frame,
            ..state.clone()
        },
        cues,
    )
}
