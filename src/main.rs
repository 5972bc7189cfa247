mod audio;
mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use fruit_catcher::compute::{init_state, parse_winning_score, tick, toggle_auto_mode};
use fruit_catcher::entities::{GameState, SoundCue, TickInput};

use audio::Audio;
use display::{PixelBuf, MIN_COLS, MIN_ROWS, WORLD_SCALE};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 ticks/sec

/// Frames the reset waits when no audio device exists, standing in for the
/// fanfare's completion signal (the fanfare runs just under two seconds).
const WINNING_CUE_FRAMES: u64 = 120;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame: drain input, advance the pure
/// simulation one tick, hand its sound requests to the audio layer, render,
/// then sleep off the rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    buf: &mut PixelBuf,
    rx: &mpsc::Receiver<Event>,
    audio: &mut Option<Audio>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    // Pointer starts over the basket so the first tick doesn't yank it.
    let mut pointer_x = state.basket.x + state.basket.width / 2.0;

    // Deadline substituting for "fanfare finished" when audio is absent.
    let mut win_cue_deadline: u64 = 0;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(());
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char(' ') => *state = toggle_auto_mode(state),
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                    column,
                    ..
                }) => {
                    // Cell centre, in world units.
                    pointer_x = (column as f64 + 0.5) * WORLD_SCALE;
                }
                _ => {}
            }
        }

        let winning_cue_done = match audio.as_ref() {
            Some(a) => !a.winning_active(),
            None => state.frame >= win_cue_deadline,
        };
        let input = TickInput {
            pointer_x,
            winning_cue_done,
        };

        let (next, cues) = tick(state, &input, &mut rng);
        *state = next;

        for cue in cues {
            if cue == SoundCue::Winning && audio.is_none() {
                win_cue_deadline = state.frame + WINNING_CUE_FRAMES;
            }
            if let Some(a) = audio.as_mut() {
                a.play(cue);
            }
        }

        display::render(out, buf, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let winning_score = parse_winning_score(std::env::args().nth(1).as_deref());

    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        eprintln!(
            "Terminal too small: need at least {}x{} cells.",
            MIN_COLS, MIN_ROWS
        );
        std::process::exit(1);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::DisableLineWrap)?;

    // Best-effort: machines with no output device just play silently.
    let mut audio = Audio::new().ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    // Two pixels per cell vertically; WORLD_SCALE world units per pixel.
    let width = cols as f64 * WORLD_SCALE;
    let height = rows as f64 * 2.0 * WORLD_SCALE;
    let mut state = init_state(winning_score, width, height);
    let mut buf = PixelBuf::new(cols, rows);

    let result = game_loop(&mut out, &mut state, &mut buf, &rx, &mut audio);

    // Always restore the terminal
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
