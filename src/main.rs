mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use guard_the_tower::compute::{init_state, tick};
use guard_the_tower::constants::TICKS_PER_SECOND;
use guard_the_tower::entities::{AnchorMode, GameState, GameStatus, TickInput};

use display::Viewport;

const FRAME: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND); // 50 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 5 frames (100 ms) is refreshed
/// before expiry.
const HOLD_WINDOW: u64 = 5;

/// Frames a freshly pressed key stays held while waiting for its first OS
/// auto-repeat, which arrives 250-600 ms after the press.
const FIRST_REPEAT_WINDOW: u64 = 30;

/// How long the final frame stays up after the tower falls.
const LOSS_HOLD: Duration = Duration::from_secs(2);

const UP_KEYS: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Anchors {
    /// Roll the four edge anchors once for the whole run.
    Fixed,
    /// Roll a fresh set of anchors for every spawn.
    PerSpawn,
}

impl From<Anchors> for AnchorMode {
    fn from(anchors: Anchors) -> Self {
        match anchors {
            Anchors::Fixed => AnchorMode::Fixed,
            Anchors::PerSpawn => AnchorMode::PerSpawn,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "guard_the_tower", about = "Defend the tower from homing enemies")]
struct Args {
    /// Seed for enemy spawns; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// How spawn anchors are chosen.
    #[arg(long, value_enum, default_value_t = Anchors::Fixed)]
    anchors: Anchors,

    /// Write log output to this file (stdout is the game screen).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Flow {
    Continue { toggle: bool },
    Quit,
}

/// Frames at which a key went down and was last seen (press or repeat).
#[derive(Clone, Copy, Debug)]
struct KeySeen {
    pressed: u64,
    last: u64,
}

impl KeySeen {
    fn held_at(&self, frame: u64) -> bool {
        let since_last = frame.saturating_sub(self.last);
        since_last <= HOLD_WINDOW
            || (self.last == self.pressed && since_last <= FIRST_REPEAT_WINDOW)
    }
}

/// Returns true if any of `keys` is still considered held at `frame`.
fn is_held(key_frame: &HashMap<KeyCode, KeySeen>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|seen| seen.held_at(frame))
            .unwrap_or(false)
    })
}

/// Record a key event.  Returns true only for a fresh press: terminals
/// without release events report auto-repeat as further presses, and those
/// land while the key is still held.
fn record_key(
    key_frame: &mut HashMap<KeyCode, KeySeen>,
    code: KeyCode,
    kind: KeyEventKind,
    frame: u64,
) -> bool {
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => match key_frame.get_mut(&code) {
            Some(seen) if seen.held_at(frame) => {
                seen.last = frame;
                false
            }
            _ => {
                key_frame.insert(code, KeySeen { pressed: frame, last: frame });
                kind == KeyEventKind::Press
            }
        },
        KeyEventKind::Release => {
            key_frame.remove(&code);
            false
        }
    }
}

/// Drain all pending input events without blocking.  Space only counts on
/// a fresh press, so holding it does not re-trigger the toggle.
fn drain_events(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, KeySeen>,
    frame: u64,
) -> Flow {
    let mut toggle = false;
    while let Ok(event) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            continue;
        };
        let fresh = record_key(key_frame, code, kind, frame);
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Char(' ') if fresh => toggle = true,
            _ => {}
        }
    }
    Flow::Continue { toggle }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run ticks until the player quits or the tower falls.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    // Maps each held key → when it went down and when it was last seen.
    let mut key_frame: HashMap<KeyCode, KeySeen> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let toggle = match drain_events(rx, &mut key_frame, frame) {
            Flow::Quit => {
                info!(tick = state.tick, "quit requested");
                return Ok(());
            }
            Flow::Continue { toggle } => toggle,
        };

        let input = TickInput {
            up: is_held(&key_frame, UP_KEYS, frame),
            down: is_held(&key_frame, DOWN_KEYS, frame),
            left: is_held(&key_frame, LEFT_KEYS, frame),
            right: is_held(&key_frame, RIGHT_KEYS, frame),
            toggle_target: toggle,
        };
        *state = tick(state, &input, rng).context("simulation step failed")?;

        let (width, height) = terminal::size().context("failed to read terminal size")?;
        display::render(out, state, Viewport { width, height })?;

        if state.status == GameStatus::Lost {
            thread::sleep(LOSS_HOLD);
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, anchors = ?args.anchors, "starting run");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = init_state(args.anchors.into(), &mut rng);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        tick = state.tick,
        score = state.score,
        tower_life = state.tower.life,
        "run finished"
    );
    result
}
