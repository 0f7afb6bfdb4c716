use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use space_shooter::compute::{fire, handle_resize, init_state, move_player, reset, tick};
use space_shooter::display::{self, CELL_HEIGHT, CELL_WIDTH};
use space_shooter::entities::{GameState, Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
use space_shooter::history::{self, ScoreHistory};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminal cells → logical pixels.
fn to_px(cols: u16, rows: u16) -> (i32, i32) {
    (cols as i32 * CELL_WIDTH, rows as i32 * CELL_HEIGHT)
}

// ── History overlay ───────────────────────────────────────────────────────────

/// Modal score-history screen, reachable from the menu and the game-over
/// screen.  Blocks on input until dismissed; returns `true` → quit program.
fn show_history<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &mut GameState,
    history: &ScoreHistory,
) -> std::io::Result<bool> {
    let caller = state.screen.clone();
    state.screen = Screen::History;

    loop {
        display::render(out, state, history)?;
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => {
                if is_quit(code, modifiers) {
                    return Ok(true);
                }
                if matches!(code, KeyCode::Esc | KeyCode::Backspace) {
                    state.screen = caller;
                    return Ok(false);
                }
            }
            Ok(Event::Resize(cols, rows)) => {
                let (w, h) = to_px(cols, rows);
                *state = handle_resize(state, w, h);
            }
            Ok(_) => {}
            Err(_) => return Ok(true), // input thread gone — treat as window close
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs while the state machine is in `Playing`.
/// Returns `true` → quit program,  `false` → state moved to `GameOver`.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for each key, so held direction keys move the player
/// every tick.  Shooting is edge-triggered: one shot per discrete press
/// event, never from the hold heuristic.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    history: &mut ScoreHistory,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    while state.screen == Screen::Playing {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                })) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        if is_quit(code, modifiers) {
                            return Ok(true);
                        }
                        if code == KeyCode::Char(' ') {
                            *state = fire(state);
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Ok(Event::Resize(cols, rows)) => {
                    let (w, h) = to_px(cols, rows);
                    *state = handle_resize(state, w, h);
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(true),
            }
        }

        // ── Held direction keys move the player every tick ────────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame);
        if left || right {
            *state = move_player(state, left, right);
        }

        *state = tick(state, &mut rng);

        if state.screen == Screen::GameOver {
            // Persist this session exactly once, at the terminal collision.
            history.add(state.score);
            state.high_score = history.high_score();
            return Ok(false);
        }

        display::render(out, state, history)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(false)
}

// ── State machine ─────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut history = ScoreHistory::load(history::HISTORY_FILE);
    // Classic 800×600 field when the terminal size cannot be queried
    let (cols, rows) = terminal::size().unwrap_or((
        (SCREEN_WIDTH / CELL_WIDTH) as u16,
        (SCREEN_HEIGHT / CELL_HEIGHT) as u16,
    ));
    let (w, h) = to_px(cols, rows);
    let mut state = init_state(w, h, history.high_score());

    loop {
        match state.screen {
            Screen::Menu => {
                display::render(out, &state, &history)?;
                match rx.recv() {
                    Ok(Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        modifiers,
                        ..
                    })) => {
                        if is_quit(code, modifiers) || code == KeyCode::Esc {
                            break;
                        }
                        match code {
                            KeyCode::Char(' ') => state = reset(&state),
                            KeyCode::Char('h') | KeyCode::Char('H') => {
                                if show_history(out, rx, &mut state, &history)? {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                    Ok(Event::Resize(cols, rows)) => {
                        let (w, h) = to_px(cols, rows);
                        state = handle_resize(&state, w, h);
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            Screen::Playing => {
                if game_loop(out, &mut state, rx, &mut history)? {
                    break;
                }
            }
            Screen::GameOver => {
                display::render(out, &state, &history)?;
                match rx.recv() {
                    Ok(Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        modifiers,
                        ..
                    })) => {
                        if is_quit(code, modifiers) {
                            break;
                        }
                        match code {
                            KeyCode::Char('r') | KeyCode::Char('R') => state = reset(&state),
                            KeyCode::Char('h') | KeyCode::Char('H') => {
                                if show_history(out, rx, &mut state, &history)? {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                    Ok(Event::Resize(cols, rows)) => {
                        let (w, h) = to_px(cols, rows);
                        state = handle_resize(&state, w, h);
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            // History is modal and restores its caller before returning;
            // landing here means a stale state, so fall back to the menu.
            Screen::History => state.screen = Screen::Menu,
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
