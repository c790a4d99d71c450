mod audio;
mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use neon_shooter::config::GameConfig;
use neon_shooter::error::Result;
use neon_shooter::session::{GameStatus, Session};

use audio::TerminalAudio;
use display::{TerminalHud, TerminalSurface};

type TerminalSession = Session<TerminalAudio, TerminalHud, ThreadRng>;

/// Cells the pointer moves per arrow / WASD key event.
const KEY_STEP_CELLS: f32 = 2.0;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Only when `RUST_LOG` is set, and into a file: stderr is the game screen.
fn init_logging(path: &Path) {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(err) => eprintln!("cannot open log file {}: {}", path.display(), err),
    }
}

// ── High-score persistence ────────────────────────────────────────────────────

fn load_high_score(path: &Path) -> u32 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(path: &Path, score: u32) {
    if let Err(err) = std::fs::write(path, score.to_string()) {
        warn!("cannot save high score to {}: {}", path.display(), err);
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

fn handle_mouse(session: &mut TerminalSession, surface: &TerminalSurface, mouse: MouseEvent) {
    let (x, y) = surface.cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => session.move_pointer(x, y),
        MouseEventKind::Down(MouseButton::Left) => {
            session.press();
            session.move_pointer(x, y);
        }
        MouseEventKind::Up(MouseButton::Left) => session.release(),
        _ => {}
    }
}

fn handle_key(session: &mut TerminalSession, surface: &TerminalSurface, key: KeyEvent) -> Flow {
    if key.kind == KeyEventKind::Release {
        if key.code == KeyCode::Char(' ') {
            session.release();
        }
        return Flow::Continue;
    }

    let (cell_w, cell_h) = surface.cell_size();
    let (step_x, step_y) = (cell_w * KEY_STEP_CELLS, cell_h * KEY_STEP_CELLS);
    let pointer = session.pointer();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => session.press(),
        KeyCode::Char('r') | KeyCode::Char('R') if session.status() == GameStatus::GameOver => {
            session.restart();
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            session.move_pointer(pointer.x - step_x, pointer.y);
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            session.move_pointer(pointer.x + step_x, pointer.y);
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            session.move_pointer(pointer.x, pointer.y - step_y);
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            session.move_pointer(pointer.x, pointer.y + step_y);
        }
        _ => {}
    }
    Flow::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: drain input, step while playing, draw every frame.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / config.display.fps.max(1) as f64);
    let high_score_path = config.high_score_path();
    let mut high_score = load_high_score(&high_score_path);

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(
        cols,
        rows,
        config.display.cell_width,
        config.display.cell_height,
        config.display.glyph_sprites,
    );
    let (width, height) = surface.world_size();
    let mut session: TerminalSession = Session::new(
        width,
        height,
        TerminalAudio::new(&config.audio),
        TerminalHud::new(high_score),
        thread_rng(),
    );

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if let Flow::Quit = handle_key(&mut session, &surface, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut session, &surface, mouse),
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    let (width, height) = surface.world_size();
                    session.resize(width, height);
                }
                _ => {}
            }
        }

        let was_playing = session.status() == GameStatus::Playing;
        session.frame();

        if was_playing && session.status() == GameStatus::GameOver {
            let score = session.final_score();
            if score > high_score {
                high_score = score;
                save_high_score(&high_score_path, high_score);
                session.ui_mut().set_best_score(high_score);
                info!("new high score {}", high_score);
            }
        }

        session.render(&mut surface);
        surface.present(out)?;
        session.audio_mut().flush_bell(out)?;
        let (cols, rows) = surface.size();
        session.ui().draw(out, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = GameConfig::load()?;
    init_logging(&config.paths.log_file);
    info!("starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = game_loop(&mut out, &config, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
