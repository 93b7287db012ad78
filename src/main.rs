//! Terminal Blockfall runner.
//!
//! Owns the clock: gravity ticks every `fall_interval_ms` of the current
//! level, held movement keys repeat through the DAS/ARR handler, and frames
//! are only redrawn when the snapshot changes.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use blockfall::core::{GameSession, GameSnapshot, HighScoreStore};
use blockfall::input::{should_quit, InputHandler};
use blockfall::store::FileStore;
use blockfall::term::{
    fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use blockfall::types::{GameAction, FRAME_MS};
use blockfall::{logging, Config};

/// Redraw an unchanged frame at least this often.
const STATIC_REDRAW_MS: u64 = 500;

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(config.log_path.as_deref())?;
    log::info!(
        "starting with seed {} and high score file {}",
        config.seed,
        config.high_score_path.display()
    );

    let store = FileStore::new(&config.high_score_path);
    let mut session = GameSession::with_store(config.seed, store);
    session.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::info!(
        "exiting (score {}, best {})",
        session.score(),
        session.high_score()
    );
    result
}

fn run<S: HighScoreStore>(
    term: &mut TerminalRenderer,
    session: &mut GameSession<S>,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut last_fall = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&snap)) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    handle_key(session, &mut input, key);
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }
        let elapsed_ms = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();

        for action in input.update(elapsed_ms) {
            session.apply_action(action);
        }

        // Gravity only runs while the piece is in play; otherwise the timer
        // restarts so unpausing does not drop a row immediately.
        let interval = Duration::from_millis(session.fall_interval_ms() as u64);
        if session.paused() || session.game_over() {
            last_fall = Instant::now();
        } else if last_fall.elapsed() >= interval {
            last_fall = Instant::now();
            session.tick();
        }

        if let Some(event) = session.take_last_event() {
            log::debug!(
                "lock {}: {} lines (+{}), drop +{}, combo {}",
                event.kind.as_str(),
                event.lines_cleared,
                event.line_clear_score,
                event.drop_bonus,
                event.combo
            );
        }
    }
}

fn handle_key<S: HighScoreStore>(
    session: &mut GameSession<S>,
    input: &mut InputHandler,
    key: KeyEvent,
) {
    match key.kind {
        KeyEventKind::Press => {
            let Some(action) = input.handle_key_press(key) else {
                return;
            };
            let applied = session.apply_action(action);
            log::trace!("{:?} -> {} (applied: {})", key.code, action.as_str(), applied);
            if matches!(action, GameAction::Pause | GameAction::Restart) {
                input.reset();
            }
        }
        // Terminal auto-repeat is ignored; DAS/ARR handles repeats.
        KeyEventKind::Repeat => {}
        KeyEventKind::Release => input.handle_key_release(key),
    }
}
