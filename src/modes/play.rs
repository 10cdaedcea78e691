use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GamePhase, SnakeEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Interactive terminal session: one engine, one keyboard, one screen.
pub struct PlayMode<R = ThreadRng> {
    engine: SnakeEngine<R>,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(SnakeEngine::new(config))
    }
}

impl<R: Rng> PlayMode<R> {
    pub fn with_engine(engine: SnakeEngine<R>) -> Self {
        Self {
            engine,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval);
        // A stalled process skips missed steps instead of bursting to
        // catch up.
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        let phase_before = self.engine.phase();
                        self.handle_event(event);
                        let phase_after = self.engine.phase();
                        if phase_before != GamePhase::Running && phase_after == GamePhase::Running {
                            self.start_game(&mut tick_timer);
                        } else if phase_before == GamePhase::Over && phase_after == GamePhase::Idle {
                            debug!("board reset");
                        }
                    }
                }

                // Game logic tick; the engine ignores it outside Running
                _ = tick_timer.tick() => {
                    if self.engine.phase() == GamePhase::Running {
                        self.engine.tick();
                        if self.engine.phase() == GamePhase::Over {
                            self.finish_game();
                        }
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.stats.games_played,
            best = self.stats.best_score,
            "session ended"
        );

        Ok(())
    }

    /// Funnel one terminal event through the key map into the engine
    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.engine.submit_direction(direction),
                KeyAction::Restart => self.engine.submit_restart(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn start_game(&mut self, tick_timer: &mut Interval) {
        // A fresh game gets a full interval before its first step.
        tick_timer.reset();
        self.stats.on_game_start();
        debug!(best = self.stats.best_score, "game started");
    }

    fn finish_game(&mut self) {
        let snapshot = self.engine.snapshot();
        self.stats.on_game_over(snapshot.score);
        info!(
            score = snapshot.score,
            best = self.stats.best_score,
            collision = ?snapshot.collision,
            "game over"
        );
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_mode_starts_idle() {
        let mode = PlayMode::new(GameConfig::default());
        assert_eq!(mode.engine.phase(), GamePhase::Idle);
        assert_eq!(mode.stats.games_played, 0);
        assert_eq!(mode.stats.elapsed(), Duration::ZERO);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_steer_event_reaches_the_engine() {
        let mut mode = PlayMode::new(GameConfig::default());

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        mode.handle_event(Event::Key(key));

        assert_eq!(mode.engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_quit_key_sets_the_flag() {
        let mut mode = PlayMode::new(GameConfig::default());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        mode.handle_event(Event::Key(key));

        assert!(mode.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = PlayMode::new(GameConfig::default());

        let key = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        mode.handle_event(Event::Key(key));

        assert_eq!(mode.engine.phase(), GamePhase::Idle);
    }
}
