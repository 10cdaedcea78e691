use std::time::{Duration, Instant};

/// Scoreboard for one terminal sitting
///
/// The clock is armed when a game starts and frozen when it ends, so the
/// header keeps showing the final time while the player sits on the
/// game-over screen. Nothing here survives the process; best scores are
/// deliberately not persisted anywhere.
pub struct SessionStats {
    started_at: Option<Instant>,
    final_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: None,
            final_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Arm the game clock; called on the transition into `Running`
    pub fn on_game_start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Freeze the clock and fold the final score into the records
    pub fn on_game_over(&mut self, final_score: u32) {
        if let Some(started) = self.started_at.take() {
            self.final_time = started.elapsed();
        }
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Time in the current game: live while it runs, frozen once it ends
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started) => started.elapsed(),
            None => self.final_time,
        }
    }

    /// The clock readout shown in the header, as mm:ss
    pub fn format_time(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
