//! Score and the one-way win latch

use serde::{Deserialize, Serialize};

/// What a destroyed rock did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Score went up, no threshold crossed
    Scored(u32),
    /// This point crossed the threshold and latched the win
    Won(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub win_threshold: u32,
    game_over: bool,
}

impl ScoreState {
    pub fn new(win_threshold: u32) -> Self {
        Self {
            score: 0,
            win_threshold,
            game_over: false,
        }
    }

    /// One rock, one point. Latches the win the first time the threshold is met.
    pub fn on_obstacle_destroyed(&mut self) -> ScoreOutcome {
        self.score = self.score.saturating_add(1);
        if self.score >= self.win_threshold && !self.game_over {
            self.game_over = true;
            ScoreOutcome::Won(self.score)
        } else {
            ScoreOutcome::Scored(self.score)
        }
    }

    /// Never returns to false once set
    pub fn game_over(&self) -> bool {
        self.game_over
    }
}
