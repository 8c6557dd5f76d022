//! Best-score tracking
//!
//! Persisted as `{"high_score": <integer>}`. Every storage failure is logged
//! and swallowed: a broken file reads as 0, a failed write is dropped.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// On-disk document
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// Process-wide best score backed by a storage document
pub struct HighScore {
    best: u64,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}

impl HighScore {
    /// Load the stored best score, defaulting to 0
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let best = match storage.read() {
            Ok(Some(json)) => match serde_json::from_str::<HighScoreRecord>(&json) {
                Ok(record) => {
                    log::info!("Loaded high score {}", record.high_score);
                    record.high_score
                }
                Err(e) => {
                    log::warn!("Ignoring malformed high score file: {}", e);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Can't read high score: {}", e);
                0
            }
        };

        Self { best, storage }
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run. Returns true (and saves) if it beat the best.
    pub fn update(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            self.save();
            return true;
        }
        false
    }

    fn save(&self) {
        let record = HighScoreRecord {
            high_score: self.best,
        };
        if let Ok(json) = serde_json::to_string(&record) {
            match self.storage.write(&json) {
                Ok(()) => log::info!("High score saved ({})", self.best),
                Err(e) => log::warn!("Can't save high score: {}", e),
            }
        }
    }
}
