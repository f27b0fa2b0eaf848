//! Session score history
//!
//! Kept in memory only: one entry per finished run, scored by waves defeated.

use serde::{Deserialize, Serialize};

/// Append-only list of finished runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreHistory {
    runs: Vec<u32>,
}

impl ScoreHistory {
    /// Create empty history
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Record a finished run and return the new high score
    pub fn record(&mut self, waves: u32) -> u32 {
        self.runs.push(waves);
        let high = self.high_score();
        log::info!("Run {} ended after {} waves (best {})", self.runs.len(), waves, high);
        high
    }

    /// Best run so far (0 when nothing has been recorded)
    pub fn high_score(&self) -> u32 {
        self.runs.iter().copied().max().unwrap_or(0)
    }

    /// Every recorded run, oldest first
    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Rank (1-indexed) a score would take among recorded runs; ties share the better rank
    pub fn rank_of(&self, waves: u32) -> usize {
        self.runs.iter().filter(|&&w| w > waves).count() + 1
    }
}
