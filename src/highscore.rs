//! Best winning score
//!
//! Persisted as a single base-10 integer string. Anything unreadable counts
//! as "no high score yet".

use crate::persistence::KeyValueStore;

/// Highest winning score of any completed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "tableTennisHighScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Parse a stored value. Leading digits are honoured ("12abc" is 12),
    /// anything without them is 0. Values too large for a `u32` saturate.
    pub fn parse(raw: &str) -> Self {
        let best = raw
            .trim_start()
            .chars()
            .map_while(|c| c.to_digit(10))
            .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d));
        Self { best }
    }

    /// Record a winning score. Returns true if it beat the stored best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage (0 if missing or corrupt)
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Some(raw) => {
                let score = Self::parse(&raw);
                log::info!("Loaded high score: {}", score.best);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write to storage
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if store.set_item(Self::STORAGE_KEY, &self.best.to_string()) {
            log::info!("High score saved: {}", self.best);
        } else {
            log::warn!("High score not saved (storage unavailable)");
        }
    }
}
