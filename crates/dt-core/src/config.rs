//! Configuration for a dice todo session.

use crate::audio::{ThemeId, TrackTable};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// RNG seed for reproducible rolls. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Starting theme. `None` rolls one at start-up.
    pub initial_theme: Option<ThemeId>,
    /// Whether sound starts enabled.
    pub sound_enabled: bool,
    /// Theme-to-track mapping.
    pub tracks: TrackTable,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_theme: None,
            sound_enabled: true,
            tracks: TrackTable::default(),
        }
    }
}

impl TodoConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start on a fixed theme instead of rolling one.
    pub fn with_theme(mut self, theme: ThemeId) -> Self {
        self.initial_theme = Some(theme);
        self
    }

    /// Start with sound on or off.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Replace the track table.
    pub fn with_tracks(mut self, tracks: TrackTable) -> Self {
        self.tracks = tracks;
        self
    }
}
