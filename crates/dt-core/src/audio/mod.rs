//! Theme-driven background audio.
//!
//! [`ThemeAudio`] maps the rolled theme to a track and keeps at most one
//! track playing. Playback only starts once sound is enabled and the user
//! has interacted at least once; a refused start is logged and leaves
//! nothing playing so a later theme roll or re-enable can try again.

pub mod backend;
pub mod theme;

pub use backend::{AudioBackend, AudioCommand, MemoryBackend, NullBackend, PlaybackError};
pub use theme::{ThemeId, Track, TrackTable};

use tracing::{debug, info, warn};

/// The single track currently playing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTrack {
    /// Theme that started it.
    pub theme: ThemeId,
    /// The track itself.
    pub track: Track,
}

/// Owns the audio backend and the one active-track handle.
#[derive(Debug)]
pub struct ThemeAudio<B: AudioBackend> {
    backend: B,
    tracks: TrackTable,
    sound_enabled: bool,
    user_has_interacted: bool,
    theme: Option<ThemeId>,
    active: Option<ActiveTrack>,
}

impl<B: AudioBackend> ThemeAudio<B> {
    /// Create a controller. Nothing plays until the first interaction.
    pub fn new(backend: B, tracks: TrackTable, sound_enabled: bool) -> Self {
        Self {
            backend,
            tracks,
            sound_enabled,
            user_has_interacted: false,
            theme: None,
            active: None,
        }
    }

    /// Switch to `theme`, starting its track if playback is allowed.
    ///
    /// Re-selecting the theme whose track is already playing does nothing.
    pub fn set_theme(&mut self, theme: ThemeId) {
        self.theme = Some(theme);
        if self.can_play() {
            self.start(theme);
        } else {
            debug!(%theme, "theme set, playback gated");
        }
    }

    /// Turn sound on or off.
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        if !enabled {
            self.stop_all();
            debug!("sound disabled");
            return;
        }
        debug!("sound enabled");
        if let (true, Some(theme)) = (self.user_has_interacted, self.theme) {
            self.start(theme);
        }
    }

    /// Record a user gesture. The first one unlocks playback and starts
    /// the current theme's track.
    pub fn notify_interaction(&mut self) {
        if self.user_has_interacted {
            return;
        }
        self.user_has_interacted = true;
        debug!("first user interaction, playback unlocked");
        if let (true, Some(theme)) = (self.sound_enabled, self.theme) {
            self.start(theme);
        }
    }

    /// Whether sound is on.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Whether a user gesture has been seen.
    pub fn user_has_interacted(&self) -> bool {
        self.user_has_interacted
    }

    /// The theme most recently set.
    pub fn theme(&self) -> Option<ThemeId> {
        self.theme
    }

    /// The theme backing current playback, if anything is playing.
    pub fn active_theme(&self) -> Option<ThemeId> {
        self.active.as_ref().map(|a| a.theme)
    }

    /// The track currently playing.
    pub fn now_playing(&self) -> Option<&Track> {
        self.active.as_ref().map(|a| &a.track)
    }

    /// The configured tracks.
    pub fn tracks(&self) -> &TrackTable {
        &self.tracks
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn can_play(&self) -> bool {
        self.sound_enabled && self.user_has_interacted
    }

    fn start(&mut self, theme: ThemeId) {
        let Some(track) = self.tracks.get(theme).cloned() else {
            self.stop_all();
            debug!(%theme, "silent theme");
            return;
        };

        if self.active_theme() == Some(theme) {
            debug!(%theme, track = %track.name, "already playing");
            return;
        }

        self.stop_all();
        self.backend.seek_to_start(&track);
        match self.backend.play(&track, track.volume, true) {
            Ok(()) => {
                info!(%theme, track = %track.name, volume = track.volume, "playback started");
                self.active = Some(ActiveTrack { theme, track });
            }
            Err(err) => {
                warn!(%theme, track = %track.name, error = %err, "playback failed");
            }
        }
    }

    /// Pause and rewind every known track and drop the active handle.
    fn stop_all(&mut self) {
        for track in self.tracks.tracks() {
            self.backend.pause(track);
            self.backend.seek_to_start(track);
        }
        if let Some(active) = self.active.take() {
            debug!(theme = %active.theme, track = %active.track.name, "playback stopped");
        }
    }
}
