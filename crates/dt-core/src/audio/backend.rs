//! Audio playback capability.
//!
//! The engine never decodes or mixes audio itself. It drives an
//! [`AudioBackend`] with three commands (play, pause, seek to start) and
//! treats a refused `play` as a recoverable condition.

use std::collections::BTreeSet;

use thiserror::Error;

use super::theme::Track;

/// Why a track could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The runtime's autoplay policy refused playback.
    #[error("playback denied by autoplay policy")]
    Denied,

    /// The track could not be loaded or the device is unavailable.
    #[error("playback unavailable: {0}")]
    Unavailable(String),
}

/// Something that can play looping tracks.
pub trait AudioBackend {
    /// Start `track` at `volume`, looping if requested.
    fn play(&mut self, track: &Track, volume: f32, looping: bool) -> Result<(), PlaybackError>;

    /// Pause `track`. Pausing a silent track does nothing.
    fn pause(&mut self, track: &Track);

    /// Rewind `track` to its beginning.
    fn seek_to_start(&mut self, track: &Track);

    /// Whether started tracks reach a speaker.
    fn is_audible(&self) -> bool {
        true
    }
}

/// Accepts every command and produces no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _track: &Track, _volume: f32, _looping: bool) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self, _track: &Track) {}

    fn seek_to_start(&mut self, _track: &Track) {}

    fn is_audible(&self) -> bool {
        false
    }
}

/// A command received by a [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// `play` was called.
    Play {
        /// Track source.
        source: String,
        /// Requested volume.
        volume: f32,
        /// Requested looping.
        looping: bool,
    },
    /// `pause` was called.
    Pause {
        /// Track source.
        source: String,
    },
    /// `seek_to_start` was called.
    SeekToStart {
        /// Track source.
        source: String,
    },
}

/// In-memory backend that records commands and tracks what is playing.
///
/// Can be told to refuse playback to mimic an autoplay gate, or to hold
/// accepted starts as pending until [`MemoryBackend::resolve_pending`],
/// mimicking a runtime that grants playback asynchronously. Pausing a
/// pending track cancels its start.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    commands: Vec<AudioCommand>,
    playing: BTreeSet<String>,
    pending: BTreeSet<String>,
    deny: Option<PlaybackError>,
    deferred: bool,
}

impl MemoryBackend {
    /// Create a backend that accepts playback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every future `play` with `error`, or accept again with `None`.
    pub fn set_refusal(&mut self, error: Option<PlaybackError>) {
        self.deny = error;
    }

    /// Hold future starts as pending instead of playing them at once.
    pub fn set_deferred(&mut self, deferred: bool) {
        self.deferred = deferred;
    }

    /// Grant every pending start. Returns the sources that began playing.
    pub fn resolve_pending(&mut self) -> Vec<String> {
        let granted: Vec<String> = std::mem::take(&mut self.pending).into_iter().collect();
        self.playing.extend(granted.iter().cloned());
        granted
    }

    /// Sources whose start has been accepted but not yet granted.
    pub fn pending(&self) -> Vec<&str> {
        self.pending.iter().map(String::as_str).collect()
    }

    /// Every command received so far.
    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }

    /// Number of `play` calls received.
    pub fn play_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, AudioCommand::Play { .. }))
            .count()
    }

    /// Sources currently playing.
    pub fn playing(&self) -> Vec<&str> {
        self.playing.iter().map(String::as_str).collect()
    }

    /// Whether `source` is playing.
    pub fn is_playing(&self, source: &str) -> bool {
        self.playing.contains(source)
    }
}

impl AudioBackend for MemoryBackend {
    fn play(&mut self, track: &Track, volume: f32, looping: bool) -> Result<(), PlaybackError> {
        self.commands.push(AudioCommand::Play {
            source: track.source.clone(),
            volume,
            looping,
        });
        if let Some(err) = &self.deny {
            return Err(err.clone());
        }
        if self.deferred {
            self.pending.insert(track.source.clone());
        } else {
            self.playing.insert(track.source.clone());
        }
        Ok(())
    }

    fn pause(&mut self, track: &Track) {
        self.commands.push(AudioCommand::Pause {
            source: track.source.clone(),
        });
        self.playing.remove(&track.source);
        self.pending.remove(&track.source);
    }

    fn seek_to_start(&mut self, track: &Track) {
        self.commands.push(AudioCommand::SeekToStart {
            source: track.source.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::new("Metal", "metal.mp3", 0.6)
    }

    #[test]
    fn memory_backend_tracks_playing() {
        let mut b = MemoryBackend::new();
        b.play(&track(), 0.6, true).unwrap();
        assert!(b.is_playing("metal.mp3"));
        b.pause(&track());
        assert!(b.playing().is_empty());
        assert_eq!(b.commands().len(), 2);
        assert_eq!(b.play_count(), 1);
    }

    #[test]
    fn memory_backend_refusal() {
        let mut b = MemoryBackend::new();
        b.set_refusal(Some(PlaybackError::Denied));
        assert_eq!(b.play(&track(), 0.6, true), Err(PlaybackError::Denied));
        assert!(b.playing().is_empty());
        b.set_refusal(None);
        assert!(b.play(&track(), 0.6, true).is_ok());
    }

    #[test]
    fn deferred_start_waits_for_grant() {
        let mut b = MemoryBackend::new();
        b.set_deferred(true);
        b.play(&track(), 0.6, true).unwrap();
        assert!(b.playing().is_empty());
        assert_eq!(b.pending(), vec!["metal.mp3"]);
        assert_eq!(b.resolve_pending(), vec!["metal.mp3".to_string()]);
        assert!(b.is_playing("metal.mp3"));
        assert!(b.pending().is_empty());
    }

    #[test]
    fn pause_cancels_pending_start() {
        let mut b = MemoryBackend::new();
        b.set_deferred(true);
        b.play(&track(), 0.6, true).unwrap();
        b.pause(&track());
        assert!(b.resolve_pending().is_empty());
        assert!(b.playing().is_empty());
    }

    #[test]
    fn null_backend_accepts_silently() {
        let mut b = NullBackend;
        assert!(b.play(&track(), 1.0, true).is_ok());
        assert!(!b.is_audible());
        assert!(MemoryBackend::new().is_audible());
    }
}
