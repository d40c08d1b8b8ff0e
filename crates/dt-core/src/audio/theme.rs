//! Theme identifiers and their audio tracks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dice::DieFace;
use crate::error::{DtError, DtResult};

/// A visual/audio theme, one per die face (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ThemeId(u8);

impl ThemeId {
    /// Validate a raw theme number.
    pub fn new(value: u32) -> DtResult<Self> {
        DieFace::new(value)
            .map(Self::from)
            .map_err(|_| DtError::InvalidTheme(value))
    }

    /// The theme number.
    pub fn value(self) -> u32 {
        u32::from(self.0)
    }
}

impl From<DieFace> for ThemeId {
    fn from(face: DieFace) -> Self {
        Self(face.value() as u8)
    }
}

impl TryFrom<u32> for ThemeId {
    type Error = DtError;

    fn try_from(value: u32) -> DtResult<Self> {
        Self::new(value)
    }
}

impl From<ThemeId> for u32 {
    fn from(theme: ThemeId) -> Self {
        theme.value()
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A looping background track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Display name.
    pub name: String,
    /// Source the backend loads (file name or URL).
    pub source: String,
    /// Playback volume, 0.0-1.0.
    pub volume: f32,
}

impl Track {
    /// Create a track; volume is clamped to 0.0-1.0.
    pub fn new(name: impl Into<String>, source: impl Into<String>, volume: f32) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

/// Which themes carry a track. Themes without an entry are silent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackTable {
    tracks: BTreeMap<ThemeId, Track>,
}

impl TrackTable {
    /// A table with no tracks at all.
    pub fn silent() -> Self {
        Self {
            tracks: BTreeMap::new(),
        }
    }

    /// Assign (or replace) the track for a theme.
    pub fn with_track(mut self, theme: ThemeId, track: Track) -> Self {
        self.tracks.insert(theme, track);
        self
    }

    /// Remove the track for a theme, making it silent.
    pub fn without_track(mut self, theme: ThemeId) -> Self {
        self.tracks.remove(&theme);
        self
    }

    /// The track for a theme, if it has one.
    pub fn get(&self, theme: ThemeId) -> Option<&Track> {
        self.tracks.get(&theme)
    }

    /// Every configured track.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Number of themes with a track.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether every theme is silent.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for TrackTable {
    /// Faces 2-5 carry a track; 1 and 6 are silent.
    fn default() -> Self {
        let table = [
            (2, Track::new("Barbie Girl", "barbiegirl.mp3", 0.55)),
            (3, Track::new("Metal", "metal_theme.mp3", 0.6)),
            (4, Track::new("Lo-fi", "lofi_theme.mp3", 0.6)),
            (5, Track::new("Ocean", "ocean_theme.mp3", 0.7)),
        ];
        Self {
            tracks: table
                .into_iter()
                .map(|(face, track)| (ThemeId(face), track))
                .collect(),
        }
    }
}
