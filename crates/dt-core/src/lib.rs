//! Dice-driven todo engine.
//!
//! A todo list whose daily completion target comes from a d6 roll and whose
//! theme (and background track) comes from a second roll. Progress toward
//! the target earns achievements, at most one of each kind per target roll.
//! The [`Controller`] owns all state; [`TodoSession`] exposes it as text
//! commands.

pub mod achievement;
pub mod audio;
pub mod config;
pub mod controller;
pub mod dice;
pub mod error;
pub mod progress;
pub mod roll;
pub mod session;
pub mod task;

pub use achievement::{Achievement, AchievementCode, AchievementKind, AchievementLedger};
pub use audio::{AudioBackend, MemoryBackend, NullBackend, PlaybackError, ThemeAudio, ThemeId};
pub use config::TodoConfig;
pub use controller::{Action, Controller, Snapshot, Transition};
pub use dice::{DieFace, DieSource, FixedDice, RngDice};
pub use error::{DtError, DtResult};
pub use progress::{Evaluation, evaluate};
pub use roll::{RollContext, RollId, TargetRoll};
pub use session::TodoSession;
pub use task::{Task, TaskId, TaskStore};
