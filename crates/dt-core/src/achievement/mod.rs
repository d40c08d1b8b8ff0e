//! Achievements earned by hitting progress goals within a target roll.

pub mod ledger;

pub use ledger::AchievementLedger;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roll::RollId;

/// Unique identifier for an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AchievementId(pub Uuid);

impl AchievementId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AchievementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// Whether an achievement celebrates or commiserates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// A goal was met.
    Success,
    /// A consolation badge.
    Failure,
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// The condition an achievement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCode {
    /// Completed at least the rolled target.
    HitTarget,
    /// Every task in the list is done.
    AllDone,
    /// Rolled a 1 and completed exactly one task.
    NotYourDay,
}

impl AchievementCode {
    /// The kind of badge this code produces.
    pub fn kind(self) -> AchievementKind {
        match self {
            Self::HitTarget | Self::AllDone => AchievementKind::Success,
            Self::NotYourDay => AchievementKind::Failure,
        }
    }
}

impl fmt::Display for AchievementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HitTarget => write!(f, "hit_target"),
            Self::AllDone => write!(f, "all_done"),
            Self::NotYourDay => write!(f, "not_your_day"),
        }
    }
}

/// An immutable record of a met condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier.
    pub id: AchievementId,
    /// Human-readable badge text.
    pub label: String,
    /// Success or failure badge.
    pub kind: AchievementKind,
    /// When it was earned.
    pub date: DateTime<Utc>,
    /// Which condition was met.
    pub code: AchievementCode,
    /// The target roll it was earned under.
    pub roll_id: RollId,
}

impl Achievement {
    /// Stamp a new achievement for `code` under `roll_id`, dated now.
    pub fn new(code: AchievementCode, label: impl Into<String>, roll_id: RollId) -> Self {
        Self {
            id: AchievementId::new(),
            label: label.into(),
            kind: code.kind(),
            date: Utc::now(),
            code,
            roll_id,
        }
    }
}
