//! Target roll state.
//!
//! Each target roll opens a new roll "session" identified by a counter.
//! Achievements are de-duplicated per session, so the same achievement can
//! be earned once per roll.

use serde::{Deserialize, Serialize};

use crate::dice::DieFace;

/// Identifier of a target-roll session. Starts at 0 and grows by one per roll.
pub type RollId = u32;

/// The outcome of a target roll.
///
/// `target` and `second_roll` always travel together; a rolled 1 forces the
/// target to 1 while `second_roll` keeps the raw face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRoll {
    /// Number of tasks to complete.
    pub target: u32,
    /// The raw face that was rolled.
    pub second_roll: DieFace,
}

impl TargetRoll {
    /// Derive the target from a rolled face.
    pub fn from_face(face: DieFace) -> Self {
        let target = if face.is_one() { 1 } else { face.value() };
        Self {
            target,
            second_roll: face,
        }
    }

    /// Whether this is the critical "bad day" roll.
    pub fn is_critical(&self) -> bool {
        self.second_roll.is_one()
    }
}

/// Current roll counter plus the latest target roll, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollContext {
    roll_id: RollId,
    roll: Option<TargetRoll>,
}

impl RollContext {
    /// Fresh context: roll id 0, nothing rolled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new target roll, bumping the roll id by exactly one.
    pub fn advance(&mut self, face: DieFace) -> TargetRoll {
        let roll = TargetRoll::from_face(face);
        self.roll_id += 1;
        self.roll = Some(roll);
        roll
    }

    /// Current roll id.
    pub fn roll_id(&self) -> RollId {
        self.roll_id
    }

    /// The latest target roll.
    pub fn roll(&self) -> Option<TargetRoll> {
        self.roll
    }

    /// Target task count, if a roll happened.
    pub fn target(&self) -> Option<u32> {
        self.roll.map(|r| r.target)
    }

    /// Raw face of the latest roll.
    pub fn second_roll(&self) -> Option<DieFace> {
        self.roll.map(|r| r.second_roll)
    }
}
