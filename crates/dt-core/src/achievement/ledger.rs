//! Append-only achievement log and export.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Achievement, AchievementCode, AchievementKind};
use crate::roll::RollId;

/// Shown when nothing has been earned yet.
pub const EMPTY_LEDGER_TEXT: &str = "No achievements yet, roll and conquer!";

/// Earned achievements, newest first. Entries are never changed or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementLedger {
    entries: Vec<Achievement>,
}

impl AchievementLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an achievement with this exact `(code, roll_id)` pair exists.
    pub fn exists(&self, code: AchievementCode, roll_id: RollId) -> bool {
        self.entries
            .iter()
            .any(|a| a.code == code && a.roll_id == roll_id)
    }

    /// Record an achievement at the front of the log.
    ///
    /// Returns `false` without recording when the `(code, roll_id)` pair is
    /// already present.
    pub fn record(&mut self, achievement: Achievement) -> bool {
        if self.exists(achievement.code, achievement.roll_id) {
            return false;
        }
        info!(
            code = %achievement.code,
            roll_id = achievement.roll_id,
            label = %achievement.label,
            "achievement earned"
        );
        self.entries.insert(0, achievement);
        true
    }

    /// All achievements, newest first.
    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    /// Achievements earned under one roll.
    pub fn for_roll(&self, roll_id: RollId) -> Vec<&Achievement> {
        self.entries.iter().filter(|a| a.roll_id == roll_id).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Achievements\n\n");
        if self.entries.is_empty() {
            out.push_str(&format!("_{EMPTY_LEDGER_TEXT}_\n"));
            return out;
        }
        for a in &self.entries {
            let badge = match a.kind {
                AchievementKind::Success => "**",
                AchievementKind::Failure => "_",
            };
            out.push_str(&format!(
                "- {badge}{}{badge} (roll #{}, {})\n",
                a.label,
                a.roll_id,
                a.date.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        out
    }

    /// Export as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Achievements\n============\n\n");
        if self.entries.is_empty() {
            out.push_str(EMPTY_LEDGER_TEXT);
            out.push('\n');
            return out;
        }
        for a in &self.entries {
            out.push_str(&format!(
                "[{}] {} (roll #{}, {})\n",
                a.kind,
                a.label,
                a.roll_id,
                a.date.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger() {
        let l = AchievementLedger::new();
        assert!(l.is_empty());
        assert_eq!(l.len(), 0);
        assert!(!l.exists(AchievementCode::HitTarget, 0));
    }

    #[test]
    fn record_is_newest_first() {
        let mut l = AchievementLedger::new();
        l.record(Achievement::new(AchievementCode::HitTarget, "first", 1));
        l.record(Achievement::new(AchievementCode::AllDone, "second", 1));
        assert_eq!(l.entries()[0].label, "second");
        assert_eq!(l.entries()[1].label, "first");
    }

    #[test]
    fn duplicate_pair_rejected() {
        let mut l = AchievementLedger::new();
        assert!(l.record(Achievement::new(AchievementCode::HitTarget, "a", 1)));
        assert!(!l.record(Achievement::new(AchievementCode::HitTarget, "b", 1)));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn same_code_allowed_across_rolls() {
        let mut l = AchievementLedger::new();
        assert!(l.record(Achievement::new(AchievementCode::HitTarget, "a", 1)));
        assert!(l.record(Achievement::new(AchievementCode::HitTarget, "a", 2)));
        assert!(l.exists(AchievementCode::HitTarget, 1));
        assert!(l.exists(AchievementCode::HitTarget, 2));
        assert!(!l.exists(AchievementCode::AllDone, 2));
        assert_eq!(l.for_roll(2).len(), 1);
    }

    #[test]
    fn export_markdown_lists_badges() {
        let mut l = AchievementLedger::new();
        l.record(Achievement::new(
            AchievementCode::HitTarget,
            "Hit Your Roll: Completed 3 tasks",
            4,
        ));
        l.record(Achievement::new(
            AchievementCode::NotYourDay,
            "Not Your Day: Completed exactly 1 task",
            5,
        ));
        let md = l.export_markdown();
        assert!(md.starts_with("# Achievements"));
        assert!(md.contains("**Hit Your Roll: Completed 3 tasks** (roll #4"));
        assert!(md.contains("_Not Your Day: Completed exactly 1 task_ (roll #5"));
    }

    #[test]
    fn export_empty_states() {
        let l = AchievementLedger::new();
        assert!(l.export_markdown().contains(EMPTY_LEDGER_TEXT));
        assert!(l.export_text().contains(EMPTY_LEDGER_TEXT));
    }

    #[test]
    fn export_text_shows_kind() {
        let mut l = AchievementLedger::new();
        l.record(Achievement::new(AchievementCode::AllDone, "All Done", 2));
        let txt = l.export_text();
        assert!(txt.contains("[success] All Done (roll #2"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut l = AchievementLedger::new();
        l.record(Achievement::new(AchievementCode::AllDone, "All Done", 2));
        let json = serde_json::to_string(&l).unwrap();
        let back: AchievementLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), l.entries());
    }
}
