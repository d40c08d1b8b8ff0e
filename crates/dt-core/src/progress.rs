//! Progress evaluation against the current target roll.
//!
//! [`evaluate`] looks at a task snapshot and the active [`RollContext`],
//! records any achievement that newly qualifies, and picks the status
//! message. It is safe to call repeatedly with the same inputs: the ledger's
//! `(code, roll_id)` check keeps each achievement to one per roll.

use tracing::debug;

use crate::achievement::{Achievement, AchievementCode, AchievementLedger};
use crate::roll::{RollContext, RollId, TargetRoll};
use crate::task::{Task, completed_count};

/// Status message before any target roll.
pub const INITIAL_MESSAGE: &str = "Roll to set today's target!";
/// Critical roll, exactly one task done.
pub const NOT_YOUR_DAY_MESSAGE: &str = "Tough day, great job finishing one! Come back tomorrow.";
/// Critical roll, nothing done yet.
pub const AIM_FOR_ONE_MESSAGE: &str = "Roll was 1: aim to complete 1 task today.";
/// Critical roll, more than one task done.
pub const BEYOND_ONE_MESSAGE: &str = "You went beyond the 1-task goal, nice!";
/// Every task is done.
pub const ALL_DONE_MESSAGE: &str = "Everything cleared!";

/// Outcome of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Achievements recorded by this call, in emission order.
    pub new_achievements: Vec<Achievement>,
    /// New status message; `None` leaves the current one in place.
    pub message: Option<String>,
}

impl Evaluation {
    /// Whether this call recorded anything.
    pub fn earned_any(&self) -> bool {
        !self.new_achievements.is_empty()
    }
}

/// Evaluate progress and record newly earned achievements.
///
/// Branches run in a fixed order (critical roll, target reached, all clear,
/// fallback) and the last message assigned wins.
pub fn evaluate(tasks: &[Task], ctx: &RollContext, ledger: &mut AchievementLedger) -> Evaluation {
    let mut eval = Evaluation::default();
    let Some(roll) = ctx.roll() else {
        return eval;
    };

    let roll_id = ctx.roll_id();
    let total = tasks.len();
    let completed = completed_count(tasks);
    let target = roll.target as usize;

    if roll.is_critical() {
        if completed == 1 && !ledger.exists(AchievementCode::NotYourDay, roll_id) {
            emit(
                &mut eval,
                ledger,
                AchievementCode::NotYourDay,
                "Not Your Day: Completed exactly 1 task".to_string(),
                roll_id,
            );
            eval.message = Some(NOT_YOUR_DAY_MESSAGE.to_string());
        } else if completed < 1 {
            eval.message = Some(AIM_FOR_ONE_MESSAGE.to_string());
        } else {
            eval.message = Some(BEYOND_ONE_MESSAGE.to_string());
        }
    }

    if completed >= target && !ledger.exists(AchievementCode::HitTarget, roll_id) {
        emit(
            &mut eval,
            ledger,
            AchievementCode::HitTarget,
            format!("Hit Your Roll: Completed {target} {}", plural_tasks(target)),
            roll_id,
        );
        eval.message = Some(format!(
            "Target: {target}. Completed: {completed}. Great job!"
        ));
    }

    if total > 0 && completed == total && !ledger.exists(AchievementCode::AllDone, roll_id) {
        emit(
            &mut eval,
            ledger,
            AchievementCode::AllDone,
            format!("All Done: Cleared all {total} {}", plural_tasks(total)),
            roll_id,
        );
        eval.message = Some(ALL_DONE_MESSAGE.to_string());
    }

    if !eval.earned_any() && !roll.is_critical() && completed < target {
        eval.message = Some(format!(
            "Target: {target}. Completed: {completed}. Keep going!"
        ));
    }

    debug!(
        roll_id,
        total,
        completed,
        target,
        earned = eval.new_achievements.len(),
        "progress evaluated"
    );
    eval
}

/// Announcement shown right after a target roll.
pub fn roll_announcement(roll: TargetRoll) -> String {
    if roll.is_critical() {
        "Rolled 1: today is not your day, complete just 1 task.".to_string()
    } else {
        let d = roll.second_roll;
        format!("Rolled {d}: try to complete {d} tasks today!")
    }
}

fn emit(
    eval: &mut Evaluation,
    ledger: &mut AchievementLedger,
    code: AchievementCode,
    label: String,
    roll_id: RollId,
) {
    let achievement = Achievement::new(code, label, roll_id);
    if ledger.record(achievement.clone()) {
        eval.new_achievements.push(achievement);
    }
}

fn plural_tasks(n: usize) -> &'static str {
    if n == 1 { "task" } else { "tasks" }
}
