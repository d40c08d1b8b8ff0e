//! Top-level controller: the only place engine state changes.
//!
//! Every user command becomes an [`Action`] fed through
//! [`Controller::dispatch`], which mutates state, re-runs the progress
//! evaluator where needed, and drives the theme audio. The named methods
//! (`add_task`, `roll_target`, ...) are thin wrappers around `dispatch`.

use serde::Serialize;
use tracing::info;

use crate::achievement::{Achievement, AchievementLedger};
use crate::audio::{AudioBackend, ThemeAudio, ThemeId, Track};
use crate::config::TodoConfig;
use crate::dice::{DieFace, DieSource};
use crate::progress::{INITIAL_MESSAGE, evaluate, roll_announcement};
use crate::roll::{RollContext, RollId};
use crate::task::{Task, TaskId, TaskStore, filter_tasks};

/// A state-changing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a task with the given text.
    AddTask(String),
    /// Flip a task's done flag.
    ToggleTask(TaskId),
    /// Delete a task.
    RemoveTask(TaskId),
    /// Roll the theme die.
    RollTheme,
    /// Roll the target die.
    RollTarget,
    /// Change the task filter.
    SetSearchQuery(String),
    /// Flip sound on/off.
    ToggleSound,
    /// Record a user gesture (unlocks playback).
    Interact,
}

/// What a dispatched action produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Achievements earned by this action.
    pub new_achievements: Vec<Achievement>,
    /// The face rolled, for roll actions.
    pub rolled: Option<DieFace>,
    /// The new status message, if it changed.
    pub message: Option<String>,
}

/// Read-only view of the whole engine state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Current theme.
    pub theme: ThemeId,
    /// Current roll id.
    pub roll_id: RollId,
    /// Current target, if rolled.
    pub target: Option<u32>,
    /// Raw face of the last target roll.
    pub second_roll: Option<DieFace>,
    /// Whether sound is on.
    pub sound_enabled: bool,
    /// Name of the track playing, if any.
    pub now_playing: Option<String>,
    /// Status message.
    pub message: String,
    /// Active search filter.
    pub search_query: String,
    /// All tasks, newest first.
    pub tasks: Vec<Task>,
    /// All achievements, newest first.
    pub achievements: Vec<Achievement>,
}

/// Owns the task store, roll state, ledger, and audio.
#[derive(Debug)]
pub struct Controller<D: DieSource, B: AudioBackend> {
    dice: D,
    tasks: TaskStore,
    roll: RollContext,
    ledger: AchievementLedger,
    audio: ThemeAudio<B>,
    theme: ThemeId,
    message: String,
    search_query: String,
}

impl<D: DieSource, B: AudioBackend> Controller<D, B> {
    /// Build a controller. Rolls the starting theme unless one is configured.
    pub fn new(config: TodoConfig, mut dice: D, backend: B) -> Self {
        let theme = config
            .initial_theme
            .unwrap_or_else(|| ThemeId::from(dice.roll_die()));
        let mut audio = ThemeAudio::new(backend, config.tracks, config.sound_enabled);
        audio.set_theme(theme);
        info!(%theme, sound = config.sound_enabled, "controller ready");

        Self {
            dice,
            tasks: TaskStore::new(),
            roll: RollContext::new(),
            ledger: AchievementLedger::new(),
            audio,
            theme,
            message: INITIAL_MESSAGE.to_string(),
            search_query: String::new(),
        }
    }

    /// Apply an action and report what it produced.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let mut transition = Transition::default();
        match action {
            Action::AddTask(text) => {
                let before = self.tasks.len();
                self.tasks.add(&text);
                if self.tasks.len() > before {
                    self.reevaluate(&mut transition);
                }
            }
            Action::ToggleTask(id) => {
                self.tasks.toggle(id);
                self.reevaluate(&mut transition);
            }
            Action::RemoveTask(id) => {
                self.tasks.remove(id);
                self.reevaluate(&mut transition);
            }
            Action::RollTheme => {
                let face = self.dice.roll_die();
                self.theme = ThemeId::from(face);
                info!(theme = %self.theme, "theme rolled");
                self.audio.set_theme(self.theme);
                transition.rolled = Some(face);
            }
            Action::RollTarget => {
                let face = self.dice.roll_die();
                let roll = self.roll.advance(face);
                info!(
                    roll_id = self.roll.roll_id(),
                    face = %face,
                    target = roll.target,
                    "target rolled"
                );
                transition.rolled = Some(face);
                let eval = evaluate(self.tasks.tasks(), &self.roll, &mut self.ledger);
                // The announcement stands unless this roll already earned something.
                let earned = eval.earned_any();
                let message = match eval.message {
                    Some(m) if earned => m,
                    _ => roll_announcement(roll),
                };
                transition.new_achievements = eval.new_achievements;
                self.set_message(message, &mut transition);
            }
            Action::SetSearchQuery(query) => {
                self.search_query = query;
            }
            Action::ToggleSound => {
                let enabled = !self.audio.sound_enabled();
                info!(enabled, "sound toggled");
                self.audio.set_sound_enabled(enabled);
            }
            Action::Interact => {
                self.audio.notify_interaction();
            }
        }
        transition
    }

    /// Add a task.
    pub fn add_task(&mut self, text: &str) -> Transition {
        self.dispatch(Action::AddTask(text.to_string()))
    }

    /// Toggle a task.
    pub fn toggle_task(&mut self, id: TaskId) -> Transition {
        self.dispatch(Action::ToggleTask(id))
    }

    /// Remove a task.
    pub fn remove_task(&mut self, id: TaskId) -> Transition {
        self.dispatch(Action::RemoveTask(id))
    }

    /// Roll the theme die.
    pub fn roll_theme(&mut self) -> Transition {
        self.dispatch(Action::RollTheme)
    }

    /// Roll the target die.
    pub fn roll_target(&mut self) -> Transition {
        self.dispatch(Action::RollTarget)
    }

    /// Set the task filter.
    pub fn set_search_query(&mut self, query: &str) -> Transition {
        self.dispatch(Action::SetSearchQuery(query.to_string()))
    }

    /// Flip sound on/off.
    pub fn toggle_sound(&mut self) -> Transition {
        self.dispatch(Action::ToggleSound)
    }

    /// Record a user gesture.
    pub fn notify_interaction(&mut self) -> Transition {
        self.dispatch(Action::Interact)
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    /// Tasks matching the search filter.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.tasks.tasks(), &self.search_query)
    }

    /// Visible tasks still open.
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.visible_tasks().into_iter().filter(|t| !t.done).collect()
    }

    /// Visible tasks already done.
    pub fn done_tasks(&self) -> Vec<&Task> {
        self.visible_tasks().into_iter().filter(|t| t.done).collect()
    }

    /// Achievements, newest first.
    pub fn achievements(&self) -> &[Achievement] {
        self.ledger.entries()
    }

    /// The achievement ledger.
    pub fn ledger(&self) -> &AchievementLedger {
        &self.ledger
    }

    /// Current status message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current theme.
    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    /// Current roll state.
    pub fn roll_context(&self) -> &RollContext {
        &self.roll
    }

    /// Current search filter.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether sound is on.
    pub fn sound_enabled(&self) -> bool {
        self.audio.sound_enabled()
    }

    /// The track playing, if any.
    pub fn now_playing(&self) -> Option<&Track> {
        self.audio.now_playing()
    }

    /// The audio controller.
    pub fn audio(&self) -> &ThemeAudio<B> {
        &self.audio
    }

    /// Owned copy of the full state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            theme: self.theme,
            roll_id: self.roll.roll_id(),
            target: self.roll.target(),
            second_roll: self.roll.second_roll(),
            sound_enabled: self.audio.sound_enabled(),
            now_playing: self.audio.now_playing().map(|t| t.name.clone()),
            message: self.message.clone(),
            search_query: self.search_query.clone(),
            tasks: self.tasks.tasks().to_vec(),
            achievements: self.ledger.entries().to_vec(),
        }
    }

    fn reevaluate(&mut self, transition: &mut Transition) {
        let eval = evaluate(self.tasks.tasks(), &self.roll, &mut self.ledger);
        transition.new_achievements = eval.new_achievements;
        if let Some(message) = eval.message {
            self.set_message(message, transition);
        }
    }

    fn set_message(&mut self, message: String, transition: &mut Transition) {
        if message != self.message {
            self.message = message.clone();
            transition.message = Some(message);
        }
    }
}
