//! Line-oriented command session.
//!
//! `TodoSession` wraps a [`Controller`] and turns text commands (`add`,
//! `toggle`, `roll target`, ...) into actions, rendering the result as
//! plain text. Any command counts as a user interaction, so the first one
//! unlocks audio.

use tracing::debug;

use crate::achievement::ledger::EMPTY_LEDGER_TEXT;
use crate::audio::{AudioBackend, NullBackend};
use crate::config::TodoConfig;
use crate::controller::{Controller, Transition};
use crate::dice::{DieSource, RngDice};
use crate::error::{DtError, DtResult};
use crate::task::Task;

/// Shortest id prefix accepted as a task reference.
const MIN_ID_PREFIX: usize = 4;

/// An interactive dice todo session.
pub struct TodoSession<D: DieSource, B: AudioBackend> {
    controller: Controller<D, B>,
}

impl TodoSession<RngDice, NullBackend> {
    /// Session with RNG dice (seeded from the config when given) and no audio output.
    pub fn from_config(config: TodoConfig) -> Self {
        let dice = RngDice::from_seed_option(config.seed);
        Self::new(Controller::new(config, dice, NullBackend))
    }
}

impl<D: DieSource, B: AudioBackend> TodoSession<D, B> {
    /// Wrap an existing controller.
    pub fn new(controller: Controller<D, B>) -> Self {
        Self { controller }
    }

    /// The underlying controller.
    pub fn controller(&self) -> &Controller<D, B> {
        &self.controller
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> DtResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        self.controller.notify_interaction();

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");
        debug!(command = %cmd, "processing command");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "toggle" | "done" => self.do_toggle(rest),
            "remove" | "rm" | "delete" => self.do_remove(rest),
            "roll" => self.do_roll(rest),
            "search" => self.do_search(rest),
            "sound" => self.do_sound(rest),
            "list" | "ls" => Ok(self.render_list()),
            "achievements" => Ok(self.render_achievements()),
            "export" => self.do_export(rest),
            "status" => Ok(self.render_status()),
            "help" => Ok(help_text(rest)),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(DtError::UnknownCommand(other.to_string())),
        }
    }

    fn do_add(&mut self, text: &str) -> DtResult<String> {
        if text.is_empty() {
            return Ok("Nothing to add. Usage: add <text>".to_string());
        }
        let t = self.controller.add_task(text);
        let mut out = format!("Added: {}", text.trim());
        push_transition(&mut out, &t);
        Ok(out)
    }

    fn do_toggle(&mut self, reference: &str) -> DtResult<String> {
        let task = self.resolve(reference)?;
        let t = self.controller.toggle_task(task.id);
        let state = if task.done { "Reopened" } else { "Completed" };
        let mut out = format!("{state}: {}", task.text);
        push_transition(&mut out, &t);
        Ok(out)
    }

    fn do_remove(&mut self, reference: &str) -> DtResult<String> {
        let task = self.resolve(reference)?;
        let t = self.controller.remove_task(task.id);
        let mut out = format!("Removed: {}", task.text);
        push_transition(&mut out, &t);
        Ok(out)
    }

    fn do_roll(&mut self, which: &str) -> DtResult<String> {
        match which.to_lowercase().as_str() {
            "theme" | "aesthetic" => {
                let t = self.controller.roll_theme();
                let theme = self.controller.theme();
                let mut out = format!("Rolled theme: {theme}");
                match self.controller.audio().tracks().get(theme) {
                    Some(track) => out.push_str(&format!(" ({})", track.name)),
                    None => out.push_str(" (silent)"),
                }
                push_transition(&mut out, &t);
                Ok(out)
            }
            "target" => {
                let t = self.controller.roll_target();
                let mut out = String::new();
                if let Some(face) = t.rolled {
                    out.push_str(&format!("Rolled target die: {face}"));
                }
                push_transition(&mut out, &t);
                Ok(out)
            }
            _ => Err(DtError::InvalidChoice(
                "usage: roll theme|target".to_string(),
            )),
        }
    }

    fn do_search(&mut self, query: &str) -> DtResult<String> {
        self.controller.set_search_query(query);
        if query.is_empty() {
            return Ok("Search cleared.".to_string());
        }
        let hits = self.controller.visible_tasks().len();
        Ok(format!(
            "Filtering by '{query}': {hits} matching task{}",
            if hits == 1 { "" } else { "s" }
        ))
    }

    fn do_sound(&mut self, arg: &str) -> DtResult<String> {
        let want = match arg.to_lowercase().as_str() {
            "" => !self.controller.sound_enabled(),
            "on" => true,
            "off" => false,
            _ => {
                return Err(DtError::InvalidChoice(
                    "usage: sound [on|off]".to_string(),
                ));
            }
        };
        if want != self.controller.sound_enabled() {
            self.controller.toggle_sound();
        }
        Ok(self.sound_line())
    }

    fn do_export(&self, format: &str) -> DtResult<String> {
        let ledger = self.controller.ledger();
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(ledger.export_markdown()),
            "text" | "txt" => Ok(ledger.export_text()),
            "json" => Ok(serde_json::to_string_pretty(ledger)?),
            other => Err(DtError::UnknownFormat(other.to_string())),
        }
    }

    /// Resolve a 1-based position in the visible list, or an id prefix.
    fn resolve(&self, reference: &str) -> DtResult<Task> {
        if reference.is_empty() {
            return Err(DtError::InvalidChoice(
                "expected a task number or id".to_string(),
            ));
        }
        let visible = self.controller.visible_tasks();
        // Numbers inside the visible range are positions; anything else is an id prefix.
        if let Some(task) = reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| visible.get(i))
        {
            return Ok((*task).clone());
        }
        if reference.len() < MIN_ID_PREFIX {
            return Err(DtError::UnknownTask(reference.to_string()));
        }
        let matches: Vec<&Task> = self
            .controller
            .tasks()
            .iter()
            .filter(|t| t.id.matches_prefix(reference))
            .collect();
        match matches.as_slice() {
            [task] => Ok((*task).clone()),
            [] => Err(DtError::UnknownTask(reference.to_string())),
            _ => Err(DtError::AmbiguousTask(reference.to_string())),
        }
    }

    fn render_list(&self) -> String {
        let visible = self.controller.visible_tasks();
        if self.controller.tasks().is_empty() {
            return "No tasks yet. Add one with 'add <text>'.".to_string();
        }
        let mut out = String::new();
        let query = self.controller.search_query();
        if !query.trim().is_empty() {
            out.push_str(&format!("Filter: '{query}'\n"));
        }

        let numbered: Vec<(usize, &Task)> = visible.iter().copied().enumerate().collect();
        let pending: Vec<_> = numbered.iter().filter(|(_, t)| !t.done).collect();
        let done: Vec<_> = numbered.iter().filter(|(_, t)| t.done).collect();

        out.push_str(&format!("Pending ({}):\n", pending.len()));
        if pending.is_empty() {
            out.push_str("  You're all caught up!\n");
        }
        for (i, t) in pending {
            out.push_str(&format_task_line(*i, t));
        }
        out.push_str(&format!("Done ({}):\n", done.len()));
        if done.is_empty() {
            out.push_str("  Nothing here yet.\n");
        }
        for (i, t) in done {
            out.push_str(&format_task_line(*i, t));
        }
        out.trim_end().to_string()
    }

    fn render_achievements(&self) -> String {
        let entries = self.controller.achievements();
        if entries.is_empty() {
            return EMPTY_LEDGER_TEXT.to_string();
        }
        let mut out = format!("Achievements ({}):\n", entries.len());
        for a in entries {
            out.push_str(&format!(
                "  [{}] {} (roll #{}, {})\n",
                a.kind,
                a.label,
                a.roll_id,
                a.date.format("%Y-%m-%d %H:%M")
            ));
        }
        out.trim_end().to_string()
    }

    fn render_status(&self) -> String {
        let c = &self.controller;
        let theme = c.theme();
        let mut out = format!("Theme: {theme}");
        match c.audio().tracks().get(theme) {
            Some(track) => out.push_str(&format!(" ({})\n", track.name)),
            None => out.push_str(" (silent)\n"),
        }
        let ctx = c.roll_context();
        let target = ctx
            .second_roll()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "—".to_string());
        out.push_str(&format!("Target: {target} | Roll #{}\n", ctx.roll_id()));
        out.push_str(&format!("{}\n", self.sound_line()));
        let done = c.tasks().iter().filter(|t| t.done).count();
        out.push_str(&format!("Tasks: {done}/{} done\n", c.tasks().len()));
        out.push_str(&format!("Achievements: {}\n", c.achievements().len()));
        out.push_str(c.message());
        out
    }

    fn sound_line(&self) -> String {
        if !self.controller.sound_enabled() {
            return "Sound: off".to_string();
        }
        let simulated = !self.controller.audio().backend().is_audible();
        match (self.controller.now_playing(), simulated) {
            (Some(track), false) => format!(
                "Sound: on (playing {}, volume {:.2})",
                track.name, track.volume
            ),
            (Some(track), true) => format!(
                "Sound: on (simulated: {}, volume {:.2})",
                track.name, track.volume
            ),
            (None, false) => "Sound: on".to_string(),
            (None, true) => "Sound: on (simulated)".to_string(),
        }
    }
}

fn format_task_line(index: usize, task: &Task) -> String {
    let mark = if task.done { "x" } else { " " };
    format!("  {}. [{mark}] {} ({})\n", index + 1, task.text, task.id)
}

fn push_transition(out: &mut String, t: &Transition) {
    for a in &t.new_achievements {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Achievement unlocked: {}", a.label));
    }
    if let Some(message) = &t.message {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(message);
    }
}

fn help_text(topic: &str) -> String {
    match topic.to_lowercase().as_str() {
        "tasks" | "task" => "\
Task Commands:
  add <text>                    Add a task
  toggle <n|id>                 Mark a task done / not done (alias: done)
  remove <n|id>                 Delete a task (aliases: rm, delete)
  search [query]                Filter the list; no query clears it
  list                          Show pending and done tasks"
            .to_string(),
        "roll" | "dice" => "\
Dice Commands:
  roll target                   Roll today's target (a 1 means a bad day)
  roll theme                    Roll a new theme and its music"
            .to_string(),
        "sound" | "audio" => "\
Sound Commands:
  sound                         Toggle sound
  sound on|off                  Turn sound on or off

Without an audio device, playback is simulated: the theme track is
tracked and reported but nothing is heard."
            .to_string(),
        _ => "\
Dice Todo Commands:
  add <text>                    Add a task
  toggle <n|id>                 Toggle a task
  remove <n|id>                 Remove a task
  roll target|theme             Roll a die
  search [query]                Filter tasks
  sound [on|off]                Toggle sound
  list                          List tasks
  achievements                  Show achievements
  export [markdown|text|json]   Export achievements
  status                        Show session status
  help [topic]                  Show help (tasks, roll, sound)
  quit                          Exit"
            .to_string(),
    }
}
