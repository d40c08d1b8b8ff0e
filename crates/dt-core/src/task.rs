//! In-memory task store.
//!
//! Tasks are kept most-recent-first. Every mutation is a silent no-op when
//! its input does not apply (blank text, unknown id) and returns the full
//! snapshot so the caller can re-evaluate progress.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for a task. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a fresh task id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether the id's hex form starts with `prefix` (case-insensitive).
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty()
            && self
                .0
                .simple()
                .to_string()
                .starts_with(&prefix.to_lowercase())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier.
    pub id: TaskId,
    /// Trimmed, non-empty text.
    pub text: String,
    /// Whether the task is completed.
    pub done: bool,
}

/// Ordered collection of tasks, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new open task. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> &[Task] {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank task text");
            return &self.tasks;
        }
        let task = Task {
            id: TaskId::new(),
            text: text.to_string(),
            done: false,
        };
        debug!(id = %task.id, text = %task.text, "task added");
        self.tasks.insert(0, task);
        &self.tasks
    }

    /// Flip the done flag of the task with `id`, if present.
    pub fn toggle(&mut self, id: TaskId) -> &[Task] {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = !task.done;
                debug!(%id, done = task.done, "task toggled");
            }
            None => debug!(%id, "toggle ignored, no such task"),
        }
        &self.tasks
    }

    /// Delete the task with `id`, if present.
    pub fn remove(&mut self, id: TaskId) -> &[Task] {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() < before {
            debug!(%id, "task removed");
        } else {
            debug!(%id, "remove ignored, no such task");
        }
        &self.tasks
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        completed_count(&self.tasks)
    }

    /// Tasks whose text contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn filtered(&self, query: &str) -> Vec<&Task> {
        filter_tasks(&self.tasks, query)
    }
}

/// Count the completed tasks in a snapshot.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.done).count()
}

/// Case-insensitive substring filter over a snapshot.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let needle = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends() {
        let mut store = TaskStore::new();
        store.add("first");
        let tasks = store.add("second");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "second");
        assert_eq!(tasks[1].text, "first");
        assert!(tasks.iter().all(|t| !t.done));
    }

    #[test]
    fn add_trims_and_ignores_blank() {
        let mut store = TaskStore::new();
        store.add("   ");
        store.add("");
        assert!(store.is_empty());
        store.add("  Read 10 pages  ");
        assert_eq!(store.tasks()[0].text, "Read 10 pages");
    }

    #[test]
    fn ids_are_unique() {
        let mut store = TaskStore::new();
        for i in 0..50 {
            store.add(&format!("task {i}"));
        }
        let mut ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn toggle_flips_in_place() {
        let mut store = TaskStore::new();
        store.add("a");
        store.add("b");
        let id = store.tasks()[1].id;
        store.toggle(id);
        assert!(store.get(id).unwrap().done);
        assert_eq!(store.tasks()[1].id, id);
        store.toggle(id);
        assert!(!store.get(id).unwrap().done);
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add("a");
        let before = store.tasks().to_vec();
        store.toggle(TaskId::new());
        store.remove(TaskId::new());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn remove_deletes() {
        let mut store = TaskStore::new();
        store.add("a");
        store.add("b");
        let id = store.tasks()[0].id;
        let tasks = store.remove(id);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "a");
    }

    #[test]
    fn completed_count_tracks_done() {
        let mut store = TaskStore::new();
        store.add("a");
        store.add("b");
        store.add("c");
        let id = store.tasks()[2].id;
        store.toggle(id);
        assert_eq!(store.completed_count(), 1);
    }

    #[test]
    fn filter_case_insensitive() {
        let mut store = TaskStore::new();
        store.add("Buy milk");
        store.add("Walk the dog");
        store.add("MILK the cow");
        let hits = store.filtered("milk");
        assert_eq!(hits.len(), 2);
        assert_eq!(store.filtered("  ").len(), 3);
        assert!(store.filtered("zebra").is_empty());
    }

    #[test]
    fn id_prefix_matching() {
        let id = TaskId::new();
        let short = id.to_string();
        assert_eq!(short.len(), 8);
        assert!(id.matches_prefix(&short));
        assert!(id.matches_prefix(&short.to_uppercase()));
        assert!(!id.matches_prefix(""));
    }

    #[test]
    fn serde_roundtrip() {
        let mut store = TaskStore::new();
        store.add("Quest");
        let json = serde_json::to_string(&store).unwrap();
        let back: TaskStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tasks(), store.tasks());
    }
}
