//! Task list storage.
//!
//! An ordered, newest-first list of tasks persisted as a pretty-printed JSON
//! array. Every mutation saves the whole list, then notifies subscribers.
//! Lookup misses are silently ignored rather than reported as errors.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::{Listeners, TaskEvent};
use crate::storage::data_dir;

/// A single task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Timestamp-derived id, unique within the store.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub pomodoros_completed: u32,
}

/// Title/description pair accepted by [`TaskStore::bulk_add`].
///
/// Matches the JSON shape produced by external task generators.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Ordered task list backed by a JSON file.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
    listeners: Listeners<TaskEvent>,
}

impl TaskStore {
    /// Open the store at the default location, `<data_dir>/tasks.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open_default() -> Result<Self> {
        Ok(Self::with_path(data_dir()?.join("tasks.json")))
    }

    /// Open a store backed by the given file, loading any existing tasks.
    ///
    /// A missing or unparseable file yields an empty list.
    pub fn with_path(path: PathBuf) -> Self {
        let tasks = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            tasks,
            path,
            listeners: Listeners::new(),
        }
    }

    /// Register a callback invoked for every event the store emits.
    pub fn subscribe(&mut self, callback: impl FnMut(&TaskEvent) + 'static) {
        self.listeners.subscribe(callback);
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// All tasks, newest-added first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Prepend a new task and return its id.
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) -> String {
        let id = self.next_id();
        self.tasks.insert(
            0,
            Task {
                id: id.clone(),
                title: title.into(),
                description: description.into(),
                completed: false,
                created_at: Utc::now(),
                pomodoros_completed: 0,
            },
        );
        self.persist();
        self.emit(TaskEvent::ListChanged { at: Utc::now() });
        self.emit(TaskEvent::TaskAdded {
            id: id.clone(),
            at: Utc::now(),
        });
        id
    }

    /// Add each seed in order, as if by repeated [`add`](Self::add).
    pub fn bulk_add(&mut self, seeds: Vec<TaskSeed>) {
        for seed in seeds {
            self.add(seed.title, seed.description);
        }
    }

    /// Flip `completed` on the matching task. Unknown ids are ignored.
    ///
    /// Emits `TaskCompleted` only when the flip lands on `completed=true`.
    pub fn toggle(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            let now_completed = task.completed;
            self.persist();
            self.emit(TaskEvent::ListChanged { at: Utc::now() });
            if now_completed {
                self.emit(TaskEvent::TaskCompleted {
                    id: id.to_string(),
                    at: Utc::now(),
                });
            }
        }
    }

    /// Replace title and description on the matching task. Unknown ids are
    /// ignored.
    pub fn update(&mut self, id: &str, title: impl Into<String>, description: impl Into<String>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = title.into();
            task.description = description.into();
            self.persist();
            self.emit(TaskEvent::ListChanged { at: Utc::now() });
        }
    }

    /// Remove the matching task.
    ///
    /// Deliberately permissive: persists and signals deletion even when the
    /// id matched nothing.
    pub fn delete(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
        self.persist();
        self.emit(TaskEvent::ListChanged { at: Utc::now() });
        self.emit(TaskEvent::TaskDeleted {
            id: id.to_string(),
            at: Utc::now(),
        });
    }

    /// Credit one completed pomodoro to the matching task. Unknown ids are
    /// ignored.
    pub fn increment_pomodoro(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.pomodoros_completed += 1;
            self.persist();
            self.emit(TaskEvent::ListChanged { at: Utc::now() });
        }
    }

    /// Surface a failure from an external collaborator (e.g. an AI task
    /// generator) to whoever is listening.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.emit(TaskEvent::Error {
            message: message.into(),
            at: Utc::now(),
        });
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn emit(&mut self, event: TaskEvent) {
        self.listeners.emit(&event);
    }

    /// UTC timestamp at microsecond resolution, bumped on the rare
    /// sub-second collision so ids stay unique.
    fn next_id(&self) -> String {
        let mut id = Utc::now().format("%Y%m%d%H%M%S%6f").to_string();
        while self.tasks.iter().any(|t| t.id == id) {
            id = (id.parse::<u128>().unwrap_or(0) + 1).to_string();
        }
        id
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            self.report_error(format!("failed to save tasks: {e}"));
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.tasks)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
