use chrono::{DateTime, Utc};
use log::debug;

use crate::model::{Task, TaskId};

/// Change notification sent to subscribers after a mutation took effect.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(TaskId),
    TaskToggled { id: TaskId, completed: bool },
    TaskDeleted(TaskId),
    InputChanged,
}

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the task list and the pending input text.
///
/// Blank submissions and unknown ids are silently ignored. Every operation
/// that changes state notifies the subscribers, in registration order,
/// before returning.
pub struct TaskListStore {
    tasks: Vec<Task>,
    pending_input: String,
    next_id: u64,
    clock: fn() -> DateTime<Utc>,
    subscribers: Vec<Subscriber>,
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        TaskListStore {
            tasks: vec![],
            pending_input: String::new(),
            next_id: 1,
            clock,
            subscribers: vec![],
        }
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self, event: StoreEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
        self.notify(StoreEvent::InputChanged);
    }

    /// Appends a task built from the trimmed pending input and clears it.
    /// Returns `None` without touching anything when the input is blank.
    pub fn add(&mut self) -> Option<TaskId> {
        let text = self.pending_input.trim();
        if text.is_empty() {
            return None;
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        let task = Task {
            id,
            text: text.to_string(),
            completed: false,
            created_at: (self.clock)(),
        };
        self.tasks.push(task);
        self.pending_input.clear();

        self.notify(StoreEvent::TaskAdded(id));
        Some(id)
    }

    pub fn toggle(&mut self, id: TaskId) -> bool {
        let completed = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                task.completed
            }
            None => {
                debug!("event=task_toggle id={} status=missing", id);
                return false;
            }
        };
        self.notify(StoreEvent::TaskToggled { id, completed });
        true
    }

    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => index,
            None => {
                debug!("event=task_delete id={} status=missing", id);
                return None;
            }
        };
        // Vec::remove shifts the tail down, keeping relative order.
        let removed = self.tasks.remove(index);
        self.notify(StoreEvent::TaskDeleted(id));
        Some(removed)
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.completed_count()
    }

    pub fn progress_ratio(&self) -> Option<f64> {
        match self.total_count() {
            0 => None,
            total => Some(self.completed_count() as f64 / total as f64),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.pending_input.trim().is_empty()
    }
}
