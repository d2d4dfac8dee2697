// In-memory task store

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::filter::{self, TaskQuery};
use crate::models::{Category, Priority, Task, TaskStats};
use crate::validate::{self, CreateTask, UpdateTask};
use tracing::{debug, info};
use uuid::Uuid;

/// Sole owner of the task collection
///
/// Tasks are kept in creation order. Every mutating operation validates its
/// whole input first and only then touches the collection, so a failed call
/// leaves the store exactly as it was.
///
/// The store itself is not synchronized; callers sharing it across threads
/// wrap it in a single lock.
pub struct TaskStore {
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore").field("tasks", &self.tasks.len()).finish()
    }
}

impl TaskStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create an empty store with a custom time source
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            clock,
        }
    }

    /// Drop every task
    pub fn reset(&mut self) {
        info!(count = self.tasks.len(), "Resetting task store");
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// List tasks in creation order, keeping those that pass every filter
    pub fn list(&self, query: &TaskQuery) -> Vec<Task> {
        let filters = query.filters();
        debug!(filter_count = filters.len(), "list: called");

        self.tasks
            .iter()
            .filter(|task| filter::matches_all(&filters, task))
            .cloned()
            .collect()
    }

    /// Get a task by ID
    pub fn get(&self, id: &str) -> Result<Task> {
        self.find(id).cloned().ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Create a new task from unvalidated input
    pub fn create(&mut self, input: CreateTask) -> Result<Task> {
        let valid = validate::validate_create(&input)?;

        let now = self.clock.now();
        let task = Task {
            id: Uuid::now_v7().to_string(),
            title: valid.title,
            description: valid.description,
            completed: false,
            category: valid.category,
            priority: valid.priority,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %task.id, category = %task.category, priority = %task.priority, "create: stored task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Apply a sparse patch to an existing task
    ///
    /// `updated_at` is refreshed on success even when no value changed.
    pub fn update(&mut self, id: &str, patch: UpdateTask) -> Result<Task> {
        let index = self.position(id)?;
        let valid = validate::validate_update(&patch)?;
        let now = self.clock.now();

        let task = &mut self.tasks[index];
        if let Some(title) = valid.title {
            task.title = title;
        }
        if let Some(description) = valid.description {
            task.description = Some(description);
        }
        if let Some(completed) = valid.completed {
            task.completed = completed;
        }
        if let Some(category) = valid.category {
            task.category = category;
        }
        if let Some(priority) = valid.priority {
            task.priority = priority;
        }
        task.updated_at = now.max(task.created_at);

        debug!(id, "update: applied patch");
        Ok(task.clone())
    }

    /// Delete a task. Removal is permanent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.tasks.remove(index);
        debug!(id, "delete: removed task");
        Ok(())
    }

    /// Aggregate counts over the current collection
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Add a handful of sample tasks. Returns how many were created.
    pub fn seed_demo(&mut self) -> Result<usize> {
        let samples = [
            CreateTask::new("Prepare quarterly report")
                .description("Numbers for the review meeting")
                .category(Category::Work)
                .priority(Priority::High),
            CreateTask::new("Important Meeting")
                .category(Category::Work)
                .priority(Priority::Medium),
            CreateTask::new("Buy groceries").description("Milk, eggs, bread"),
            CreateTask::new("Book dentist appointment")
                .category(Category::Other)
                .priority(Priority::Low),
        ];

        let count = samples.len();
        for input in samples {
            self.create(input)?;
        }
        info!(count, "Seeded demo tasks");
        Ok(count)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
