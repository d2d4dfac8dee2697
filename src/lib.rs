// Taskboard - in-memory task tracking with validation, filtering, and stats

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod store;
pub mod validate;

// Re-export main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, ValidationError};
pub use filter::{Filter, TaskQuery};
pub use models::{Category, Priority, Task, TaskStats};
pub use store::TaskStore;
pub use validate::{CreateTask, UpdateTask};
