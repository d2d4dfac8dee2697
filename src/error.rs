// Error types for store operations

/// Machine-readable code for validation failures
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Machine-readable code for unknown task ids
pub const TASK_NOT_FOUND: &str = "TASK_NOT_FOUND";

/// Rejected input. Raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title cannot be empty")]
    TitleEmpty,

    #[error("Title must be {max} characters or less (got {len})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Description must be {max} characters or less (got {len})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Invalid category: {0} (must be one of work, personal, other)")]
    InvalidCategory(String),

    #[error("Invalid priority: {0} (must be one of low, medium, high)")]
    InvalidPriority(String),

    /// The request body could not be decoded at all
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Errors returned by `TaskStore`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Task not found: {0}")]
    NotFound(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => VALIDATION_ERROR,
            StoreError::NotFound(_) => TASK_NOT_FOUND,
        }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
