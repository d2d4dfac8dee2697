// Input records and the validation rules applied before any mutation

use crate::error::ValidationError;
use crate::models::{Category, Priority};
use serde::Deserialize;
use tracing::debug;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Fields accepted when creating a task
///
/// Category and priority stay raw strings so that an unknown value is reported
/// as a validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category.as_str().to_string());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.as_str().to_string());
        self
    }
}

/// Sparse patch for an existing task; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl UpdateTask {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

/// Normalized create input, safe to store
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCreate {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
}

/// Normalized update patch, safe to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

/// View over either input kind that the rules inspect
struct Fields<'a> {
    title_required: bool,
    title: Option<&'a str>,
    description: Option<&'a str>,
    category: Option<&'a str>,
    priority: Option<&'a str>,
}

type Rule = fn(&Fields<'_>) -> Result<(), ValidationError>;

// Order matters: the first failing rule is the one reported.
const RULES: &[(&str, Rule)] = &[
    ("title_required", title_required),
    ("title_not_blank", title_not_blank),
    ("title_length", title_length),
    ("description_length", description_length),
    ("category_valid", category_valid),
    ("priority_valid", priority_valid),
];

fn title_required(f: &Fields<'_>) -> Result<(), ValidationError> {
    if f.title_required && f.title.is_none() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

fn title_not_blank(f: &Fields<'_>) -> Result<(), ValidationError> {
    match f.title {
        Some(title) if title.trim().is_empty() => Err(ValidationError::TitleEmpty),
        _ => Ok(()),
    }
}

fn title_length(f: &Fields<'_>) -> Result<(), ValidationError> {
    if let Some(title) = f.title {
        let len = title.trim().chars().count();
        if len > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong { len, max: MAX_TITLE_LEN });
        }
    }
    Ok(())
}

// Measured on the raw value, before trimming. Title is measured after.
fn description_length(f: &Fields<'_>) -> Result<(), ValidationError> {
    if let Some(description) = f.description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }
    Ok(())
}

fn category_valid(f: &Fields<'_>) -> Result<(), ValidationError> {
    parse_category(f.category).map(|_| ())
}

fn priority_valid(f: &Fields<'_>) -> Result<(), ValidationError> {
    parse_priority(f.priority).map(|_| ())
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, ValidationError> {
    raw.map(|s| s.parse().map_err(|_| ValidationError::InvalidCategory(s.to_string())))
        .transpose()
}

fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, ValidationError> {
    raw.map(|s| s.parse().map_err(|_| ValidationError::InvalidPriority(s.to_string())))
        .transpose()
}

fn run_rules(fields: &Fields<'_>) -> Result<(), ValidationError> {
    for (name, rule) in RULES {
        if let Err(e) = rule(fields) {
            debug!(rule = *name, error = %e, "validation rule failed");
            return Err(e);
        }
    }
    Ok(())
}

/// Validate a create request and apply defaults
pub fn validate_create(input: &CreateTask) -> Result<ValidCreate, ValidationError> {
    let fields = Fields {
        title_required: true,
        title: input.title.as_deref(),
        description: input.description.as_deref(),
        category: input.category.as_deref(),
        priority: input.priority.as_deref(),
    };
    run_rules(&fields)?;

    let title = input
        .title
        .as_deref()
        .map(|t| t.trim().to_string())
        .ok_or(ValidationError::TitleRequired)?;

    Ok(ValidCreate {
        title,
        description: input.description.as_deref().map(|d| d.trim().to_string()),
        category: parse_category(fields.category)?.unwrap_or_default(),
        priority: parse_priority(fields.priority)?.unwrap_or_default(),
    })
}

/// Validate an update patch. Only fields present in the patch are checked.
pub fn validate_update(input: &UpdateTask) -> Result<ValidUpdate, ValidationError> {
    let fields = Fields {
        title_required: false,
        title: input.title.as_deref(),
        description: input.description.as_deref(),
        category: input.category.as_deref(),
        priority: input.priority.as_deref(),
    };
    run_rules(&fields)?;

    Ok(ValidUpdate {
        title: input.title.as_deref().map(|t| t.trim().to_string()),
        description: input.description.as_deref().map(|d| d.trim().to_string()),
        completed: input.completed,
        category: parse_category(fields.category)?,
        priority: parse_priority(fields.priority)?,
    })
}
