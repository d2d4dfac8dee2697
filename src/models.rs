// Data models for the task board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A tracked task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub category: Category,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when a string names no enumeration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

/// Aggregate counts over the live collection
///
/// Derived on demand by `TaskStore::stats`; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

impl TaskStats {
    /// Tally a sequence of tasks. Every category and priority key is present,
    /// zero-valued if nothing matches.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut by_category: BTreeMap<Category, usize> = Category::ALL.into_iter().map(|c| (c, 0)).collect();
        let mut by_priority: BTreeMap<Priority, usize> = Priority::ALL.into_iter().map(|p| (p, 0)).collect();
        let mut total = 0;
        let mut completed = 0;

        for task in tasks {
            total += 1;
            if task.completed {
                completed += 1;
            }
            *by_category.entry(task.category).or_insert(0) += 1;
            *by_priority.entry(task.priority).or_insert(0) += 1;
        }

        Self {
            total,
            completed,
            active: total - completed,
            by_category,
            by_priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(category: Category, priority: Priority, completed: bool) -> Task {
        let now = Utc::now();
        Task {
            id: uuid::Uuid::now_v7().to_string(),
            title: "Task".to_string(),
            description: None,
            completed,
            category,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Work).unwrap();
        assert_eq!(json, "\"work\"");

        let parsed: Category = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(Category::default(), Category::Personal);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("personal".parse::<Category>(), Ok(Category::Personal));
        assert_eq!("High".parse::<Priority>(), Err(UnknownVariant("High".to_string())));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = task(Category::Work, Priority::High, false);
        let json = serde_json::to_value(&task).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("description").is_none());
        assert_eq!(json["category"], "work");
        assert_eq!(json["priority"], "high");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_empty_description_is_kept() {
        let mut task = task(Category::Other, Priority::Low, false);
        task.description = Some(String::new());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_stats_empty() {
        let stats = TaskStats::from_tasks(std::iter::empty());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.by_category.len(), 3);
        assert_eq!(stats.by_priority.len(), 3);
        assert!(stats.by_category.values().all(|&n| n == 0));
        assert!(stats.by_priority.values().all(|&n| n == 0));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["byCategory"]["work"], 0);
        assert_eq!(json["byPriority"]["medium"], 0);
    }

    #[test]
    fn test_stats_counts() {
        let tasks = vec![
            task(Category::Work, Priority::High, true),
            task(Category::Work, Priority::High, false),
            task(Category::Personal, Priority::Low, false),
        ];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.by_category[&Category::Work], 2);
        assert_eq!(stats.by_category[&Category::Other], 0);
        assert_eq!(stats.by_priority[&Priority::High], 2);
        assert_eq!(stats.by_priority[&Priority::Medium], 0);
    }
}
