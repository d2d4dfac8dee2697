// Query filtering for tasks

use crate::models::{Category, Priority, Task};

/// A single predicate over a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Completed(bool),
    Category(Category),
    Priority(Priority),
    /// Case-insensitive substring of title or description
    Search(String),
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Completed(completed) => task.completed == *completed,
            Filter::Category(category) => task.category == *category,
            Filter::Priority(priority) => task.priority == *priority,
            Filter::Search(needle) => {
                let needle = needle.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Completed(b) => write!(f, "completed={}", b),
            Filter::Category(c) => write!(f, "category={}", c),
            Filter::Priority(p) => write!(f, "priority={}", p),
            Filter::Search(s) => write!(f, "search~{}", s),
        }
    }
}

/// Optional filters for listing tasks. Present fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

impl TaskQuery {
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Expand into the predicates that are actually set.
    /// An empty search string is treated as no search.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(completed) = self.completed {
            filters.push(Filter::Completed(completed));
        }
        if let Some(category) = self.category {
            filters.push(Filter::Category(category));
        }
        if let Some(priority) = self.priority {
            filters.push(Filter::Priority(priority));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            filters.push(Filter::Search(search.to_string()));
        }
        filters
    }
}

/// True when the task passes every filter
pub fn matches_all(filters: &[Filter], task: &Task) -> bool {
    filters.iter().all(|f| f.matches(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(title: &str, description: Option<&str>) -> Task {
        let now = Utc::now();
        Task {
            id: "t1".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
            category: Category::Work,
            priority: Priority::High,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = Filter::Search("meeting".to_string());
        assert!(filter.matches(&task("Important Meeting", None)));
        assert!(!filter.matches(&task("Shopping", None)));

        let filter = Filter::Search("MEET".to_string());
        assert!(filter.matches(&task("Important Meeting", None)));
    }

    #[test]
    fn test_search_checks_description() {
        let filter = Filter::Search("milk".to_string());
        assert!(filter.matches(&task("Shopping", Some("Buy MILK and eggs"))));
        assert!(!filter.matches(&task("Shopping", Some("Buy eggs"))));
        assert!(!filter.matches(&task("Shopping", None)));
    }

    #[test]
    fn test_field_filters() {
        let t = task("Report", None);
        assert!(Filter::Completed(false).matches(&t));
        assert!(!Filter::Completed(true).matches(&t));
        assert!(Filter::Category(Category::Work).matches(&t));
        assert!(!Filter::Category(Category::Other).matches(&t));
        assert!(Filter::Priority(Priority::High).matches(&t));
        assert!(!Filter::Priority(Priority::Low).matches(&t));
    }

    #[test]
    fn test_query_expands_present_fields() {
        assert!(TaskQuery::default().filters().is_empty());

        let query = TaskQuery::default().category(Category::Work).priority(Priority::High);
        assert_eq!(
            query.filters(),
            vec![Filter::Category(Category::Work), Filter::Priority(Priority::High)]
        );
    }

    #[test]
    fn test_empty_search_ignored() {
        assert!(TaskQuery::default().search("").filters().is_empty());
    }

    #[test]
    fn test_matches_all_is_conjunction() {
        let t = task("Important Meeting", None);
        let both = TaskQuery::default().category(Category::Work).search("meeting").filters();
        assert!(matches_all(&both, &t));

        let mismatch = TaskQuery::default().category(Category::Work).completed(true).filters();
        assert!(!matches_all(&mismatch, &t));

        assert!(matches_all(&[], &t));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Completed(true).to_string(), "completed=true");
        assert_eq!(Filter::Category(Category::Work).to_string(), "category=work");
        assert_eq!(Filter::Search("x".to_string()).to_string(), "search~x");
    }
}
