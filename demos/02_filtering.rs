//! Demo 02: Filtering and Statistics
//!
//! Shows how list filters combine and what the aggregate counts look like.
//!
//! Run with: cargo run --example 02_filtering

use eyre::Result;
use taskboard::{Category, CreateTask, Priority, TaskQuery, TaskStore, UpdateTask};

fn print_tasks(label: &str, query: &TaskQuery, store: &TaskStore) {
    let tasks = store.list(query);
    println!("{} ({} found)", label, tasks.len());
    for task in tasks {
        println!(
            "   - {} [{}/{}]{}",
            task.title,
            task.category,
            task.priority,
            if task.completed { " (done)" } else { "" }
        );
    }
    println!();
}

fn main() -> Result<()> {
    println!("Taskboard Filtering Demo");
    println!("========================\n");

    let mut store = TaskStore::new();

    let inputs = vec![
        CreateTask::new("Important Meeting").category(Category::Work).priority(Priority::High),
        CreateTask::new("Fix login bug").category(Category::Work).priority(Priority::High),
        CreateTask::new("Update wiki").category(Category::Work).priority(Priority::Low),
        CreateTask::new("Shopping").description("Milk and eggs"),
        CreateTask::new("Plan trip").category(Category::Other).priority(Priority::Medium),
    ];
    let mut ids = Vec::new();
    for input in inputs {
        ids.push(store.create(input)?.id);
    }
    store.update(&ids[1], UpdateTask::completed(true))?;

    print_tasks("All tasks", &TaskQuery::default(), &store);
    print_tasks(
        "Work AND high priority",
        &TaskQuery::default().category(Category::Work).priority(Priority::High),
        &store,
    );
    print_tasks("Still open", &TaskQuery::default().completed(false), &store);
    print_tasks("Search \"meeting\"", &TaskQuery::default().search("meeting"), &store);
    print_tasks("Search \"MILK\" (description)", &TaskQuery::default().search("MILK"), &store);

    println!("Statistics:");
    println!("{}", serde_json::to_string_pretty(&store.stats())?);

    println!("\nDemo complete!");
    Ok(())
}
