//! Demo 01: Basic CRUD Operations
//!
//! Walks one task through create, read, update, and delete, and shows what
//! a rejected input looks like.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use taskboard::{Category, CreateTask, Priority, TaskQuery, TaskStore, UpdateTask};

fn main() -> Result<()> {
    println!("Taskboard Basic CRUD Demo");
    println!("=========================\n");

    let mut store = TaskStore::new();

    // CREATE
    println!("1. CREATE - Adding a new task...");
    let task = store.create(
        CreateTask::new("  Write the release notes  ")
            .description("Cover the new filters")
            .category(Category::Work)
            .priority(Priority::High),
    )?;
    println!("   Created task with ID: {}", task.id);
    println!("   Title (trimmed): {:?}\n", task.title);

    // READ
    println!("2. READ - Retrieving the task...");
    let fetched = store.get(&task.id)?;
    println!("   - Title: {}", fetched.title);
    println!("   - Category: {}", fetched.category);
    println!("   - Priority: {}", fetched.priority);
    println!("   - Completed: {}\n", fetched.completed);

    // UPDATE
    println!("3. UPDATE - Marking it done...");
    let updated = store.update(&task.id, UpdateTask::completed(true))?;
    println!("   Completed: {}", updated.completed);
    println!("   Updated at: {}\n", updated.updated_at);

    // INVALID INPUT
    println!("4. VALIDATION - Trying an empty title...");
    match store.create(CreateTask::new("   ")) {
        Ok(_) => println!("   Unexpectedly accepted!"),
        Err(e) => println!("   Rejected [{}]: {}", e.code(), e),
    }
    println!();

    // LIST
    println!("5. LIST - Showing all tasks...");
    for task in store.list(&TaskQuery::default()) {
        println!("   - {} : {}", task.id, task.title);
    }
    println!();

    // DELETE
    println!("6. DELETE - Removing the task...");
    store.delete(&task.id)?;
    match store.get(&task.id) {
        Ok(_) => println!("   Task still exists!"),
        Err(e) => println!("   Verification: {} ({})", e, e.code()),
    }

    println!("\nDemo complete!");
    Ok(())
}
