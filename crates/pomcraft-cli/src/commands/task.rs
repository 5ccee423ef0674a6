use std::path::PathBuf;

use clap::Subcommand;
use pomcraft_core::{TaskEvent, TaskSeed, TaskStore};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List tasks, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion on a task
    Toggle { id: String },
    /// Replace a task's title and description
    Update {
        id: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a task
    Delete { id: String },
    /// Credit a completed pomodoro to a task
    Pomodoro { id: String },
    /// Import tasks from a JSON file of {title, description} entries
    Import { file: PathBuf },
    /// Show task counts
    Stats,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::open_default()?;
    store.subscribe(|event| {
        if let TaskEvent::Error { message, .. } = event {
            eprintln!("task error: {message}");
        }
    });

    match action {
        TaskAction::Add { title, description } => {
            let id = store.add(title, description);
            println!("Task created: {id}");
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.tasks())?);
            } else {
                for task in store.tasks() {
                    let marker = if task.completed { "[x]" } else { "[ ]" };
                    println!(
                        "{marker} {} {} ({} pomodoros)",
                        task.id, task.title, task.pomodoros_completed
                    );
                    if !task.description.is_empty() {
                        println!("    {}", task.description);
                    }
                }
            }
        }
        TaskAction::Toggle { id } => store.toggle(&id),
        TaskAction::Update {
            id,
            title,
            description,
        } => store.update(&id, title, description),
        TaskAction::Delete { id } => {
            store.delete(&id);
            println!("Task deleted: {id}");
        }
        TaskAction::Pomodoro { id } => store.increment_pomodoro(&id),
        TaskAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            match serde_json::from_str::<Vec<TaskSeed>>(&content) {
                Ok(seeds) => {
                    let count = seeds.len();
                    store.bulk_add(seeds);
                    println!("Imported {count} tasks");
                }
                Err(e) => store.report_error(format!("could not parse {}: {e}", file.display())),
            }
        }
        TaskAction::Stats => {
            println!(
                "{} tasks, {} completed",
                store.task_count(),
                store.completed_count()
            );
        }
    }
    Ok(())
}
