//! Task management commands.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::Args;
use smartplan_core::{EnergyLevel, Priority, Task, TaskManager};

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Duration in minutes
    #[arg(short = 'm', long, default_value = "30")]
    pub duration: u32,
    /// Task priority (low, medium, high, urgent)
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,
    /// Required energy level (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub energy: EnergyLevel,
    /// Deadline (RFC 3339, "YYYY-MM-DD HH:MM", or YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<String>,
    /// Comma-separated tags
    #[arg(short, long)]
    pub tags: Option<String>,
}

pub fn add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut task = Task::new(args.title);
    task.description = args.description.unwrap_or_default();
    task.duration_minutes = args.duration;
    task.priority = args.priority;
    task.required_energy = args.energy;
    if let Some(deadline) = &args.deadline {
        task.deadline = Some(parse_deadline(deadline)?);
    }
    if let Some(tags) = &args.tags {
        task.tags = tags.split(',').map(|t| t.trim().to_string()).collect();
    }

    let mut manager = TaskManager::open()?;
    let task = manager.add_task(task)?;
    println!("Task added: {} (ID: {})", task.title, task.id);
    Ok(())
}

pub fn list(include_completed: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = TaskManager::open()?;
    let tasks = manager.list_tasks(include_completed);

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "\n{:<38} {:<30} {:<8} {:<9} {}",
        "ID", "Title", "Priority", "Duration", "Status"
    );
    println!("{}", "-".repeat(100));

    for task in tasks {
        let status = if task.completed {
            "Done".to_string()
        } else if let Some(at) = task.scheduled_time {
            format!("Scheduled: {}", at.format("%Y-%m-%d %H:%M"))
        } else {
            "Pending".to_string()
        };
        let title: String = task.title.chars().take(28).collect();
        println!(
            "{:<38} {:<30} {:<8} {:<9} {}",
            task.id, title, task.priority, task.duration_minutes, status
        );
    }
    Ok(())
}

pub fn complete(task_id: &str, actual_duration: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = TaskManager::open()?;
    manager.complete_task(task_id, actual_duration)?;
    println!("Task {task_id} marked as completed");
    Ok(())
}

pub fn delete(task_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = TaskManager::open()?;
    manager.delete_task(task_id)?;
    println!("Task {task_id} deleted");
    Ok(())
}

/// Accepts RFC 3339, "YYYY-MM-DD HH:MM", or a bare date (midnight).
pub fn parse_deadline(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(format!(
        "invalid deadline '{value}': expected RFC 3339, 'YYYY-MM-DD HH:MM', or 'YYYY-MM-DD'"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_formats() {
        assert!(parse_deadline("2025-03-10T09:00:00Z").is_ok());
        assert!(parse_deadline("2025-03-10 09:00").is_ok());
        assert!(parse_deadline("2025-03-10").is_ok());
        assert!(parse_deadline("tomorrow").is_err());
    }
}
