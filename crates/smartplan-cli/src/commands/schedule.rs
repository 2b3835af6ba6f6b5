//! Day scheduling command.

use chrono::{NaiveDate, TimeZone, Utc};
use smartplan_core::storage::Config;
use smartplan_core::TaskManager;

pub fn run(
    date: Option<String>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let start_hour = start_hour.unwrap_or(config.work.start_hour);
    let end_hour = end_hour.unwrap_or(config.work.end_hour);

    let day = match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{s}': expected YYYY-MM-DD"))?,
        None => Utc::now().date_naive(),
    };
    let date = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).expect("midnight is valid"));

    let mut manager = TaskManager::open()?;
    let assignments = manager.schedule_day(date, start_hour, end_hour)?;

    if assignments.is_empty() {
        println!("No tasks to schedule.");
        return Ok(());
    }

    println!("\nSchedule for {}:", day.format("%Y-%m-%d"));
    println!("{:<8} {:<30} {:<9} Duration", "Time", "Task", "ID");
    println!("{}", "-".repeat(70));
    for a in &assignments {
        let title: String = a.title.chars().take(28).collect();
        let short_id: String = a.task_id.chars().take(8).collect();
        println!(
            "{:<8} {:<30} {:<9} {} min",
            a.start_time.format("%H:%M"),
            title,
            short_id,
            a.duration_minutes
        );
    }
    Ok(())
}
