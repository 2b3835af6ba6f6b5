//! Productivity insights command.

use smartplan_core::TaskManager;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = TaskManager::open()?;
    let insights = manager.insights();

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("\nProductivity Insights");
    println!("{}", "-".repeat(50));
    println!("Total tasks: {}", insights.total_tasks);
    println!("Completed: {}", insights.completed_tasks);
    println!("Pending: {}", insights.pending_tasks);
    println!("Completion rate: {:.1}%", insights.completion_rate * 100.0);
    println!(
        "Average task duration: {:.0} minutes",
        insights.avg_task_duration
    );
    println!("High priority pending: {}", insights.high_priority_pending);

    if !insights.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &insights.recommendations {
            println!("  - {rec}");
        }
    }
    Ok(())
}
