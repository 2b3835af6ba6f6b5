//! Recommendation engine fed by completed-task outcomes.
//!
//! "Learning" here is a bounded historical average, not a model: the
//! engine keeps an append-only history of completion records and derives
//! duration and energy defaults from it.

use serde::{Deserialize, Serialize};

use crate::task::{EnergyLevel, Priority, Task};

/// Minimum history size before duration recommendations use the average.
const MIN_HISTORY_FOR_RECOMMENDATION: usize = 3;
/// Pending high-priority count above which a focus warning fires.
const HIGH_PRIORITY_BACKLOG_LIMIT: usize = 3;
/// Completion rate below which a breakdown suggestion fires.
const LOW_COMPLETION_RATE: f64 = 0.5;
/// Task count above which the completion-rate rule applies.
const LOW_COMPLETION_MIN_TASKS: usize = 5;

/// Outcome of one completed task. Append-only; never evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub priority: i32,
    pub duration: u32,
    pub energy: i32,
    pub tag_count: usize,
    pub actual_duration: u32,
}

/// Aggregate productivity report over a task set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub completion_rate: f64,
    pub avg_task_duration: f64,
    pub high_priority_pending: usize,
    pub recommendations: Vec<String>,
}

/// Derives default durations and energy levels from completion history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationEngine {
    history: Vec<HistoryRecord>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore an engine from persisted history.
    pub fn with_history(history: Vec<HistoryRecord>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Record the outcome of a completed task. No-op for incomplete
    /// tasks; the actual duration defaults to the planned one.
    pub fn record_completion(&mut self, task: &Task, actual_duration_minutes: Option<u32>) {
        if !task.completed {
            return;
        }
        self.history.push(HistoryRecord {
            priority: task.priority.value(),
            duration: task.duration_minutes,
            energy: task.required_energy.value(),
            tag_count: task.tags.len(),
            actual_duration: actual_duration_minutes.unwrap_or(task.duration_minutes),
        });
    }

    /// Recommend a duration for a task from similar history.
    ///
    /// Falls back to the task's own duration when fewer than three
    /// records exist, or when no record is within one priority step.
    pub fn recommend_duration(&self, task: &Task) -> u32 {
        if self.history.len() < MIN_HISTORY_FOR_RECOMMENDATION {
            return task.duration_minutes;
        }

        let similar: Vec<u32> = self
            .history
            .iter()
            .filter(|r| (r.priority - task.priority.value()).abs() <= 1)
            .map(|r| r.actual_duration)
            .collect();

        if similar.is_empty() {
            return task.duration_minutes;
        }

        let sum: u64 = similar.iter().map(|&d| d as u64).sum();
        (sum as f64 / similar.len() as f64).round() as u32
    }

    /// Recommend an energy level from the task's own priority/duration.
    /// Fixed rule table; ignores history.
    pub fn recommend_energy_level(&self, task: &Task) -> EnergyLevel {
        match task.priority {
            Priority::Urgent => EnergyLevel::High,
            Priority::High => {
                if task.duration_minutes > 60 {
                    EnergyLevel::High
                } else {
                    EnergyLevel::Medium
                }
            }
            Priority::Medium => EnergyLevel::Medium,
            Priority::Low => EnergyLevel::Low,
        }
    }

    /// Aggregate counts plus rule-based recommendation strings.
    pub fn insights(&self, tasks: &[Task]) -> Insights {
        let completed = tasks.iter().filter(|t| t.completed).count();
        let pending = tasks.len() - completed;

        let completion_rate = if tasks.is_empty() {
            0.0
        } else {
            completed as f64 / tasks.len() as f64
        };

        let avg_task_duration = if tasks.is_empty() {
            0.0
        } else {
            tasks.iter().map(|t| t.duration_minutes as f64).sum::<f64>() / tasks.len() as f64
        };

        let high_priority_pending = tasks
            .iter()
            .filter(|t| !t.completed && t.priority >= Priority::High)
            .count();

        let mut recommendations = Vec::new();
        if high_priority_pending > HIGH_PRIORITY_BACKLOG_LIMIT {
            recommendations.push(
                "You have multiple high-priority tasks pending. Consider focusing on these first."
                    .to_string(),
            );
        }
        if completion_rate < LOW_COMPLETION_RATE && tasks.len() > LOW_COMPLETION_MIN_TASKS {
            recommendations.push(
                "Your completion rate is below 50%. Consider breaking down large tasks into smaller ones."
                    .to_string(),
            );
        }

        Insights {
            total_tasks: tasks.len(),
            completed_tasks: completed,
            pending_tasks: pending,
            completion_rate,
            avg_task_duration,
            high_priority_pending,
            recommendations,
        }
    }
}
