//! Greedy slot-selection scheduler.
//!
//! Orders pending tasks by priority and deadline, then walks the work
//! window committing each task to its highest-scoring 30-minute-aligned
//! slot. Single pass, no backtracking: an earlier commitment is never
//! reconsidered to improve a later task's outcome.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::EnergyModel;
use crate::scoring::TaskScorer;
use crate::task::Task;

/// Candidate slot granularity. Sub-30-minute placement is out of scope.
const SLOT_STEP_MINUTES: i64 = 30;

/// A committed (task, start time) pair produced by a scheduling run.
///
/// Not persisted on its own; the durable effect is the task's mutated
/// `scheduled_time` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Greedy scheduler over an [`EnergyModel`].
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    model: EnergyModel,
}

impl Scheduler {
    pub fn new(model: EnergyModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &EnergyModel {
        &self.model
    }

    /// Schedule incomplete tasks into `[window_start, window_end)`.
    ///
    /// Tasks that fit get their `scheduled_time` set and appear in the
    /// returned assignments in commitment order. Tasks that cannot fit
    /// are silently skipped and keep their previous `scheduled_time` --
    /// a scheduling run never fails.
    pub fn schedule_tasks(
        &self,
        tasks: &mut [Task],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<Assignment> {
        let scorer = TaskScorer::new(&self.model);

        // Pending tasks ordered by priority (descending) then deadline
        // (ascending, none last). The sort is stable so equal keys keep
        // their input order and runs stay deterministic.
        let mut order: Vec<usize> = (0..tasks.len())
            .filter(|&i| !tasks[i].completed)
            .collect();
        order.sort_by_key(|&i| {
            (
                -tasks[i].priority.value(),
                tasks[i].deadline.unwrap_or(DateTime::<Utc>::MAX_UTC),
            )
        });

        let mut assignments = Vec::new();
        let mut cursor = window_start;

        for idx in order {
            let task = &tasks[idx];

            let search_end = match task.deadline {
                Some(deadline) => {
                    window_end.min(deadline - Duration::minutes(task.duration_minutes as i64))
                }
                None => window_end,
            };

            // Scan candidate starts from the cursor; the first slot wins
            // ties since later candidates must score strictly greater.
            let mut best_slot: Option<DateTime<Utc>> = None;
            let mut best_score = f64::NEG_INFINITY;
            let mut candidate = cursor;
            while candidate < search_end {
                let score = scorer.score(task, candidate);
                if score > best_score {
                    best_score = score;
                    best_slot = Some(candidate);
                }
                candidate += Duration::minutes(SLOT_STEP_MINUTES);
            }

            if let Some(slot) = best_slot {
                let task = &mut tasks[idx];
                task.scheduled_time = Some(slot);
                assignments.push(Assignment {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    start_time: slot,
                    duration_minutes: task.duration_minutes,
                });
                if slot >= cursor {
                    cursor = slot + Duration::minutes(task.duration_minutes as i64);
                }
            }
        }

        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{EnergyLevel, Priority};
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap(),
        )
    }

    fn task(title: &str, priority: Priority, minutes: u32) -> Task {
        let mut t = Task::new(title);
        t.priority = priority;
        t.duration_minutes = minutes;
        t
    }

    #[test]
    fn schedules_by_priority_order() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut tasks = vec![
            task("low", Priority::Low, 45),
            task("high", Priority::High, 60),
            task("medium", Priority::Medium, 30),
        ];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0].title, "high");
        assert_eq!(assignments[1].title, "medium");
        assert_eq!(assignments[2].title, "low");
        // Every scheduled task got a scheduled_time
        assert!(tasks.iter().all(|t| t.scheduled_time.is_some()));
    }

    #[test]
    fn completed_tasks_are_skipped() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut done = task("done", Priority::Urgent, 30);
        done.complete();
        let mut tasks = vec![done, task("pending", Priority::Low, 30)];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].title, "pending");
        assert!(tasks[0].scheduled_time.is_none());
    }

    #[test]
    fn deadline_before_window_skips_task() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut urgent = task("too late", Priority::Urgent, 60);
        // Deadline earlier than window_start + duration: cannot fit.
        urgent.deadline = Some(start + Duration::minutes(30));
        let mut tasks = vec![urgent, task("fits", Priority::Low, 30)];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].title, "fits");
        assert!(tasks[0].scheduled_time.is_none());
    }

    #[test]
    fn earlier_deadline_wins_within_same_priority() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut later = task("later", Priority::High, 30);
        later.deadline = Some(end + Duration::days(3));
        let mut sooner = task("sooner", Priority::High, 30);
        sooner.deadline = Some(end + Duration::days(1));
        let mut none = task("no deadline", Priority::High, 30);
        none.deadline = None;
        let mut tasks = vec![later, none, sooner];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments[0].title, "sooner");
        assert_eq!(assignments[1].title, "later");
        // No deadline sorts last within the priority band.
        assert_eq!(assignments[2].title, "no deadline");
    }

    #[test]
    fn cursor_advances_past_committed_slots() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut tasks = vec![
            task("first", Priority::High, 60),
            task("second", Priority::High, 30),
        ];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments.len(), 2);
        let gap = assignments[1].start_time - assignments[0].start_time;
        assert!(gap >= Duration::minutes(60));
    }

    #[test]
    fn zero_width_window_yields_no_assignments() {
        let scheduler = Scheduler::default();
        let (start, _) = window();
        let mut tasks = vec![task("anything", Priority::Urgent, 30)];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, start);

        assert!(assignments.is_empty());
        assert!(tasks[0].scheduled_time.is_none());
    }

    #[test]
    fn rescheduling_is_deterministic() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut tasks = vec![
            task("a", Priority::High, 60),
            task("b", Priority::Medium, 30),
            task("c", Priority::Low, 45),
        ];

        let first = scheduler.schedule_tasks(&mut tasks, start, end);
        let second = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.task_id, b.task_id);
            assert_eq!(a.start_time, b.start_time);
        }
    }

    #[test]
    fn unschedulable_task_keeps_stale_scheduled_time() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let stale = Utc.with_ymd_and_hms(2025, 3, 9, 10, 0, 0).unwrap();
        let mut t = task("stale", Priority::High, 60);
        t.scheduled_time = Some(stale);
        t.deadline = Some(start); // now unschedulable
        let mut tasks = vec![t];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert!(assignments.is_empty());
        // Previous assignment is left untouched, not cleared.
        assert_eq!(tasks[0].scheduled_time, Some(stale));
    }

    #[test]
    fn high_priority_gets_best_scoring_slot() {
        let scheduler = Scheduler::default();
        let (start, end) = window();
        let mut high = task("high", Priority::High, 60);
        high.required_energy = EnergyLevel::High;
        let mut tasks = vec![high];

        let assignments = scheduler.schedule_tasks(&mut tasks, start, end);

        assert_eq!(assignments.len(), 1);
        // The scan starts at 09:00 which already satisfies High energy;
        // first-seen wins on ties, so the slot is the window start.
        assert_eq!(assignments[0].start_time, start);
    }
}
