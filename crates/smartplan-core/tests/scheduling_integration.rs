//! Integration tests for the full scheduling workflow: manager +
//! scheduler + scorer + persistence.

use chrono::{Duration, TimeZone, Timelike, Utc};
use smartplan_core::{
    EnergyModel, Priority, Scheduler, Task, TaskManager, TaskScorer, TaskStore,
};

fn store_in(dir: &tempfile::TempDir) -> TaskStore {
    TaskStore::at(dir.path().join("tasks.json"))
}

#[test]
fn full_day_scheduling_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = TaskManager::with_store(store_in(&dir), EnergyModel::default()).unwrap();

    let mut high = Task::new("Design review");
    high.priority = Priority::High;
    high.duration_minutes = 60;
    let mut medium = Task::new("Email triage");
    medium.priority = Priority::Medium;
    medium.duration_minutes = 30;
    let mut low = Task::new("Tidy backlog");
    low.priority = Priority::Low;
    low.duration_minutes = 45;

    mgr.add_task(high).unwrap();
    mgr.add_task(medium).unwrap();
    mgr.add_task(low).unwrap();

    let date = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
    let assignments = mgr.schedule_day(date, 9, 17).unwrap();

    // All three fit an 8-hour window.
    assert_eq!(assignments.len(), 3);
    assert_eq!(assignments[0].title, "Design review");

    // The high-priority task's committed slot scores at least as well
    // as every other committed slot (no deadlines in play).
    let model = EnergyModel::default();
    let scorer = TaskScorer::new(&model);
    let tasks: Vec<Task> = mgr.list_tasks(true).into_iter().cloned().collect();
    let score_of = |title: &str| {
        let task = tasks.iter().find(|t| t.title == title).unwrap();
        scorer.score(task, task.scheduled_time.unwrap())
    };
    assert!(score_of("Design review") >= score_of("Email triage"));
    assert!(score_of("Design review") >= score_of("Tidy backlog"));
}

#[test]
fn scheduled_tasks_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let date = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();

    let task_id = {
        let mut mgr = TaskManager::with_store(store_in(&dir), EnergyModel::default()).unwrap();
        let task = mgr.add_task(Task::new("Persist me")).unwrap();
        mgr.schedule_day(date, 9, 17).unwrap();
        task.id
    };

    // Reopen against the same store.
    let mgr = TaskManager::with_store(store_in(&dir), EnergyModel::default()).unwrap();
    let task = mgr.get_task(&task_id).unwrap();
    assert!(task.scheduled_time.is_some());
}

#[test]
fn completion_history_feeds_recommendations_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut mgr = TaskManager::with_store(store_in(&dir), EnergyModel::default()).unwrap();
        for _ in 0..3 {
            let task = mgr.add_task(Task::new("Repeat work")).unwrap();
            mgr.complete_task(&task.id, Some(60)).unwrap();
        }
    }

    let mgr = TaskManager::with_store(store_in(&dir), EnergyModel::default()).unwrap();
    let probe = Task::new("Next one"); // medium priority, 30 min planned
    assert_eq!(mgr.recommend_duration(&probe), 60);
}

#[test]
fn overdue_tasks_never_enter_the_schedule() {
    let scheduler = Scheduler::default();
    let window_start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let window_end = Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap();

    let mut urgent = Task::new("Already missed");
    urgent.priority = Priority::Urgent;
    urgent.duration_minutes = 60;
    urgent.deadline = Some(window_start - Duration::hours(2));
    let mut tasks = vec![urgent];

    let assignments = scheduler.schedule_tasks(&mut tasks, window_start, window_end);
    assert!(assignments.is_empty());
    assert!(tasks[0].scheduled_time.is_none());
}

#[test]
fn assignments_stay_inside_the_work_window() {
    let scheduler = Scheduler::default();
    let window_start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let window_end = Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap();

    let mut tasks: Vec<Task> = (0..10)
        .map(|i| {
            let mut t = Task::new(format!("task {i}"));
            t.duration_minutes = 30;
            t
        })
        .collect();

    let assignments = scheduler.schedule_tasks(&mut tasks, window_start, window_end);

    assert_eq!(assignments.len(), 10);
    for a in &assignments {
        assert!(a.start_time >= window_start);
        assert!(a.start_time < window_end);
        // The window starts on the hour and every task is 30 minutes,
        // so committed slots stay half-hour aligned.
        assert_eq!(a.start_time.minute() % 30, 0);
    }
}
