//! Task manager facade tying the engine to persistence.
//!
//! Owns the in-memory task collection and coordinates the scheduler,
//! recommendation engine, and file store. The engine modules underneath
//! never perform I/O; all loading and saving happens here.

use chrono::{DateTime, TimeZone, Utc};

use crate::energy::EnergyModel;
use crate::error::{Result, StoreError, ValidationError};
use crate::recommend::{Insights, RecommendationEngine};
use crate::scheduler::{Assignment, Scheduler};
use crate::storage::TaskStore;
use crate::task::{EnergyLevel, Task};

/// Coordinates tasks, scheduling, recommendations, and persistence.
pub struct TaskManager {
    tasks: Vec<Task>,
    scheduler: Scheduler,
    engine: RecommendationEngine,
    store: TaskStore,
}

impl TaskManager {
    /// Open the manager against the default store location.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let store = TaskStore::open()?;
        Ok(Self::with_store(store, EnergyModel::default())?)
    }

    /// Open against an explicit store and energy model. Loads existing
    /// tasks and history from the store.
    pub fn with_store(store: TaskStore, model: EnergyModel) -> Result<Self> {
        let (tasks, history) = store.load()?;
        Ok(Self {
            tasks,
            scheduler: Scheduler::new(model),
            engine: RecommendationEngine::with_history(history),
            store,
        })
    }

    pub fn energy_model(&self) -> &EnergyModel {
        self.scheduler.model()
    }

    pub fn recommendation_engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Add a task. When the caller left the required energy at the
    /// Medium default, the recommendation engine picks a level from the
    /// task's priority and duration.
    pub fn add_task(&mut self, mut task: Task) -> Result<Task> {
        if task.required_energy == EnergyLevel::Medium {
            task.required_energy = self.engine.recommend_energy_level(&task);
        }
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Mark a task completed and feed the outcome to the
    /// recommendation engine.
    pub fn complete_task(&mut self, task_id: &str, actual_duration: Option<u32>) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        task.complete();
        let task = task.clone();
        self.engine.record_completion(&task, actual_duration);
        self.save()?;
        Ok(())
    }

    /// Delete a task.
    pub fn delete_task(&mut self, task_id: &str) -> Result<()> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        self.tasks.remove(index);
        self.save()?;
        Ok(())
    }

    pub fn get_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// List tasks, pending-only by default.
    pub fn list_tasks(&self, include_completed: bool) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| include_completed || !t.completed)
            .collect()
    }

    /// Schedule pending tasks into the given day's work window and
    /// persist the resulting assignments.
    pub fn schedule_day(
        &mut self,
        date: DateTime<Utc>,
        work_start_hour: u32,
        work_end_hour: u32,
    ) -> Result<Vec<Assignment>> {
        if work_end_hour <= work_start_hour {
            return Err(ValidationError::InvalidValue {
                field: "work window".to_string(),
                message: format!(
                    "end hour {work_end_hour} must be after start hour {work_start_hour}"
                ),
            }
            .into());
        }

        let day = date.date_naive();
        let window_start = Utc
            .from_utc_datetime(&day.and_hms_opt(work_start_hour, 0, 0).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "start_hour".to_string(),
                    message: format!("{work_start_hour} is not a valid hour"),
                }
            })?);
        let window_end = Utc
            .from_utc_datetime(&day.and_hms_opt(work_end_hour, 0, 0).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "end_hour".to_string(),
                    message: format!("{work_end_hour} is not a valid hour"),
                }
            })?);

        let assignments = self
            .scheduler
            .schedule_tasks(&mut self.tasks, window_start, window_end);
        self.save()?;
        Ok(assignments)
    }

    /// Productivity insights over the full task collection.
    pub fn insights(&self) -> Insights {
        self.engine.insights(&self.tasks)
    }

    /// Recommended duration for a task based on completion history.
    pub fn recommend_duration(&self, task: &Task) -> u32 {
        self.engine.recommend_duration(task)
    }

    fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.tasks, self.engine.history())
    }
}
