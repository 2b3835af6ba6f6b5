//! Task types: priority and energy enumerations plus the task record itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority levels, ordered from least to most important.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Ordinal value used by scoring and history matching (LOW=1 .. URGENT=4).
    pub fn value(&self) -> i32 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!(
                "invalid priority '{other}' (expected low/medium/high/urgent)"
            )),
        }
    }
}

/// Energy a task demands from the user, ordered low to high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    /// Ordinal value (LOW=1 .. HIGH=3).
    pub fn value(&self) -> i32 {
        match self {
            EnergyLevel::Low => 1,
            EnergyLevel::Medium => 2,
            EnergyLevel::High => 3,
        }
    }

    /// Capacity (0-100) a slot must offer to satisfy this level.
    pub fn required_capacity(&self) -> f64 {
        match self {
            EnergyLevel::Low => 30.0,
            EnergyLevel::Medium => 50.0,
            EnergyLevel::High => 70.0,
        }
    }

    /// Bucket a model capacity back onto the enum scale.
    pub fn from_capacity(capacity: f64) -> Self {
        if capacity >= 70.0 {
            EnergyLevel::High
        } else if capacity >= 50.0 {
            EnergyLevel::Medium
        } else {
            EnergyLevel::Low
        }
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!(
                "invalid energy level '{other}' (expected low/medium/high)"
            )),
        }
    }
}

/// A single task with all of its scheduling attributes.
///
/// `id` and `created_at` are set once at construction. `scheduled_time`
/// is owned by the scheduler and may be reassigned on every run;
/// `completed` is set by [`Task::complete`] and never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (UUID v4), immutable.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Planned duration in minutes. Must be positive; callers validate.
    pub duration_minutes: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub required_energy: EnergyLevel,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// Set only by the scheduler.
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with default attributes (30 minutes, medium priority
    /// and energy, no deadline).
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            duration_minutes: 30,
            priority: Priority::default(),
            deadline: None,
            required_energy: EnergyLevel::default(),
            tags: Vec::new(),
            completed: false,
            scheduled_time: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the task completed. Irreversible.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_follows_ordinal() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Urgent);
        assert_eq!(Priority::Urgent.value(), 4);
    }

    #[test]
    fn energy_capacity_buckets() {
        assert_eq!(EnergyLevel::from_capacity(90.0), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_capacity(70.0), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_capacity(55.0), EnergyLevel::Medium);
        assert_eq!(EnergyLevel::from_capacity(30.0), EnergyLevel::Low);
    }

    #[test]
    fn task_defaults() {
        let task = Task::new("Write report");
        assert_eq!(task.duration_minutes, 30);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.required_energy, EnergyLevel::Medium);
        assert!(!task.completed);
        assert!(task.scheduled_time.is_none());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn task_serialization_round_trip() {
        let mut task = Task::new("Review PR");
        task.tags = vec!["work".to_string(), "code".to_string()];
        task.priority = Priority::High;
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, task.id);
        assert_eq!(decoded.priority, Priority::High);
        assert_eq!(decoded.tags.len(), 2);
    }

    #[test]
    fn parse_priority_from_str() {
        assert_eq!("urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("critical".parse::<Priority>().is_err());
    }
}
