//! Slot desirability scoring for the scheduler.
//!
//! The score is a hand-tuned additive heuristic, not a calibrated
//! utility. The magnitudes are part of the observable contract: changing
//! them shifts tie-breaks and relative slot orderings.

use chrono::{DateTime, Utc};

use crate::energy::EnergyModel;
use crate::task::{EnergyLevel, Task};

/// Weight applied to the priority ordinal.
const PRIORITY_WEIGHT: f64 = 2.0;
/// Flat bonus when the slot's energy meets the task's requirement.
const ENERGY_MATCH_BONUS: f64 = 3.0;
/// Penalty for a slot past the task's deadline.
const OVERDUE_PENALTY: f64 = 100.0;
/// Bonus for a deadline within 24 hours of the slot.
const DUE_SOON_BONUS: f64 = 5.0;
/// Bonus for a deadline within 48 hours of the slot.
const DUE_LATER_BONUS: f64 = 3.0;

/// Scores (task, candidate slot) pairs against an [`EnergyModel`].
#[derive(Debug, Clone, Copy)]
pub struct TaskScorer<'a> {
    model: &'a EnergyModel,
}

impl<'a> TaskScorer<'a> {
    pub fn new(model: &'a EnergyModel) -> Self {
        Self { model }
    }

    /// Score a task at a candidate slot start. Pure; unbounded range.
    ///
    /// Terms:
    /// - priority ordinal * 2
    /// - +3 when the slot's bucketed energy level meets the requirement,
    ///   otherwise minus the enum-level gap
    /// - deadline urgency: -100 past deadline, +5 under 24h, +3 under 48h
    pub fn score(&self, task: &Task, slot_start: DateTime<Utc>) -> f64 {
        let mut score = task.priority.value() as f64 * PRIORITY_WEIGHT;

        let available = EnergyLevel::from_capacity(self.model.capacity_at(&slot_start));
        if available >= task.required_energy {
            score += ENERGY_MATCH_BONUS;
        } else {
            score -= (task.required_energy.value() - available.value()) as f64;
        }

        if let Some(deadline) = task.deadline {
            let hours_until = (deadline - slot_start).num_seconds() as f64 / 3600.0;
            if hours_until < 0.0 {
                score -= OVERDUE_PENALTY;
            } else if hours_until < 24.0 {
                score += DUE_SOON_BONUS;
            } else if hours_until < 48.0 {
                score += DUE_LATER_BONUS;
            }
        }

        score
    }
}
