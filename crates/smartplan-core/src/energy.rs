//! Circadian energy model.
//!
//! Maps hours of the day to an energy capacity (0-100) and answers the
//! derived queries the scheduler and reporting need: peak hour, windows
//! above a threshold, and the alignment score between available capacity
//! and a task's requirement.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Capacity threshold above which an hour qualifies for deep work.
pub const DEEP_WORK_THRESHOLD: f64 = 70.0;

/// Capacity assumed for hours the curve does not cover.
pub const FALLBACK_CAPACITY: f64 = 50.0;

/// A single point on the energy curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyPoint {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Energy capacity (0-100)
    pub capacity: f64,
}

impl EnergyPoint {
    pub fn new(hour: u8, capacity: f64) -> Self {
        Self { hour, capacity }
    }
}

/// Default circadian curve: rises to a mid-morning peak at 10:00,
/// dips after lunch, partially recovers late afternoon.
fn default_curve() -> Vec<EnergyPoint> {
    [
        (6, 30.0),
        (7, 50.0),
        (8, 70.0),
        (9, 85.0),
        (10, 90.0), // peak
        (11, 85.0),
        (12, 65.0),
        (13, 60.0), // post-lunch dip
        (14, 50.0),
        (15, 55.0),
        (16, 70.0),
        (17, 75.0),
        (18, 70.0),
        (19, 60.0),
        (20, 50.0),
        (21, 40.0),
        (22, 30.0),
        (23, 20.0),
    ]
    .into_iter()
    .map(|(hour, capacity)| EnergyPoint { hour, capacity })
    .collect()
}

/// Energy model over a daily curve of [`EnergyPoint`]s.
///
/// Hours absent from the curve fall back to [`FALLBACK_CAPACITY`] in
/// [`capacity_at`](Self::capacity_at), but score 0 in
/// [`alignment`](Self::alignment). The asymmetry is part of the model's
/// observable contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyModel {
    points: Vec<EnergyPoint>,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            points: default_curve(),
        }
    }
}

impl EnergyModel {
    /// Model with a custom curve. Points are kept in ascending hour order.
    pub fn with_curve(mut points: Vec<EnergyPoint>) -> Self {
        points.sort_by_key(|p| p.hour);
        Self { points }
    }

    /// Curve points in ascending hour order.
    pub fn points(&self) -> &[EnergyPoint] {
        &self.points
    }

    fn find(&self, hour: u8) -> Option<&EnergyPoint> {
        self.points.iter().find(|p| p.hour == hour)
    }

    /// Capacity at a given hour, or the fallback for uncovered hours.
    pub fn capacity_at_hour(&self, hour: u8) -> f64 {
        self.find(hour)
            .map(|p| p.capacity)
            .unwrap_or(FALLBACK_CAPACITY)
    }

    /// Capacity at an instant (hour component lookup).
    pub fn capacity_at(&self, at: &DateTime<Utc>) -> f64 {
        self.capacity_at_hour(at.hour() as u8)
    }

    /// The point with maximum capacity; earliest hour wins ties.
    pub fn peak(&self) -> Option<EnergyPoint> {
        self.points
            .iter()
            .copied()
            .fold(None, |best: Option<EnergyPoint>, p| match best {
                Some(b) if p.capacity > b.capacity => Some(p),
                Some(b) => Some(b),
                None => Some(p),
            })
    }

    /// Curve hours with capacity at or above `threshold`, ascending.
    pub fn windows_at_or_above(&self, threshold: f64) -> Vec<u8> {
        self.points
            .iter()
            .filter(|p| p.capacity >= threshold)
            .map(|p| p.hour)
            .collect()
    }

    /// Hours suitable for deep work (capacity >= 70).
    pub fn deep_work_windows(&self) -> Vec<u8> {
        self.windows_at_or_above(DEEP_WORK_THRESHOLD)
    }

    /// Alignment score in [0, 1] between a required capacity and the
    /// capacity available at `hour`.
    ///
    /// Hours absent from the curve score 0 -- no fallback here.
    pub fn alignment(&self, hour: u8, required_capacity: f64) -> f64 {
        let Some(point) = self.find(hour) else {
            return 0.0;
        };
        let available = point.capacity;

        if available >= required_capacity {
            let excess = available - required_capacity;
            (1.0 - excess / 100.0).min(1.0)
        } else {
            let deficit = required_capacity - available;
            (1.0 - deficit / 50.0).max(0.0)
        }
    }

    /// Render the curve as an ASCII chart.
    pub fn render_ascii_chart(&self) -> String {
        let mut output = String::from("\nDaily Energy Curve:\n");
        output.push_str(&"─".repeat(44));
        output.push('\n');

        for point in &self.points {
            let bar_length = (point.capacity / 100.0 * 30.0) as usize;
            let bar = "█".repeat(bar_length);
            let empty = " ".repeat(30 - bar_length);
            output.push_str(&format!(
                "{:02}:00 {}{} {:.0}\n",
                point.hour, bar, empty, point.capacity
            ));
        }

        output.push_str(&"─".repeat(44));
        output.push('\n');
        output
    }
}
