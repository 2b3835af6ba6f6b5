//! Stateless productivity and health metrics.
//!
//! Pure functions over aggregate counts; consumed by reporting, never by
//! the scheduler.

use chrono::NaiveTime;

use crate::error::ValidationError;

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Productivity score in [0, 100] from completion counts and an energy
/// alignment factor in [0, 1]. Zero tasks scores zero.
pub fn productivity_score(completed: usize, total: usize, energy_alignment: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let completion_rate = completed as f64 / total as f64;
    let base = completion_rate * 100.0;
    let alignment_bonus = energy_alignment * 20.0;
    round1(base + alignment_bonus).min(100.0)
}

/// Health score in [0, 100] from sleep, break count, and work hours.
///
/// Three independently-capped sub-scores: sleep (optimal 7-9h, up to
/// 40), breaks (optimal one per 90 work minutes, up to 30), and
/// work-life balance (up to 30, decaying past 8 hours).
pub fn health_score(sleep_hours: f64, break_count: u32, work_hours: f64) -> f64 {
    let sleep_score = if (7.0..=9.0).contains(&sleep_hours) {
        40.0
    } else if (6.0..=10.0).contains(&sleep_hours) {
        30.0
    } else {
        (40.0 - (sleep_hours - 8.0).abs() * 5.0).max(0.0)
    };

    let optimal_breaks = ((work_hours / 1.5) as i64).max(1);
    let break_score = (break_count as f64 / optimal_breaks as f64 * 30.0).min(30.0);

    let balance_score = if work_hours <= 8.0 {
        30.0
    } else {
        (30.0 - (work_hours - 8.0) * 3.0).max(0.0)
    };

    round1(sleep_score + break_score + balance_score).min(100.0)
}

/// Duration in whole minutes between two HH:MM clock times.
/// An end before the start is interpreted as crossing midnight.
pub fn duration_minutes(start: &str, end: &str) -> Result<i64, ValidationError> {
    let parse = |value: &str| {
        NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ValidationError::InvalidClockTime {
            value: value.to_string(),
        })
    };
    let start_time = parse(start)?;
    let end_time = parse(end)?;

    let mut minutes = (end_time - start_time).num_minutes();
    if end_time < start_time {
        minutes += 24 * 60;
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn productivity_score_zero_tasks() {
        assert_eq!(productivity_score(0, 0, 0.5), 0.0);
    }

    #[test]
    fn productivity_score_caps_at_hundred() {
        // 100 + 20 bonus caps at 100.
        assert_eq!(productivity_score(5, 5, 1.0), 100.0);
    }

    #[test]
    fn productivity_score_partial() {
        // 3/4 = 75 + 0.5*20 = 85
        assert_eq!(productivity_score(3, 4, 0.5), 85.0);
    }

    #[test]
    fn health_score_optimal_day() {
        // sleep 40 + breaks 30 (5 of optimal 5) + balance 30, capped at 100
        assert_eq!(health_score(8.0, 5, 8.0), 100.0);
    }

    #[test]
    fn health_score_sleep_bands() {
        // 6h sleep sits in the acceptable band: 30 + 30 + 30 = 90
        assert_eq!(health_score(6.0, 5, 8.0), 90.0);
        // 4h sleep: 40 - |4-8|*5 = 20 -> 20 + 30 + 30 = 80
        assert_eq!(health_score(4.0, 5, 8.0), 80.0);
    }

    #[test]
    fn health_score_overwork_decay() {
        // 12h work: balance = 30 - 4*3 = 18, optimal_breaks = 8
        let score = health_score(8.0, 8, 12.0);
        assert_eq!(score, 40.0 + 30.0 + 18.0);
    }

    #[test]
    fn health_score_breaks_capped() {
        // 20 breaks against optimal 5 still score 30.
        assert_eq!(health_score(8.0, 20, 8.0), 100.0);
    }

    #[test]
    fn duration_same_day() {
        assert_eq!(duration_minutes("09:00", "10:30").unwrap(), 90);
    }

    #[test]
    fn duration_crosses_midnight() {
        assert_eq!(duration_minutes("23:30", "00:30").unwrap(), 60);
    }

    #[test]
    fn duration_rejects_malformed_input() {
        assert!(duration_minutes("9am", "10:00").is_err());
        assert!(duration_minutes("25:00", "10:00").is_err());
    }
}
