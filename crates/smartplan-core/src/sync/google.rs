//! Google Calendar synchronization.
//!
//! Pushes scheduled tasks to the user's primary calendar as events.
//! Each event carries the task id in its private extended properties so
//! re-syncing updates the existing event instead of duplicating it.

use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::oauth::{self, OAuthConfig, OAuthTokens};
use crate::error::SyncError;
use crate::storage::data_dir;
use crate::task::Task;

const CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
const SERVICE: &str = "google";

/// A calendar event fetched from Google Calendar.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// OAuth client credentials, persisted in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

/// Google Calendar sync client.
pub struct GoogleCalendarSync {
    credentials: ClientCredentials,
}

impl Default for GoogleCalendarSync {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleCalendarSync {
    /// Load client credentials from disk. Empty if not configured yet.
    pub fn new() -> Self {
        let credentials = data_dir()
            .ok()
            .map(|d| d.join("google_client.json"))
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { credentials }
    }

    /// Persist OAuth client credentials.
    pub fn set_credentials(client_id: &str, client_secret: &str) -> Result<(), SyncError> {
        let path = data_dir()
            .map_err(|e| SyncError::AuthorizationFailed(e.to_string()))?
            .join("google_client.json");
        let creds = ClientCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&creds)?)?;
        Ok(())
    }

    fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig {
            service_name: SERVICE.to_string(),
            client_id: self.credentials.client_id.clone(),
            client_secret: self.credentials.client_secret.clone(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/calendar".to_string()],
            redirect_port: 19824,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        oauth::load_tokens(SERVICE).is_some()
    }

    /// Run the interactive OAuth flow.
    pub fn authenticate(&self) -> Result<(), SyncError> {
        if self.credentials.client_id.is_empty() || self.credentials.client_secret.is_empty() {
            return Err(SyncError::CredentialsNotConfigured {
                service: SERVICE.to_string(),
            });
        }
        let config = self.oauth_config();
        runtime()?.block_on(oauth::authorize(&config))?;
        Ok(())
    }

    /// Remove stored tokens.
    pub fn disconnect(&self) -> Result<(), SyncError> {
        oauth::clear_tokens(SERVICE)
    }

    /// Return a valid access token, refreshing if expired.
    fn access_token(&self) -> Result<String, SyncError> {
        let tokens = oauth::load_tokens(SERVICE).ok_or(SyncError::NotAuthenticated {
            service: SERVICE.to_string(),
        })?;

        if !oauth::is_expired(&tokens) {
            return Ok(tokens.access_token);
        }

        let refresh = tokens
            .refresh_token
            .as_deref()
            .ok_or_else(|| SyncError::TokenRefreshFailed("no refresh token".to_string()))?;

        let config = self.oauth_config();
        let refreshed: OAuthTokens = runtime()?.block_on(oauth::refresh_token(&config, refresh))?;
        Ok(refreshed.access_token)
    }

    /// Push one scheduled task to the calendar, inserting or updating
    /// the event. Returns the event id.
    pub fn push_task(&self, task: &Task) -> Result<String, SyncError> {
        let scheduled = task
            .scheduled_time
            .ok_or_else(|| SyncError::NotScheduled(task.title.clone()))?;

        let token = self.access_token()?;
        let end = scheduled + Duration::minutes(task.duration_minutes as i64);

        let body = json!({
            "summary": task.title,
            "description": format!(
                "{}\n\nPriority: {}\nEnergy: {}",
                task.description, task.priority, task.required_energy
            ),
            "start": { "dateTime": scheduled.to_rfc3339(), "timeZone": "UTC" },
            "end": { "dateTime": end.to_rfc3339(), "timeZone": "UTC" },
            "reminders": {
                "useDefault": false,
                "overrides": [ { "method": "popup", "minutes": 30 } ],
            },
            "extendedProperties": {
                "private": { "task_id": task.id }
            },
        });

        let existing = self.find_event_by_task_id(&token, &task.id)?;

        let resp: serde_json::Value = runtime()?.block_on(async {
            let client = Client::new();
            let request = match &existing {
                Some(event_id) => client.put(format!("{CALENDAR_API}/{event_id}")),
                None => client.post(CALENDAR_API),
            };
            request
                .bearer_auth(&token)
                .json(&body)
                .send()
                .await?
                .json()
                .await
        })?;

        if let Some(err) = resp.get("error") {
            return Err(SyncError::Api(err.to_string()));
        }

        resp["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| SyncError::Api("missing event id in response".to_string()))
    }

    /// Push every scheduled, incomplete task. Tasks that fail to sync
    /// are skipped; returns the number synced.
    pub fn push_tasks(&self, tasks: &[Task]) -> usize {
        tasks
            .iter()
            .filter(|t| t.scheduled_time.is_some() && !t.completed)
            .filter(|t| self.push_task(t).is_ok())
            .count()
    }

    /// Delete the calendar event backing a task, if one exists.
    pub fn remove_task(&self, task_id: &str) -> Result<bool, SyncError> {
        let token = self.access_token()?;
        let Some(event_id) = self.find_event_by_task_id(&token, task_id)? else {
            return Ok(false);
        };

        let status = runtime()?.block_on(async {
            Client::new()
                .delete(format!("{CALENDAR_API}/{event_id}"))
                .bearer_auth(&token)
                .send()
                .await
                .map(|r| r.status())
        })?;

        Ok(status.is_success())
    }

    /// Fetch calendar events within a time window.
    pub fn events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, SyncError> {
        let token = self.access_token()?;
        let url = format!(
            "{CALENDAR_API}?timeMin={}&timeMax={}&singleEvents=true&orderBy=startTime",
            start.to_rfc3339(),
            end.to_rfc3339()
        );

        let resp: serde_json::Value = runtime()?.block_on(async {
            Client::new()
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await?
                .json()
                .await
        })?;

        if let Some(err) = resp.get("error") {
            return Err(SyncError::Api(err.to_string()));
        }

        let items = resp["items"]
            .as_array()
            .ok_or_else(|| SyncError::Api("missing items in response".to_string()))?;

        let mut events = Vec::new();
        for item in items {
            let Some((start, end)) = parse_event_times(item) else {
                continue; // all-day events carry date only
            };
            events.push(CalendarEvent {
                id: item["id"].as_str().unwrap_or_default().to_string(),
                summary: item["summary"].as_str().unwrap_or("(No title)").to_string(),
                start,
                end,
            });
        }

        Ok(events)
    }

    /// Find 30-minute-aligned free slots of at least `duration_minutes`
    /// within the day's work hours, avoiding existing calendar events.
    pub fn free_slots(
        &self,
        date: DateTime<Utc>,
        duration_minutes: u32,
        work_start_hour: u32,
        work_end_hour: u32,
    ) -> Result<Vec<DateTime<Utc>>, SyncError> {
        let day = date.date_naive();
        let start_of_day = Utc.from_utc_datetime(
            &day.and_hms_opt(work_start_hour, 0, 0)
                .unwrap_or_else(|| day.and_hms_opt(9, 0, 0).expect("valid time")),
        );
        let end_of_day = Utc.from_utc_datetime(
            &day.and_hms_opt(work_end_hour, 0, 0)
                .unwrap_or_else(|| day.and_hms_opt(17, 0, 0).expect("valid time")),
        );

        let busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = self
            .events(start_of_day, end_of_day)?
            .into_iter()
            .map(|e| (e.start, e.end))
            .collect();

        Ok(scan_free_slots(
            start_of_day,
            end_of_day,
            duration_minutes,
            &busy,
        ))
    }

    fn find_event_by_task_id(
        &self,
        token: &str,
        task_id: &str,
    ) -> Result<Option<String>, SyncError> {
        let now = Utc::now();
        let time_min = now - Duration::days(30);
        let time_max = now + Duration::days(90);

        let url = format!(
            "{CALENDAR_API}?timeMin={}&timeMax={}&privateExtendedProperty=task_id%3D{}&singleEvents=true",
            time_min.to_rfc3339(),
            time_max.to_rfc3339(),
            task_id
        );

        let resp: serde_json::Value = runtime()?.block_on(async {
            Client::new()
                .get(&url)
                .bearer_auth(token)
                .send()
                .await?
                .json()
                .await
        })?;

        Ok(resp["items"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| item["id"].as_str())
            .map(String::from))
    }
}

/// 30-minute stepped scan for free slots between busy intervals.
fn scan_free_slots(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: u32,
    busy: &[(DateTime<Utc>, DateTime<Utc>)],
) -> Vec<DateTime<Utc>> {
    let mut free = Vec::new();
    let mut current = start;

    while current + Duration::minutes(duration_minutes as i64) <= end {
        let slot_end = current + Duration::minutes(duration_minutes as i64);
        let overlaps = busy
            .iter()
            .any(|&(busy_start, busy_end)| current < busy_end && slot_end > busy_start);
        if !overlaps {
            free.push(current);
        }
        current += Duration::minutes(30);
    }

    free
}

fn parse_event_times(item: &serde_json::Value) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = item["start"]["dateTime"].as_str()?;
    let end = item["end"]["dateTime"].as_str()?;
    let start = DateTime::parse_from_rfc3339(start).ok()?.with_timezone(&Utc);
    let end = DateTime::parse_from_rfc3339(end).ok()?.with_timezone(&Utc);
    Some((start, end))
}

fn runtime() -> Result<tokio::runtime::Runtime, SyncError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn free_slot_scan_avoids_busy_intervals() {
        let busy = vec![(at(10, 0), at(11, 0))];
        let slots = scan_free_slots(at(9, 0), at(12, 0), 60, &busy);
        // 09:00 fits before the meeting, 11:00 after; 09:30-10:30 overlaps.
        assert_eq!(slots, vec![at(9, 0), at(11, 0)]);
    }

    #[test]
    fn free_slot_scan_respects_duration_at_day_end() {
        let slots = scan_free_slots(at(16, 0), at(17, 0), 90, &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn free_slot_scan_empty_calendar() {
        let slots = scan_free_slots(at(9, 0), at(10, 30), 30, &[]);
        assert_eq!(slots, vec![at(9, 0), at(9, 30), at(10, 0)]);
    }

    #[test]
    fn event_times_require_date_time() {
        // All-day events only carry a date and are skipped.
        let item = json!({
            "start": { "date": "2025-03-10" },
            "end": { "date": "2025-03-11" },
        });
        assert!(parse_event_times(&item).is_none());

        let timed = json!({
            "start": { "dateTime": "2025-03-10T09:00:00Z" },
            "end": { "dateTime": "2025-03-10T10:00:00Z" },
        });
        assert!(parse_event_times(&timed).is_some());
    }
}
