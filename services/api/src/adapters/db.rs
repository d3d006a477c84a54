//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ActivityStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use planner_core::domain::{
    Activity, ActivityDraft, NotificationPrefs, Priority, Recurrence, RecurrencePattern,
};
use planner_core::ports::{ActivityStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, user_id, title, description, date, start_time, end_time, \
     category, priority, completed, notify_start, notify_end, reminder_minutes, \
     recur_enabled, recur_pattern, recur_interval, recur_end_date, \
     created_at, updated_at";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ActivityStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ActivityRecord {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    category: String,
    priority: String,
    completed: bool,
    notify_start: bool,
    notify_end: bool,
    reminder_minutes: i32,
    recur_enabled: bool,
    recur_pattern: Option<String>,
    recur_interval: Option<i32>,
    recur_end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ActivityRecord {
    fn to_domain(self) -> Activity {
        Activity {
            id: self.id.to_string(),
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            date: self.date.format("%Y-%m-%d").to_string(),
            start_time: self.start_time.format("%H:%M").to_string(),
            end_time: self.end_time.format("%H:%M").to_string(),
            category: self.category,
            priority: Priority::parse_lenient(&self.priority),
            completed: self.completed,
            notifications: NotificationPrefs {
                start: self.notify_start,
                end: self.notify_end,
                reminder_minutes: self.reminder_minutes.max(0) as u32,
            },
            recurrence: self.recur_pattern.map(|pattern| Recurrence {
                enabled: self.recur_enabled,
                pattern: RecurrencePattern::parse_lenient(&pattern),
                interval: self.recur_interval.unwrap_or(1).max(1) as u32,
                end_date: self
                    .recur_end_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
            }),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// Draft Parsing Helpers
//=========================================================================================

/// The typed column values of a draft. Drafts arrive with string date/time
/// fields; the store requires them well-formed even though the planner is
/// lenient, because a row the planner can't parse could never fire anything.
struct DraftColumns {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    recur_end_date: Option<NaiveDate>,
}

fn parse_draft(draft: &ActivityDraft) -> PortResult<DraftColumns> {
    let date = parse_calendar_date(&draft.date)?;
    let start_time = parse_wall_clock(&draft.start_time)?;
    let end_time = parse_wall_clock(&draft.end_time)?;
    // The client sends an empty end date for open-ended recurrences.
    let recur_end_date = match draft.recurrence.as_ref().and_then(|r| r.end_date.as_deref()) {
        Some(s) if !s.trim().is_empty() => Some(parse_calendar_date(s)?),
        _ => None,
    };
    Ok(DraftColumns {
        date,
        start_time,
        end_time,
        recur_end_date,
    })
}

fn parse_calendar_date(s: &str) -> PortResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PortError::Invalid(format!("Invalid activity date '{}'", s)))
}

fn parse_wall_clock(s: &str) -> PortResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| PortError::Invalid(format!("Invalid activity time '{}'", s)))
}

fn parse_activity_id(id: &str) -> PortResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| PortError::NotFound(format!("Activity {} not found", id)))
}

fn not_found(id: &str) -> impl FnOnce(sqlx::Error) -> PortError + '_ {
    move |e| match e {
        sqlx::Error::RowNotFound => PortError::NotFound(format!("Activity {} not found", id)),
        _ => PortError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// `ActivityStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ActivityStore for DbAdapter {
    async fn list_activities(&self, user_id: Uuid) -> PortResult<Vec<Activity>> {
        let records = sqlx::query_as::<_, ActivityRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM activities WHERE user_id = $1 \
             ORDER BY date ASC, start_time ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_activity(&self, id: &str, user_id: Uuid) -> PortResult<Activity> {
        let activity_id = parse_activity_id(id)?;
        let record = sqlx::query_as::<_, ActivityRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM activities WHERE id = $1 AND user_id = $2"
        ))
        .bind(activity_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(id))?;

        Ok(record.to_domain())
    }

    async fn create_activity(&self, user_id: Uuid, draft: &ActivityDraft) -> PortResult<Activity> {
        let columns = parse_draft(draft)?;
        let record = sqlx::query_as::<_, ActivityRecord>(&format!(
            "INSERT INTO activities \
                 (id, user_id, title, description, date, start_time, end_time, \
                  category, priority, completed, notify_start, notify_end, reminder_minutes, \
                  recur_enabled, recur_pattern, recur_interval, recur_end_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, $10, $11, $12, \
                     $13, $14, $15, $16) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(columns.date)
        .bind(columns.start_time)
        .bind(columns.end_time)
        .bind(&draft.category)
        .bind(draft.priority.as_str())
        .bind(draft.notifications.start)
        .bind(draft.notifications.end)
        .bind(draft.notifications.reminder_minutes as i32)
        .bind(draft.recurrence.as_ref().is_some_and(|r| r.enabled))
        .bind(draft.recurrence.as_ref().map(|r| r.pattern.as_str()))
        .bind(draft.recurrence.as_ref().map(|r| r.interval as i32))
        .bind(columns.recur_end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn update_activity(
        &self,
        id: &str,
        user_id: Uuid,
        draft: &ActivityDraft,
    ) -> PortResult<Activity> {
        let activity_id = parse_activity_id(id)?;
        let columns = parse_draft(draft)?;
        let record = sqlx::query_as::<_, ActivityRecord>(&format!(
            "UPDATE activities SET \
                 title = $3, description = $4, date = $5, start_time = $6, end_time = $7, \
                 category = $8, priority = $9, notify_start = $10, notify_end = $11, \
                 reminder_minutes = $12, recur_enabled = $13, recur_pattern = $14, \
                 recur_interval = $15, recur_end_date = $16, updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(activity_id)
        .bind(user_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(columns.date)
        .bind(columns.start_time)
        .bind(columns.end_time)
        .bind(&draft.category)
        .bind(draft.priority.as_str())
        .bind(draft.notifications.start)
        .bind(draft.notifications.end)
        .bind(draft.notifications.reminder_minutes as i32)
        .bind(draft.recurrence.as_ref().is_some_and(|r| r.enabled))
        .bind(draft.recurrence.as_ref().map(|r| r.pattern.as_str()))
        .bind(draft.recurrence.as_ref().map(|r| r.interval as i32))
        .bind(columns.recur_end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(id))?;

        Ok(record.to_domain())
    }

    async fn set_completed(
        &self,
        id: &str,
        user_id: Uuid,
        completed: bool,
    ) -> PortResult<Activity> {
        let activity_id = parse_activity_id(id)?;
        let record = sqlx::query_as::<_, ActivityRecord>(&format!(
            "UPDATE activities SET completed = $3, updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(activity_id)
        .bind(user_id)
        .bind(completed)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(id))?;

        Ok(record.to_domain())
    }

    async fn delete_activity(&self, id: &str, user_id: Uuid) -> PortResult<()> {
        let activity_id = parse_activity_id(id)?;
        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND user_id = $2")
            .bind(activity_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Activity {} not found", id)));
        }
        Ok(())
    }
}
