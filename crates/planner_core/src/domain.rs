//! crates/planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// The three moments at which a local alert may fire for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// Fires when the activity begins.
    Start,
    /// Fires when the activity ends.
    End,
    /// Fires a configurable number of minutes before the start.
    Reminder,
}

impl ReminderKind {
    /// All kinds, in the order of their slot-id offsets.
    pub const ALL: [ReminderKind; 3] =
        [ReminderKind::Start, ReminderKind::End, ReminderKind::Reminder];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Start => "start",
            ReminderKind::End => "end",
            ReminderKind::Reminder => "reminder",
        }
    }
}

/// Per-activity notification toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPrefs {
    pub start: bool,
    pub end: bool,
    /// Minutes before the start time; `0` disables the pre-start reminder.
    pub reminder_minutes: u32,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            start: true,
            end: true,
            reminder_minutes: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
        }
    }

    /// Parses the stored representation, defaulting to `Daily` on anything
    /// unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "weekly" => RecurrencePattern::Weekly,
            "monthly" => RecurrencePattern::Monthly,
            _ => RecurrencePattern::Daily,
        }
    }
}

/// How an activity repeats. Persisted and round-tripped for the client; the
/// scheduling core never interprets it (occurrence expansion happens in the
/// planner UI, which materializes each occurrence as its own activity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub enabled: bool,
    pub pattern: RecurrencePattern,
    /// Every n days/weeks/months; at least 1.
    pub interval: u32,
    /// Last date the recurrence applies (`YYYY-MM-DD`); open-ended when None.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parses the stored representation, defaulting to `Medium` on anything
    /// unrecognized so one bad row never poisons a whole listing.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// A user-defined, time-boxed task with a date and start/end time.
///
/// `date` is a calendar date (`YYYY-MM-DD`) and the times are wall-clock
/// (`HH:MM`), all interpreted in the device's local timezone. They are kept
/// as strings because that is how they arrive from the client; the planner
/// parses them defensively rather than trusting upstream validation.
#[derive(Debug, Clone)]
pub struct Activity {
    /// Opaque stable identifier, unique per user, never reused.
    pub id: String,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub priority: Priority,
    pub completed: bool,
    pub notifications: NotificationPrefs,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The client-settable fields of an activity, used for create and update.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub priority: Priority,
    pub notifications: NotificationPrefs,
    pub recurrence: Option<Recurrence>,
}

/// One planned local notification for an activity: the ephemeral
/// (kind, fire-time, slot-id) tuple computed per reconciliation.
///
/// Slots are never persisted; the deterministic `slot_id` is what lets a
/// later cancellation address exactly the slots a prior scheduling created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSlot {
    pub activity_id: String,
    pub kind: ReminderKind,
    /// Absolute local timestamp at which the reminder should surface.
    pub fire_at: NaiveDateTime,
    pub slot_id: i32,
}
