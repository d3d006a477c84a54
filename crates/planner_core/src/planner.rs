//! crates/planner_core/src/planner.rs
//!
//! Computes the set of reminders an activity should currently have pending.
//!
//! The planner is pure: it takes the activity and the caller's notion of
//! "now" (a device-local naive datetime) and returns the desired
//! `ReminderSlot`s. It never fails: unparseable fields and past-due fire
//! times simply produce no slot, so one bad field can't block the other
//! enabled kinds.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::{Activity, ReminderKind, ReminderSlot};
use crate::slot_id::derive_slot_id;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
// Time columns round-trip through the store with seconds attached.
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, TIME_FORMAT_WITH_SECONDS))
        .ok()
}

/// Combines the activity's date with one of its wall-clock times.
/// Both are interpreted in the device's local timezone; no UTC conversion
/// happens anywhere in the planner.
fn local_fire_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Returns the reminders that should be pending for `activity` as of `now`.
///
/// A slot is produced per kind only when that kind is enabled, its fire time
/// parses, and the fire time is strictly in the future. Past-due suppression
/// applies to all three kinds, so editing an activity after its start time
/// never causes an immediate stale firing.
///
/// `start_time >= end_time` is not validated here; the combination formulas
/// are applied literally and ordering is the upstream form's responsibility.
pub fn plan_reminders(activity: &Activity, now: NaiveDateTime) -> Vec<ReminderSlot> {
    let mut slots = Vec::new();
    let prefs = &activity.notifications;

    if prefs.start {
        if let Some(fire_at) = local_fire_time(&activity.date, &activity.start_time) {
            push_if_future(&mut slots, activity, ReminderKind::Start, fire_at, now);
        }
    }

    if prefs.end {
        if let Some(fire_at) = local_fire_time(&activity.date, &activity.end_time) {
            push_if_future(&mut slots, activity, ReminderKind::End, fire_at, now);
        }
    }

    if prefs.reminder_minutes > 0 {
        if let Some(start_at) = local_fire_time(&activity.date, &activity.start_time) {
            let fire_at = start_at - Duration::minutes(i64::from(prefs.reminder_minutes));
            push_if_future(&mut slots, activity, ReminderKind::Reminder, fire_at, now);
        }
    }

    slots
}

fn push_if_future(
    slots: &mut Vec<ReminderSlot>,
    activity: &Activity,
    kind: ReminderKind,
    fire_at: NaiveDateTime,
    now: NaiveDateTime,
) {
    if fire_at > now {
        slots.push(ReminderSlot {
            activity_id: activity.id.clone(),
            kind,
            fire_at,
            slot_id: derive_slot_id(&activity.id, kind),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotificationPrefs, Priority};
    use chrono::Utc;
    use uuid::Uuid;

    fn activity(prefs: NotificationPrefs) -> Activity {
        Activity {
            id: "test-activity".to_string(),
            user_id: Uuid::nil(),
            title: "Morning run".to_string(),
            description: None,
            date: "2025-01-10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            category: "health".to_string(),
            priority: Priority::Medium,
            completed: false,
            notifications: prefs,
            recurrence: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn kinds(slots: &[ReminderSlot]) -> Vec<ReminderKind> {
        slots.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn all_three_kinds_scheduled_when_in_the_future() {
        let a = activity(NotificationPrefs {
            start: true,
            end: true,
            reminder_minutes: 15,
        });
        let slots = plan_reminders(&a, at("2025-01-10T08:00"));

        assert_eq!(slots.len(), 3);
        let start = slots.iter().find(|s| s.kind == ReminderKind::Start).unwrap();
        let end = slots.iter().find(|s| s.kind == ReminderKind::End).unwrap();
        let reminder = slots.iter().find(|s| s.kind == ReminderKind::Reminder).unwrap();
        assert_eq!(start.fire_at, at("2025-01-10T09:00"));
        assert_eq!(end.fire_at, at("2025-01-10T10:00"));
        assert_eq!(reminder.fire_at, at("2025-01-10T08:45"));
    }

    #[test]
    fn past_due_slots_are_suppressed() {
        let a = activity(NotificationPrefs {
            start: true,
            end: true,
            reminder_minutes: 15,
        });
        // All three fire times precede noon.
        assert!(plan_reminders(&a, at("2025-01-10T12:00")).is_empty());
    }

    #[test]
    fn fire_time_equal_to_now_is_suppressed() {
        let a = activity(NotificationPrefs {
            start: true,
            end: false,
            reminder_minutes: 0,
        });
        // Must be strictly after `now`.
        assert!(plan_reminders(&a, at("2025-01-10T09:00")).is_empty());
    }

    #[test]
    fn only_enabled_kinds_are_planned() {
        let a = activity(NotificationPrefs {
            start: false,
            end: true,
            reminder_minutes: 0,
        });
        let slots = plan_reminders(&a, at("2025-01-10T08:00"));
        assert_eq!(kinds(&slots), vec![ReminderKind::End]);
    }

    #[test]
    fn partially_elapsed_window_keeps_only_future_kinds() {
        let a = activity(NotificationPrefs {
            start: true,
            end: true,
            reminder_minutes: 15,
        });
        // Reminder (08:45) and start (09:00) have passed, the end has not.
        let slots = plan_reminders(&a, at("2025-01-10T09:30"));
        assert_eq!(kinds(&slots), vec![ReminderKind::End]);
    }

    #[test]
    fn unparseable_date_yields_no_slots() {
        let mut a = activity(NotificationPrefs::default());
        a.date = "January 10th".to_string();
        assert!(plan_reminders(&a, at("2025-01-10T08:00")).is_empty());
    }

    #[test]
    fn one_bad_time_does_not_block_the_other_kinds() {
        let mut a = activity(NotificationPrefs {
            start: true,
            end: true,
            reminder_minutes: 15,
        });
        a.end_time = "25:61".to_string();
        let slots = plan_reminders(&a, at("2025-01-10T08:00"));
        assert_eq!(
            kinds(&slots),
            vec![ReminderKind::Start, ReminderKind::Reminder]
        );
    }

    #[test]
    fn times_with_seconds_are_accepted() {
        let mut a = activity(NotificationPrefs {
            start: true,
            end: false,
            reminder_minutes: 0,
        });
        a.start_time = "09:00:00".to_string();
        let slots = plan_reminders(&a, at("2025-01-10T08:00"));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].fire_at, at("2025-01-10T09:00"));
    }

    #[test]
    fn inverted_window_is_computed_literally() {
        let mut a = activity(NotificationPrefs {
            start: true,
            end: true,
            reminder_minutes: 0,
        });
        a.start_time = "10:00".to_string();
        a.end_time = "09:00".to_string();
        // Malformed upstream input must not panic; both slots still come out.
        let slots = plan_reminders(&a, at("2025-01-10T08:00"));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn reminder_crossing_midnight_lands_on_the_previous_day() {
        let mut a = activity(NotificationPrefs {
            start: false,
            end: false,
            reminder_minutes: 30,
        });
        a.start_time = "00:10".to_string();
        let slots = plan_reminders(&a, at("2025-01-09T20:00"));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].fire_at, at("2025-01-09T23:40"));
    }

    #[test]
    fn slot_ids_in_plan_match_the_deriver() {
        let a = activity(NotificationPrefs::default());
        let slots = plan_reminders(&a, at("2025-01-10T00:00"));
        for slot in slots {
            assert_eq!(slot.slot_id, derive_slot_id(&a.id, slot.kind));
            assert_eq!(slot.activity_id, a.id);
        }
    }
}
