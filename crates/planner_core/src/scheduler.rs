//! crates/planner_core/src/scheduler.rs
//!
//! The scheduler gateway: keeps the notification facility's pending set in
//! sync with an activity's current data by always cancelling before
//! rescheduling. Holds no state across calls; correctness rests entirely on
//! the deterministic slot ids, never on a remembered mapping.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::domain::{Activity, ReminderKind, ReminderSlot};
use crate::planner::plan_reminders;
use crate::ports::{NotificationFacility, PermissionStatus, PortResult, ScheduleRequest};
use crate::slot_id::all_slot_ids;

/// The structured result of a reconciliation. Facility problems are surfaced
/// here rather than as errors: nothing in a failed reconcile is fatal, and
/// re-invoking it is always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The listed slot ids are now pending at the facility.
    Scheduled { slot_ids: Vec<i32> },
    /// Every enabled kind was past due or nothing was enabled.
    NothingDue,
    /// Notification permission is not granted; scheduling was skipped.
    PermissionDenied,
    /// The facility's cancel or schedule call itself failed.
    FacilityError(String),
}

/// Reconciles planned reminders against the notification facility.
///
/// The facility is injected at construction so tests can substitute a
/// recording double and no module-level platform state exists.
#[derive(Clone)]
pub struct ReminderScheduler {
    facility: Arc<dyn NotificationFacility>,
}

impl ReminderScheduler {
    pub fn new(facility: Arc<dyn NotificationFacility>) -> Self {
        Self { facility }
    }

    /// Cancels all three possible reminders for an activity, whether or not
    /// they were ever scheduled. Safe to call with no prior schedule.
    pub async fn cancel(&self, activity_id: &str) -> PortResult<()> {
        let slot_ids = all_slot_ids(activity_id);
        debug!(activity_id, ?slot_ids, "cancelling activity reminders");
        self.facility.cancel(&slot_ids).await.map_err(|e| {
            warn!(activity_id, error = %e, "failed to cancel activity reminders");
            e
        })
    }

    /// Brings the facility's pending set in line with `activity` as of `now`.
    ///
    /// Always cancels first, so an edit or a repeated call never leaves two
    /// pending reminders for the same (activity, kind) pair, then schedules
    /// whatever the planner still considers due. Skips scheduling entirely
    /// when permission is not granted.
    pub async fn reconcile(&self, activity: &Activity, now: NaiveDateTime) -> ReconcileOutcome {
        if let Err(e) = self.cancel(&activity.id).await {
            return ReconcileOutcome::FacilityError(e.to_string());
        }

        match self.ensure_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(_) => {
                warn!(
                    activity_id = %activity.id,
                    "notification permission not granted, skipping scheduling"
                );
                return ReconcileOutcome::PermissionDenied;
            }
            Err(e) => return ReconcileOutcome::FacilityError(e.to_string()),
        }

        let slots = plan_reminders(activity, now);
        if slots.is_empty() {
            debug!(activity_id = %activity.id, "no future reminders to schedule");
            return ReconcileOutcome::NothingDue;
        }

        let slot_ids: Vec<i32> = slots.iter().map(|s| s.slot_id).collect();
        let requests = slots
            .into_iter()
            .map(|slot| schedule_request(activity, slot))
            .collect();

        match self.facility.schedule(requests).await {
            Ok(()) => {
                debug!(activity_id = %activity.id, ?slot_ids, "scheduled activity reminders");
                ReconcileOutcome::Scheduled { slot_ids }
            }
            Err(e) => {
                warn!(activity_id = %activity.id, error = %e, "failed to schedule reminders");
                ReconcileOutcome::FacilityError(e.to_string())
            }
        }
    }

    /// Checks the permission, prompting once if the platform has not asked yet.
    async fn ensure_permission(&self) -> PortResult<PermissionStatus> {
        match self.facility.check_permission().await? {
            PermissionStatus::Prompt => self.facility.request_permission().await,
            status => Ok(status),
        }
    }
}

/// Builds the user-facing notification for one slot.
fn schedule_request(activity: &Activity, slot: ReminderSlot) -> ScheduleRequest {
    let (title, body) = match slot.kind {
        ReminderKind::Start => (
            format!("Starting now: {}", activity.title),
            format!("\"{}\" is due to begin now.", activity.title),
        ),
        ReminderKind::End => (
            format!("Time's up: {}", activity.title),
            format!("\"{}\" has ended. Did you finish?", activity.title),
        ),
        ReminderKind::Reminder => (
            format!("Upcoming: {}", activity.title),
            format!(
                "\"{}\" starts in {} minutes.",
                activity.title, activity.notifications.reminder_minutes
            ),
        ),
    };

    ScheduleRequest {
        slot_id: slot.slot_id,
        title,
        body,
        fire_at: slot.fire_at,
        activity_id: slot.activity_id,
        kind: slot.kind,
    }
}
