pub mod domain;
pub mod planner;
pub mod ports;
pub mod scheduler;
pub mod slot_id;

pub use domain::{
    Activity, ActivityDraft, NotificationPrefs, Priority, Recurrence, RecurrencePattern,
    ReminderKind, ReminderSlot,
};
pub use planner::plan_reminders;
pub use ports::{
    ActivityStore, NotificationFacility, PermissionStatus, PortError, PortResult, ScheduleRequest,
};
pub use scheduler::{ReconcileOutcome, ReminderScheduler};
pub use slot_id::{all_slot_ids, derive_slot_id};
