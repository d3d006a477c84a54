//! crates/planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases
//! or platform notification facilities.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::{Activity, ActivityDraft, ReminderKind};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, platform).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Notification facility error: {0}")]
    Facility(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Notification Facility Types
//=========================================================================================

/// Platform notification permission, mirroring the tri-state the browser and
/// mobile runtimes expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Not yet decided; the facility may still prompt the user.
    Prompt,
}

/// One notification to be scheduled at the facility.
///
/// `activity_id` and `kind` travel along as opaque correlation metadata; the
/// facility never interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub slot_id: i32,
    pub title: String,
    pub body: String,
    pub fire_at: NaiveDateTime,
    pub activity_id: String,
    pub kind: ReminderKind,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The persistence boundary for activities. Every row-owning operation takes
/// the owning `user_id` so ownership is enforced at the store, the way the
/// original backend enforced it with row-level security.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Lists the user's activities ordered by date, then start time.
    async fn list_activities(&self, user_id: Uuid) -> PortResult<Vec<Activity>>;

    async fn get_activity(&self, id: &str, user_id: Uuid) -> PortResult<Activity>;

    async fn create_activity(&self, user_id: Uuid, draft: &ActivityDraft) -> PortResult<Activity>;

    /// Full-record replace of the client-settable fields; bumps `updated_at`.
    async fn update_activity(
        &self,
        id: &str,
        user_id: Uuid,
        draft: &ActivityDraft,
    ) -> PortResult<Activity>;

    async fn set_completed(
        &self,
        id: &str,
        user_id: Uuid,
        completed: bool,
    ) -> PortResult<Activity>;

    async fn delete_activity(&self, id: &str, user_id: Uuid) -> PortResult<()>;
}

/// The platform notification primitive (OS notification center, browser
/// Notification API, ...). The core only ever mutates the facility's schedule
/// table through this port and holds no state of its own.
#[async_trait]
pub trait NotificationFacility: Send + Sync {
    async fn check_permission(&self) -> PortResult<PermissionStatus>;

    /// Asks the platform to prompt the user. Returns the resulting status;
    /// implementations that cannot prompt return the current status.
    async fn request_permission(&self) -> PortResult<PermissionStatus>;

    /// Schedules a batch of notifications. Scheduling an id that is already
    /// pending replaces the existing entry.
    async fn schedule(&self, requests: Vec<ScheduleRequest>) -> PortResult<()>;

    /// Cancels the given ids. Cancelling an id that was never scheduled is a
    /// no-op, not an error.
    async fn cancel(&self, slot_ids: &[i32]) -> PortResult<()>;
}
