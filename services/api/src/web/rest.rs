//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Every mutating handler finishes by reconciling (or cancelling) the
//! activity's reminders, so the notification facility's pending set always
//! matches what the store holds.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Local, Utc};
use planner_core::domain::{
    Activity, ActivityDraft, NotificationPrefs, Priority, Recurrence, RecurrencePattern,
};
use planner_core::ports::PortError;
use planner_core::scheduler::ReconcileOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_activities_handler,
        create_activity_handler,
        update_activity_handler,
        complete_activity_handler,
        delete_activity_handler,
    ),
    components(
        schemas(
            ActivityPayload,
            ActivityResponse,
            ActivityWithRemindersResponse,
            CompletePayload,
            NotificationPrefsPayload,
            PriorityPayload,
            RecurrencePatternPayload,
            RecurrencePayload,
            ReminderReport,
        )
    ),
    tags(
        (name = "Activity Planner API", description = "API endpoints for time-boxed activities and their local reminders.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriorityPayload {
    Low,
    #[default]
    Medium,
    High,
}

impl From<PriorityPayload> for Priority {
    fn from(p: PriorityPayload) -> Self {
        match p {
            PriorityPayload::Low => Priority::Low,
            PriorityPayload::Medium => Priority::Medium,
            PriorityPayload::High => Priority::High,
        }
    }
}

impl From<Priority> for PriorityPayload {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Low => PriorityPayload::Low,
            Priority::Medium => PriorityPayload::Medium,
            Priority::High => PriorityPayload::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePatternPayload {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl From<RecurrencePatternPayload> for RecurrencePattern {
    fn from(p: RecurrencePatternPayload) -> Self {
        match p {
            RecurrencePatternPayload::Daily => RecurrencePattern::Daily,
            RecurrencePatternPayload::Weekly => RecurrencePattern::Weekly,
            RecurrencePatternPayload::Monthly => RecurrencePattern::Monthly,
        }
    }
}

impl From<RecurrencePattern> for RecurrencePatternPayload {
    fn from(p: RecurrencePattern) -> Self {
        match p {
            RecurrencePattern::Daily => RecurrencePatternPayload::Daily,
            RecurrencePattern::Weekly => RecurrencePatternPayload::Weekly,
            RecurrencePattern::Monthly => RecurrencePatternPayload::Monthly,
        }
    }
}

/// Recurrence settings as the client sends and receives them. Stored and
/// round-tripped verbatim; occurrence expansion is a client concern.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePayload {
    pub enabled: bool,
    #[serde(default)]
    pub pattern: RecurrencePatternPayload,
    /// Every n days/weeks/months.
    pub interval: u32,
    /// `YYYY-MM-DD`; omitted or empty means open-ended.
    pub end_date: Option<String>,
}

impl From<RecurrencePayload> for Recurrence {
    fn from(p: RecurrencePayload) -> Self {
        Recurrence {
            enabled: p.enabled,
            pattern: p.pattern.into(),
            interval: p.interval.max(1),
            end_date: p.end_date,
        }
    }
}

impl From<Recurrence> for RecurrencePayload {
    fn from(r: Recurrence) -> Self {
        RecurrencePayload {
            enabled: r.enabled,
            pattern: r.pattern.into(),
            interval: r.interval,
            end_date: r.end_date,
        }
    }
}

/// Notification toggles as the client sends and receives them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationPrefsPayload {
    pub start: bool,
    pub end: bool,
    /// Minutes before the start time; 0 disables the pre-start reminder.
    pub reminder: u32,
}

/// The client-settable fields of an activity (create and full update).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPayload {
    pub title: String,
    pub description: Option<String>,
    /// Calendar date in `YYYY-MM-DD`, device-local.
    pub date: String,
    /// Wall-clock time in `HH:MM`, device-local.
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: PriorityPayload,
    /// When omitted, server defaults apply (start/end on, configured
    /// reminder lead time).
    pub notifications: Option<NotificationPrefsPayload>,
    pub recurrence: Option<RecurrencePayload>,
}

fn default_category() -> String {
    "general".to_string()
}

impl ActivityPayload {
    fn into_draft(self, default_reminder_minutes: u32) -> ActivityDraft {
        let notifications = match self.notifications {
            Some(p) => NotificationPrefs {
                start: p.start,
                end: p.end,
                reminder_minutes: p.reminder,
            },
            None => NotificationPrefs {
                reminder_minutes: default_reminder_minutes,
                ..NotificationPrefs::default()
            },
        };
        ActivityDraft {
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            category: self.category,
            priority: self.priority.into(),
            notifications,
            recurrence: self.recurrence.map(Recurrence::from),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompletePayload {
    pub completed: bool,
}

/// An activity as returned to the client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub priority: PriorityPayload,
    pub completed: bool,
    pub notifications: NotificationPrefsPayload,
    pub recurrence: Option<RecurrencePayload>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            date: a.date,
            start_time: a.start_time,
            end_time: a.end_time,
            category: a.category,
            priority: a.priority.into(),
            completed: a.completed,
            notifications: NotificationPrefsPayload {
                start: a.notifications.start,
                end: a.notifications.end,
                reminder: a.notifications.reminder_minutes,
            },
            recurrence: a.recurrence.map(RecurrencePayload::from),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// What happened to the activity's reminders during a mutating request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderReport {
    /// One of `scheduled`, `nothingDue`, `permissionDenied`, `facilityError`,
    /// `cancelled`.
    pub status: String,
    /// The slot ids now pending at the facility (empty unless `scheduled`).
    pub scheduled_slot_ids: Vec<i32>,
    /// Present for `facilityError`.
    pub detail: Option<String>,
}

impl ReminderReport {
    fn cancelled() -> Self {
        Self {
            status: "cancelled".to_string(),
            scheduled_slot_ids: Vec::new(),
            detail: None,
        }
    }
}

impl From<ReconcileOutcome> for ReminderReport {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Scheduled { slot_ids } => Self {
                status: "scheduled".to_string(),
                scheduled_slot_ids: slot_ids,
                detail: None,
            },
            ReconcileOutcome::NothingDue => Self {
                status: "nothingDue".to_string(),
                scheduled_slot_ids: Vec::new(),
                detail: None,
            },
            ReconcileOutcome::PermissionDenied => Self {
                status: "permissionDenied".to_string(),
                scheduled_slot_ids: Vec::new(),
                detail: None,
            },
            ReconcileOutcome::FacilityError(detail) => Self {
                status: "facilityError".to_string(),
                scheduled_slot_ids: Vec::new(),
                detail: Some(detail),
            },
        }
    }
}

/// The response payload for mutating activity endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWithRemindersResponse {
    pub activity: ActivityResponse,
    pub reminders: ReminderReport,
}

//=========================================================================================
// Shared Handler Helpers
//=========================================================================================

type HandlerError = (StatusCode, String);

fn user_id_from_headers(headers: &HeaderMap) -> Result<Uuid, HandlerError> {
    let user_id_str = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-user-id header is required".to_string(),
            )
        })?;

    Uuid::parse_str(user_id_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid x-user-id format".to_string(),
        )
    })
}

fn port_error_response(context: &str, e: PortError) -> HandlerError {
    match e {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg),
        other => {
            error!("{}: {:?}", context, other);
            (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the user's activities, ordered by date and start time.
#[utoipa::path(
    get,
    path = "/activities",
    responses(
        (status = 200, description = "The user's activities", body = [ActivityResponse]),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn list_activities_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = user_id_from_headers(&headers)?;

    let activities = app_state
        .db
        .list_activities(user_id)
        .await
        .map_err(|e| port_error_response("Failed to list activities", e))?;

    let response: Vec<ActivityResponse> =
        activities.into_iter().map(ActivityResponse::from).collect();
    Ok(Json(response))
}

/// Create an activity and schedule its local reminders.
#[utoipa::path(
    post,
    path = "/activities",
    request_body = ActivityPayload,
    responses(
        (status = 201, description = "Activity created", body = ActivityWithRemindersResponse),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn create_activity_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ActivityPayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = user_id_from_headers(&headers)?;
    let draft = payload.into_draft(app_state.config.default_reminder_minutes);

    let activity = app_state
        .db
        .create_activity(user_id, &draft)
        .await
        .map_err(|e| port_error_response("Failed to create activity", e))?;

    let outcome = app_state
        .scheduler
        .reconcile(&activity, Local::now().naive_local())
        .await;

    let response = ActivityWithRemindersResponse {
        activity: activity.into(),
        reminders: outcome.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Replace an activity's client-settable fields and reconcile its reminders.
#[utoipa::path(
    put,
    path = "/activities/{id}",
    request_body = ActivityPayload,
    responses(
        (status = 200, description = "Activity updated", body = ActivityWithRemindersResponse),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = String, Path, description = "The activity's identifier."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn update_activity_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<ActivityPayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = user_id_from_headers(&headers)?;
    let draft = payload.into_draft(app_state.config.default_reminder_minutes);

    let activity = app_state
        .db
        .update_activity(&id, user_id, &draft)
        .await
        .map_err(|e| port_error_response("Failed to update activity", e))?;

    let outcome = app_state
        .scheduler
        .reconcile(&activity, Local::now().naive_local())
        .await;

    let response = ActivityWithRemindersResponse {
        activity: activity.into(),
        reminders: outcome.into(),
    };
    Ok(Json(response))
}

/// Set or clear an activity's completed flag.
///
/// Completing an activity cancels its pending reminders; un-completing it
/// reconciles them back in (future fire times only).
#[utoipa::path(
    post,
    path = "/activities/{id}/complete",
    request_body = CompletePayload,
    responses(
        (status = 200, description = "Completion state updated", body = ActivityWithRemindersResponse),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = String, Path, description = "The activity's identifier."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn complete_activity_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<CompletePayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = user_id_from_headers(&headers)?;

    let activity = app_state
        .db
        .set_completed(&id, user_id, payload.completed)
        .await
        .map_err(|e| port_error_response("Failed to update completion state", e))?;

    let reminders = if activity.completed {
        match app_state.scheduler.cancel(&activity.id).await {
            Ok(()) => ReminderReport::cancelled(),
            Err(e) => ReconcileOutcome::FacilityError(e.to_string()).into(),
        }
    } else {
        app_state
            .scheduler
            .reconcile(&activity, Local::now().naive_local())
            .await
            .into()
    };

    let response = ActivityWithRemindersResponse {
        activity: activity.into(),
        reminders,
    };
    Ok(Json(response))
}

/// Delete an activity and cancel its pending reminders.
#[utoipa::path(
    delete,
    path = "/activities/{id}",
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = String, Path, description = "The activity's identifier."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn delete_activity_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = user_id_from_headers(&headers)?;

    // Delete first: the row query is user-filtered, so a caller who merely
    // knows someone else's activity id gets a 404 without ever touching that
    // activity's pending reminders.
    app_state
        .db
        .delete_activity(&id, user_id)
        .await
        .map_err(|e| port_error_response("Failed to delete activity", e))?;

    // A facility hiccup here is non-fatal and already logged by the scheduler.
    let _ = app_state.scheduler.cancel(&id).await;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use async_trait::async_trait;
    use planner_core::ports::{
        ActivityStore, NotificationFacility, PermissionStatus, PortResult, ScheduleRequest,
    };
    use planner_core::scheduler::ReminderScheduler;
    use planner_core::slot_id::all_slot_ids;
    use std::sync::Mutex;
    use tracing::Level;

    //=====================================================================================
    // Test Doubles
    //=====================================================================================

    /// A store holding exactly one activity row, owned by `owner`.
    struct SingleActivityStore {
        owner: Uuid,
        activity_id: String,
    }

    #[async_trait]
    impl ActivityStore for SingleActivityStore {
        async fn list_activities(&self, _user_id: Uuid) -> PortResult<Vec<Activity>> {
            Ok(Vec::new())
        }

        async fn get_activity(&self, id: &str, user_id: Uuid) -> PortResult<Activity> {
            Err(PortError::NotFound(format!(
                "Activity {} not found for {}",
                id, user_id
            )))
        }

        async fn create_activity(
            &self,
            _user_id: Uuid,
            _draft: &ActivityDraft,
        ) -> PortResult<Activity> {
            Err(PortError::Unexpected("not exercised".to_string()))
        }

        async fn update_activity(
            &self,
            _id: &str,
            _user_id: Uuid,
            _draft: &ActivityDraft,
        ) -> PortResult<Activity> {
            Err(PortError::Unexpected("not exercised".to_string()))
        }

        async fn set_completed(
            &self,
            _id: &str,
            _user_id: Uuid,
            _completed: bool,
        ) -> PortResult<Activity> {
            Err(PortError::Unexpected("not exercised".to_string()))
        }

        async fn delete_activity(&self, id: &str, user_id: Uuid) -> PortResult<()> {
            if user_id == self.owner && id == self.activity_id {
                Ok(())
            } else {
                Err(PortError::NotFound(format!("Activity {} not found", id)))
            }
        }
    }

    /// Records facility cancel calls so tests can assert whether (and with
    /// which ids) the scheduler touched the pending set.
    #[derive(Default)]
    struct CancelRecordingFacility {
        cancels: Mutex<Vec<Vec<i32>>>,
    }

    impl CancelRecordingFacility {
        fn cancelled_ids(&self) -> Vec<Vec<i32>> {
            self.cancels.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationFacility for CancelRecordingFacility {
        async fn check_permission(&self) -> PortResult<PermissionStatus> {
            Ok(PermissionStatus::Granted)
        }

        async fn request_permission(&self) -> PortResult<PermissionStatus> {
            Ok(PermissionStatus::Granted)
        }

        async fn schedule(&self, _requests: Vec<ScheduleRequest>) -> PortResult<()> {
            Ok(())
        }

        async fn cancel(&self, slot_ids: &[i32]) -> PortResult<()> {
            self.cancels.lock().unwrap().push(slot_ids.to_vec());
            Ok(())
        }
    }

    fn test_state(
        db: Arc<dyn ActivityStore>,
        facility: Arc<CancelRecordingFacility>,
    ) -> Arc<AppState> {
        Arc::new(AppState {
            db,
            scheduler: ReminderScheduler::new(facility),
            config: Arc::new(Config {
                bind_address: "127.0.0.1:0".parse().unwrap(),
                database_url: String::new(),
                log_level: Level::INFO,
                notifications_enabled: true,
                default_reminder_minutes: 15,
            }),
        })
    }

    fn user_headers(user_id: Uuid) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", user_id.to_string().parse().unwrap());
        headers
    }

    //=====================================================================================
    // Error Mapping
    //=====================================================================================

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let (status, _) = port_error_response(
            "Failed to create activity",
            PortError::Invalid("Invalid activity date 'tomorrow'".to_string()),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let (status, _) = port_error_response(
            "Failed to delete activity",
            PortError::NotFound("Activity x not found".to_string()),
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_map_to_internal_server_error() {
        let (status, _) = port_error_response(
            "Failed to list activities",
            PortError::Unexpected("pool exhausted".to_string()),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    //=====================================================================================
    // Delete Ordering
    //=====================================================================================

    #[tokio::test]
    async fn deleting_someone_elses_activity_never_touches_their_reminders() {
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let activity_id = Uuid::new_v4().to_string();
        let facility = Arc::new(CancelRecordingFacility::default());
        let state = test_state(
            Arc::new(SingleActivityStore {
                owner,
                activity_id: activity_id.clone(),
            }),
            facility.clone(),
        );

        let result = delete_activity_handler(
            State(state),
            user_headers(intruder),
            Path(activity_id),
        )
        .await;

        let (status, _) = result.err().expect("intruder delete must fail");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(facility.cancelled_ids().is_empty());
    }

    #[tokio::test]
    async fn owner_delete_cancels_all_three_reminders() {
        let owner = Uuid::new_v4();
        let activity_id = Uuid::new_v4().to_string();
        let facility = Arc::new(CancelRecordingFacility::default());
        let state = test_state(
            Arc::new(SingleActivityStore {
                owner,
                activity_id: activity_id.clone(),
            }),
            facility.clone(),
        );

        let result = delete_activity_handler(
            State(state),
            user_headers(owner),
            Path(activity_id.clone()),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(
            facility.cancelled_ids(),
            vec![all_slot_ids(&activity_id).to_vec()]
        );
    }

    //=====================================================================================
    // Recurrence Passthrough
    //=====================================================================================

    #[test]
    fn payload_recurrence_survives_into_the_draft() {
        let payload = ActivityPayload {
            title: "Water the plants".to_string(),
            description: None,
            date: "2025-01-10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            category: "home".to_string(),
            priority: PriorityPayload::Low,
            notifications: None,
            recurrence: Some(RecurrencePayload {
                enabled: true,
                pattern: RecurrencePatternPayload::Weekly,
                interval: 2,
                end_date: Some("2025-06-30".to_string()),
            }),
        };

        let draft = payload.into_draft(15);
        let recurrence = draft.recurrence.expect("recurrence must be kept");
        assert!(recurrence.enabled);
        assert_eq!(recurrence.pattern, RecurrencePattern::Weekly);
        assert_eq!(recurrence.interval, 2);
        assert_eq!(recurrence.end_date.as_deref(), Some("2025-06-30"));
    }

    #[test]
    fn activity_recurrence_is_returned_to_the_client() {
        let activity = Activity {
            id: Uuid::new_v4().to_string(),
            user_id: Uuid::new_v4(),
            title: "Water the plants".to_string(),
            description: None,
            date: "2025-01-10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            category: "home".to_string(),
            priority: Priority::Low,
            completed: false,
            notifications: NotificationPrefs::default(),
            recurrence: Some(Recurrence {
                enabled: true,
                pattern: RecurrencePattern::Monthly,
                interval: 1,
                end_date: None,
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = ActivityResponse::from(activity);
        let recurrence = response.recurrence.expect("recurrence must be kept");
        assert!(recurrence.enabled);
        assert!(matches!(
            recurrence.pattern,
            RecurrencePatternPayload::Monthly
        ));
        assert_eq!(recurrence.end_date, None);
    }
}
