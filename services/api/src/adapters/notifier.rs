//! services/api/src/adapters/notifier.rs
//!
//! This module contains the local notifier adapter, the concrete implementation
//! of the `NotificationFacility` port from the `core` crate. It keeps an
//! in-process table of pending timers (one tokio task per slot id) and emits
//! the notification as a structured tracing event when the timer elapses.
//!
//! It stands in for a platform notification center (OS or browser); the port
//! is the seam where a real one would plug in. The scheduling semantics the
//! core relies on hold here too: scheduling an id that is already pending
//! replaces it, and cancelling an unknown id is a no-op.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Local;
use planner_core::ports::{
    NotificationFacility, PermissionStatus, PortResult, ScheduleRequest,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

struct PendingTimer {
    /// Distinguishes a timer from its replacement under the same slot id, so
    /// a finished task only ever removes its own entry.
    generation: u64,
    token: CancellationToken,
}

/// An adapter that implements the `NotificationFacility` port with in-process
/// tokio timers.
#[derive(Clone)]
pub struct LocalNotifierAdapter {
    enabled: bool,
    pending: Arc<Mutex<HashMap<i32, PendingTimer>>>,
    next_generation: Arc<AtomicU64>,
}

impl LocalNotifierAdapter {
    /// Creates a new `LocalNotifierAdapter`. `enabled` models the platform
    /// permission: when false, the facility reports `Denied` and the core
    /// skips scheduling.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of timers currently pending. Used by tests.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn permission(&self) -> PermissionStatus {
        if self.enabled {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    /// Registers a token for `slot_id`, cancelling any timer already pending
    /// under the same id.
    fn arm(&self, slot_id: i32) -> (u64, CancellationToken) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let timer = PendingTimer {
            generation,
            token: token.clone(),
        };
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.insert(slot_id, timer) {
            previous.token.cancel();
        }
        (generation, token)
    }

    /// Removes the entry for `slot_id`, but only if it still belongs to the
    /// task calling in; a replacement armed meanwhile must survive.
    fn disarm(&self, slot_id: i32, generation: u64) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.get(&slot_id).is_some_and(|t| t.generation == generation) {
            pending.remove(&slot_id);
        }
    }
}

#[async_trait]
impl NotificationFacility for LocalNotifierAdapter {
    async fn check_permission(&self) -> PortResult<PermissionStatus> {
        Ok(self.permission())
    }

    async fn request_permission(&self) -> PortResult<PermissionStatus> {
        // No interactive prompt exists in-process; report the configured state.
        Ok(self.permission())
    }

    async fn schedule(&self, requests: Vec<ScheduleRequest>) -> PortResult<()> {
        let now = Local::now().naive_local();
        for request in requests {
            let Ok(delay) = (request.fire_at - now).to_std() else {
                // Already elapsed between planning and scheduling; drop it.
                debug!(slot_id = request.slot_id, "skipping past-due schedule request");
                continue;
            };

            let (generation, token) = self.arm(request.slot_id);
            let adapter = self.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(slot_id = request.slot_id, "pending reminder cancelled");
                    }
                    _ = tokio::time::sleep(delay) => {
                        info!(
                            slot_id = request.slot_id,
                            activity_id = %request.activity_id,
                            kind = request.kind.as_str(),
                            title = %request.title,
                            body = %request.body,
                            "reminder fired"
                        );
                    }
                }
                adapter.disarm(request.slot_id, generation);
            });
        }
        Ok(())
    }

    async fn cancel(&self, slot_ids: &[i32]) -> PortResult<()> {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        for slot_id in slot_ids {
            if let Some(timer) = pending.get(slot_id) {
                timer.token.cancel();
            }
        }
        Ok(())
    }
}
