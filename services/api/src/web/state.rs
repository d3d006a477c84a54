//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use planner_core::ports::ActivityStore;
use planner_core::scheduler::ReminderScheduler;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn ActivityStore>,
    pub scheduler: ReminderScheduler,
    pub config: Arc<Config>,
}
