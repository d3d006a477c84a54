pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// will build the web server router.
pub use rest::{
    complete_activity_handler, create_activity_handler, delete_activity_handler,
    list_activities_handler, update_activity_handler,
};
