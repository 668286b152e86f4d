//! Notification dispatch module
//!
//! Workflows publish through [`NotificationPort`]. In production the port is a
//! [`NotificationDispatcher`] that queues messages on a bounded channel and
//! hands them to the real publisher from a background task.

mod dispatcher;
mod traits;


pub use dispatcher::NotificationDispatcher;
pub use traits::NotificationPort;
