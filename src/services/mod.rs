//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the booking workflow and the dashboard read models so
//! route handlers can stay focused on locking and protocol translation.

pub mod booking;
pub mod dashboard;
pub mod resolver;
pub mod sessions;
pub mod tracker;
