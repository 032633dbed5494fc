//! Scheduler layer for the bot
//!
//! This layer drives the poll cycle: fetch, validate, format, notify,
//! sleep. It owns all state that lives across cycles.

pub mod poller;

pub use poller::StatusPoller;
