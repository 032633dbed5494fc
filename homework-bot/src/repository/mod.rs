//! Repository layer
//!
//! Repositories abstract communication with the two remote services.
//! They are thin, stateless wrappers around the HTTP clients with no
//! business logic, so the poller can be tested against in-memory fakes.

mod messages;
mod statuses;

// Re-export traits
pub use messages::MessageRepository;
pub use statuses::StatusRepository;
