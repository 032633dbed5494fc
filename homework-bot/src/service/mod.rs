//! Service layer
//!
//! Services hold the bot's behavior on top of the repositories. Trait
//! based so the poller can be driven by test doubles.

mod notifier;

pub use notifier::Notifier;
pub use notifier::TelegramNotifier;
