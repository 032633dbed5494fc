//! Status poller
//!
//! Polls the review API on a fixed interval, turns the newest submission
//! into a message, and notifies the user once per distinct message.
//!
//! Every stage returns an explicit error; [`StatusPoller::run`] is the one
//! place that logs failures and decides what happens next (always: sleep
//! and try again).

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use homework_client::ClientError;
use homework_core::{
    FormatError, SentMessageLog, ValidationError, format_status, latest_record, validate,
};
use thiserror::Error;
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::repository::StatusRepository;
use crate::service::Notifier;

/// What a successful cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response listed no submissions
    NoUpdates,
    /// The newest status was already announced
    Unchanged,
    /// A new message was handed to the notifier
    Notified(String),
}

/// Why a cycle stopped early
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to fetch homework statuses: {0}")]
    Fetch(#[from] ClientError),

    #[error("unexpected API response: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot build status message: {0}")]
    Format(#[from] FormatError),

    #[error("unexpected failure: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

/// Poll loop controller
///
/// Owns the query window and the dedup log; nothing else holds state.
/// Failure reports are deduplicated separately from status messages so
/// they never evict a status from a bounded log.
pub struct StatusPoller {
    repository: Arc<dyn StatusRepository>,
    notifier: Arc<dyn Notifier>,
    retry_interval: Duration,
    notify_on_error: bool,
    /// Start of the next query window (Unix seconds)
    window: i64,
    sent: SentMessageLog,
    /// Last failure text sent to the chat
    last_error: Option<String>,
}

impl StatusPoller {
    /// Creates a new poller whose window starts now
    pub fn new(
        config: &Config,
        repository: Arc<dyn StatusRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let sent = match config.dedup_history_limit {
            Some(limit) => SentMessageLog::bounded(limit),
            None => SentMessageLog::unbounded(),
        };

        Self {
            repository,
            notifier,
            retry_interval: config.retry_interval,
            notify_on_error: config.notify_on_error,
            window: chrono::Utc::now().timestamp(),
            sent,
            last_error: None,
        }
    }

    /// Current start of the query window
    pub fn window(&self) -> i64 {
        self.window
    }

    /// Starts the polling loop
    ///
    /// Never returns; the process is stopped from outside.
    pub async fn run(&mut self) {
        info!(
            "Starting status poller (interval: {:?}, window: {})",
            self.retry_interval, self.window
        );

        loop {
            self.run_cycle().await;

            debug!(
                window = self.window(),
                "Cycle finished, sleeping {:?}", self.retry_interval
            );
            time::sleep(self.retry_interval).await;
        }
    }

    /// Runs one cycle and applies the error policy
    ///
    /// Panics inside the cycle are caught and treated like any other
    /// unexpected failure.
    pub async fn run_cycle(&mut self) {
        let result = AssertUnwindSafe(self.poll_once())
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(CycleError::Unexpected(anyhow::anyhow!(
                    "poll cycle panicked: {}",
                    panic_message(panic.as_ref())
                )))
            });

        if result.is_ok() {
            self.last_error = None;
        }

        match result {
            Ok(CycleOutcome::NoUpdates) => debug!("No status changes in this window"),
            Ok(CycleOutcome::Unchanged) => debug!("Status unchanged, notification skipped"),
            Ok(CycleOutcome::Notified(message)) => {
                info!(sent_total = self.sent.len(), "Status change announced: {}", message)
            }
            Err(e) => self.report_error(e).await,
        }
    }

    /// Performs a single poll cycle
    ///
    /// The window only moves forward when the response was usable.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let reach_back = i64::try_from(self.retry_interval.as_secs()).unwrap_or(i64::MAX);
        let from_date = self.window.saturating_sub(reach_back);

        debug!("Polling homework statuses from {}", from_date);

        let response = self.repository.fetch_statuses(from_date).await?;
        let entries = validate(&response)?;

        let Some(latest) = latest_record(&entries)? else {
            self.advance_window(response.current_date());
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = format_status(&latest)?;
        if latest.homework_name.is_none() {
            warn!(status = %latest.status, "Homework record has no homework_name");
        }

        let outcome = if self.sent.contains(&message) {
            CycleOutcome::Unchanged
        } else {
            self.notifier.notify(&message).await;
            self.sent.record(message.clone());
            CycleOutcome::Notified(message)
        };

        self.advance_window(response.current_date());
        Ok(outcome)
    }

    fn advance_window(&mut self, current_date: Option<i64>) {
        match current_date {
            Some(date) => self.window = date,
            None => warn!(
                "Response has no current_date, keeping window at {}",
                self.window
            ),
        }
    }

    /// Logs a cycle failure and optionally forwards it to the chat
    async fn report_error(&mut self, err: CycleError) {
        match &err {
            CycleError::Fetch(e) if e.is_transport() => warn!("API unreachable: {}", err),
            _ => error!("Program failure: {}", err),
        }

        if !self.notify_on_error {
            return;
        }

        let message = format!("Program failure: {}", err);
        if self.last_error.as_deref() == Some(message.as_str()) {
            return;
        }
        self.notifier.notify(&message).await;
        self.last_error = Some(message);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
