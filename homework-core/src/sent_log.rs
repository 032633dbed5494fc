//! Dedup log of delivered messages
//!
//! Lives only as long as the process: a restart forgets everything and the
//! current status will be announced once more.

/// Ordered record of messages already delivered
///
/// Unbounded unless created with [`SentMessageLog::bounded`], in which case
/// the oldest entries are evicted first. Only the newest submission is
/// looked at per cycle, so a limit of 1 is enough to suppress repeats of
/// an unchanged status.
#[derive(Debug, Clone, Default)]
pub struct SentMessageLog {
    messages: Vec<String>,
    limit: Option<usize>,
}

impl SentMessageLog {
    /// Creates a log that keeps every message for the process lifetime
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a log that keeps at most `limit` messages (minimum 1)
    pub fn bounded(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit: Some(limit.max(1)),
        }
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// Records a delivered message; duplicates are not stored twice
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.contains(&message) {
            return;
        }
        self.messages.push(message);

        if let Some(limit) = self.limit {
            let overflow = self.messages.len().saturating_sub(limit);
            self.messages.drain(..overflow);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in delivery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}
