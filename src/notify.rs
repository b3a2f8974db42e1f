//! Flash notifications with automatic expiry.

use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Default lifetime of a flash notification
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✖",
            NotificationKind::Warning => "!",
            NotificationKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of live flash messages, newest last
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    items: Vec<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, items: Vec::new() }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Error | NotificationKind::Warning => warn!(message = %message, "notification"),
            _ => info!(message = %message, "notification"),
        }
        self.items.push(Notification { message, kind, expires_at: now + self.ttl });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Error, now);
    }

    pub fn warning(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Warning, now);
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Info, now);
    }

    /// Drop expired notifications. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        self.items.len() != before
    }

    /// Close the newest notification
    pub fn dismiss_latest(&mut self) -> Option<Notification> {
        self.items.pop()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
