use std::fmt;
use std::time::{Duration, Instant};

use crate::models::NotificationKind;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Optional click handler on a toast. The pipeline runs it once on click,
/// logs a failure, and removes the toast regardless of the outcome.
pub struct ToastAction {
    pub label: String,
    pub handler: Box<dyn FnMut() -> anyhow::Result<()> + Send>,
}

impl ToastAction {
    pub fn new(
        label: impl Into<String>,
        handler: impl FnMut() -> anyhow::Result<()> + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            handler: Box::new(handler),
        }
    }
}

/// An ephemeral, auto-expiring alert. Never persisted; its lifecycle is
/// independent of any notification record it was derived from.
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    pub duration: Duration,
    pub action: Option<ToastAction>,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(id: u64, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: None,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
            action: None,
            created_at: Instant::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn expires_at(&self) -> Instant {
        self.created_at + self.duration
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("duration", &self.duration)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_relative_to_creation() {
        let toast =
            Toast::new(1, NotificationKind::System, "maintenance tonight")
                .with_duration(Duration::from_millis(100));

        let now = toast.created_at;
        assert!(!toast.is_expired(now));
        assert!(!toast.is_expired(now + Duration::from_millis(99)));
        assert!(toast.is_expired(now + Duration::from_millis(100)));
        assert!(toast.is_expired(now + Duration::from_secs(10)));
    }

    #[test]
    fn defaults_apply() {
        let toast = Toast::new(7, NotificationKind::Message, "Hi");
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);
        assert!(toast.title.is_none());
        assert!(toast.action.is_none());
    }
}
