use std::time::{Duration, Instant};

use serde_json::json;

use crate::models::{
    NotificationInput, NotificationKind, NotificationPreferences, NotificationRecord,
    PreferencesPatch, unix_timestamp_ms,
};
use crate::push::{NoopPushService, PushService};
use crate::toast::{Toast, ToastAction};

/// The whole in-memory notification state. Mutated only through
/// [`reduce`]; external callers go through [`NotificationCenter`].
#[derive(Debug, Default)]
pub struct NotificationState {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: u32,
    pub toasts: Vec<Toast>,
    pub preferences: NotificationPreferences,
}

#[derive(Debug)]
pub enum NotificationAction {
    Add(NotificationRecord),
    MarkAsRead(u64),
    MarkAllAsRead,
    Clear,
    PushToast(Toast),
    DismissToast(u64),
    ExpireToasts(Instant),
    SetPreferences(NotificationPreferences),
}

/// Pure transition function. No clocks, no id generation, no push calls;
/// those side effects live in [`NotificationCenter`].
pub fn reduce(mut state: NotificationState, action: NotificationAction) -> NotificationState {
    match action {
        NotificationAction::Add(record) => {
            if !record.read {
                state.unread_count += 1;
            }
            state.notifications.insert(0, record);
        }
        NotificationAction::MarkAsRead(id) => {
            if let Some(record) = state.notifications.iter_mut().find(|n| n.id == id) {
                if !record.read {
                    record.read = true;
                    state.unread_count = state.unread_count.saturating_sub(1);
                }
            }
        }
        NotificationAction::MarkAllAsRead => {
            for record in &mut state.notifications {
                record.read = true;
            }
            state.unread_count = 0;
        }
        NotificationAction::Clear => {
            state.notifications.clear();
            state.unread_count = 0;
        }
        NotificationAction::PushToast(toast) => {
            state.toasts.push(toast);
        }
        NotificationAction::DismissToast(id) => {
            state.toasts.retain(|toast| toast.id != id);
        }
        NotificationAction::ExpireToasts(now) => {
            state.toasts.retain(|toast| !toast.is_expired(now));
        }
        NotificationAction::SetPreferences(preferences) => {
            state.preferences = preferences;
        }
    }
    state
}

/// Owns the notification state plus everything the reducer must not touch:
/// id counters, the clock, the window-visibility flag, and the push
/// boundary. One instance per app window; create a fresh one per test.
pub struct NotificationCenter {
    state: NotificationState,
    push: Box<dyn PushService>,
    visible: bool,
    next_notification_id: u64,
    next_toast_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_push_service(Box::new(NoopPushService))
    }

    pub fn with_push_service(push: Box<dyn PushService>) -> Self {
        Self {
            state: NotificationState::default(),
            push,
            visible: true,
            next_notification_id: 1,
            next_toast_id: 1,
        }
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.state.notifications
    }

    pub fn unread_count(&self) -> u32 {
        self.state.unread_count
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.state.toasts
    }

    pub fn preferences(&self) -> &NotificationPreferences {
        &self.state.preferences
    }

    /// Whether the app window is currently visible to the user. Push
    /// dispatch only happens while hidden; a toast in a hidden window would
    /// go unseen anyway.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Records the notification (prepended, unread), then derives a toast
    /// when toasts are enabled and attempts a push when push is enabled and
    /// the window is hidden. Push failure is logged, never returned.
    /// Returns the record's id.
    pub fn add_notification(&mut self, input: NotificationInput) -> u64 {
        let id = match input.id {
            Some(id) => {
                self.next_notification_id = self.next_notification_id.max(id + 1);
                id
            }
            None => self.next_notification_id(),
        };

        let record = NotificationRecord {
            id,
            kind: input.kind,
            title: input.title.clone(),
            message: input.message.clone(),
            data: input.data,
            read: false,
            created_at: unix_timestamp_ms(),
            icon: input.icon.clone(),
        };
        self.dispatch(NotificationAction::Add(record));

        if self.state.preferences.show_toasts {
            let toast = Toast::new(self.next_toast_id(), input.kind, input.message.clone())
                .with_title(input.title.clone());
            self.dispatch(NotificationAction::PushToast(toast));
        }

        if self.state.preferences.push_enabled && !self.visible {
            let options = json!({
                "body": input.message,
                "icon": input.icon,
                "tag": id,
            });
            if let Err(err) = self.push.show_notification(&input.title, &options) {
                log::warn!("push dispatch for notification {id} failed: {err}");
            }
        }

        id
    }

    pub fn mark_as_read(&mut self, id: u64) {
        self.dispatch(NotificationAction::MarkAsRead(id));
    }

    pub fn mark_all_as_read(&mut self) {
        self.dispatch(NotificationAction::MarkAllAsRead);
    }

    /// Removes every record. Cleared records are gone for good; a later
    /// mark call cannot resurrect them.
    pub fn clear_notifications(&mut self) {
        self.dispatch(NotificationAction::Clear);
    }

    /// Raises a toast with no backing notification record.
    pub fn raise_toast(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.raise_toast_with(kind, message, None, None)
    }

    pub fn raise_toast_with(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Option<Duration>,
        action: Option<ToastAction>,
    ) -> u64 {
        let id = self.next_toast_id();
        let mut toast = Toast::new(id, kind, message);
        if let Some(duration) = duration {
            toast = toast.with_duration(duration);
        }
        if let Some(action) = action {
            toast = toast.with_action(action);
        }
        self.dispatch(NotificationAction::PushToast(toast));
        id
    }

    /// Drops every toast whose duration has elapsed. A UI host calls this
    /// once per frame; see `expire_toasts` for an injectable clock.
    pub fn tick_toasts(&mut self) {
        self.expire_toasts(Instant::now());
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.dispatch(NotificationAction::ExpireToasts(now));
    }

    /// Explicit user dismissal; cancels the pending expiry by removing the
    /// toast immediately.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.dispatch(NotificationAction::DismissToast(id));
    }

    /// Runs the toast's action handler if it has one, then removes the
    /// toast no matter what the handler returned. A handler error is
    /// logged and swallowed.
    pub fn click_toast(&mut self, id: u64) {
        if let Some(toast) = self.state.toasts.iter_mut().find(|t| t.id == id) {
            if let Some(action) = toast.action.as_mut() {
                if let Err(err) = (action.handler)() {
                    log::warn!("toast action '{}' failed: {err}", action.label);
                }
            }
        }
        self.dismiss_toast(id);
    }

    /// Merges the patch into the current preferences. Flipping
    /// `push_enabled` off-to-on attempts a best-effort subscription; a
    /// failed subscribe leaves push disabled. On-to-off attempts teardown.
    pub fn update_preferences(&mut self, patch: PreferencesPatch) {
        let was_enabled = self.state.preferences.push_enabled;
        let mut next = self.state.preferences.clone();
        next.apply(patch);

        if !was_enabled && next.push_enabled {
            if let Err(err) = self.push.subscribe() {
                log::warn!("push subscription failed, leaving push disabled: {err}");
                next.push_enabled = false;
            }
        } else if was_enabled && !next.push_enabled {
            if let Err(err) = self.push.unsubscribe() {
                log::warn!("push unsubscribe failed: {err}");
            }
        }

        self.dispatch(NotificationAction::SetPreferences(next));
    }

    fn dispatch(&mut self, action: NotificationAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    fn next_notification_id(&mut self) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        id
    }

    fn next_toast_id(&mut self) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        id
    }
}
