use thiserror::Error;

/// Failures at the push boundary. All of them are best-effort from the
/// callers' point of view: logged, never propagated past the managers.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("push permission denied")]
    PermissionDenied,
    #[error("push service unavailable: {0}")]
    Unavailable(String),
    #[error("push dispatch failed: {0}")]
    Dispatch(String),
}

/// Boundary to a platform push-notification service. The payload format
/// behind `options` is owned by the service and opaque to this crate.
///
/// A real implementation (service worker, APNs, FCM, ...) is out of scope;
/// [`NoopPushService`] matches the current shipped behavior.
pub trait PushService: Send {
    fn subscribe(&mut self) -> Result<(), PushError>;

    fn unsubscribe(&mut self) -> Result<(), PushError>;

    fn show_notification(
        &mut self,
        title: &str,
        options: &serde_json::Value,
    ) -> Result<(), PushError>;
}

/// Accepts every call and delivers nothing.
#[derive(Debug, Default)]
pub struct NoopPushService;

impl PushService for NoopPushService {
    fn subscribe(&mut self) -> Result<(), PushError> {
        log::debug!("push subscribe requested (noop)");
        Ok(())
    }

    fn unsubscribe(&mut self) -> Result<(), PushError> {
        log::debug!("push unsubscribe requested (noop)");
        Ok(())
    }

    fn show_notification(
        &mut self,
        title: &str,
        _options: &serde_json::Value,
    ) -> Result<(), PushError> {
        log::debug!("push notification '{title}' dropped (noop)");
        Ok(())
    }
}
