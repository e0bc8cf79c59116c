//! Notification service contracts, permission state, and in-memory/no-op adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Tri-state user consent for platform notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// The user has not decided yet; a request may prompt them.
    #[default]
    Default,
    /// Notifications may be shown.
    Granted,
    /// The user refused notifications.
    Denied,
}

impl NotificationPermission {
    /// Returns the platform token for this permission state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }

    /// Parses a platform permission token, treating unknown tokens as undecided.
    pub fn from_token(raw: &str) -> Self {
        match raw {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Default,
        }
    }

    /// Returns whether notifications may be emitted right now.
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl std::fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation options forwarded to the platform notification constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    /// Icon URL or path shown next to the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NotificationOptions {
    /// Options carrying only an icon.
    pub fn with_icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
        }
    }
}

/// Host service for platform (desktop) notifications.
pub trait NotificationService {
    /// Returns the current permission state without prompting.
    fn permission(&self) -> NotificationPermission;

    /// Asks the platform for notification permission.
    ///
    /// The request starts when this method is called. The returned future does not borrow the
    /// service and resolves to the permission state chosen by the user, or an error string when
    /// the platform rejects the request.
    fn request_permission(
        &self,
    ) -> NotificationFuture<'static, Result<NotificationPermission, String>>;

    /// Shows a notification. Construction is fire-and-forget; only synchronous dispatch
    /// failures are reported.
    fn emit(&self, title: &str, options: &NotificationOptions) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets. Permission always reads as denied.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Denied
    }

    fn request_permission(
        &self,
    ) -> NotificationFuture<'static, Result<NotificationPermission, String>> {
        Box::pin(async { Ok(NotificationPermission::Denied) })
    }

    fn emit(&self, _title: &str, _options: &NotificationOptions) -> Result<(), String> {
        Ok(())
    }
}

/// One notification recorded by [`MemoryNotificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedNotification {
    /// Title passed to [`NotificationService::emit`].
    pub title: String,
    /// Options passed to [`NotificationService::emit`].
    pub options: NotificationOptions,
}

#[derive(Debug)]
struct MemoryNotificationState {
    permission: NotificationPermission,
    request_outcome: Result<NotificationPermission, String>,
    permission_requests: usize,
    emitted: Vec<EmittedNotification>,
    emit_error: Option<String>,
}

#[derive(Debug, Clone)]
/// Recording notification service for headless hosts and tests.
///
/// Permission requests resolve to a configurable outcome; a successful outcome also updates
/// the stored permission, mirroring how browsers persist the user's choice.
pub struct MemoryNotificationService {
    inner: Rc<RefCell<MemoryNotificationState>>,
}

impl Default for MemoryNotificationService {
    fn default() -> Self {
        Self::with_permission(NotificationPermission::Default)
    }
}

impl MemoryNotificationService {
    /// Creates a service whose current permission is `permission` and whose requests keep it.
    pub fn with_permission(permission: NotificationPermission) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryNotificationState {
                permission,
                request_outcome: Ok(permission),
                permission_requests: 0,
                emitted: Vec::new(),
                emit_error: None,
            })),
        }
    }

    /// Overrides the current permission state.
    pub fn set_permission(&self, permission: NotificationPermission) {
        self.inner.borrow_mut().permission = permission;
    }

    /// Sets what subsequent permission requests resolve to.
    pub fn set_request_outcome(&self, outcome: Result<NotificationPermission, String>) {
        self.inner.borrow_mut().request_outcome = outcome;
    }

    /// Makes subsequent [`NotificationService::emit`] calls fail with `message`.
    pub fn fail_emits(&self, message: impl Into<String>) {
        self.inner.borrow_mut().emit_error = Some(message.into());
    }

    /// Number of permission requests started so far.
    pub fn permission_requests(&self) -> usize {
        self.inner.borrow().permission_requests
    }

    /// Notifications emitted so far, oldest first.
    pub fn emitted(&self) -> Vec<EmittedNotification> {
        self.inner.borrow().emitted.clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn permission(&self) -> NotificationPermission {
        self.inner.borrow().permission
    }

    fn request_permission(
        &self,
    ) -> NotificationFuture<'static, Result<NotificationPermission, String>> {
        self.inner.borrow_mut().permission_requests += 1;
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut state = inner.borrow_mut();
            let outcome = state.request_outcome.clone();
            if let Ok(permission) = &outcome {
                state.permission = *permission;
            }
            outcome
        })
    }

    fn emit(&self, title: &str, options: &NotificationOptions) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(err) = state.emit_error.clone() {
            return Err(err);
        }
        state.emitted.push(EmittedNotification {
            title: title.to_string(),
            options: options.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn permission_tokens_round_trip_through_serde_and_parsing() {
        for permission in [
            NotificationPermission::Default,
            NotificationPermission::Granted,
            NotificationPermission::Denied,
        ] {
            let json = serde_json::to_string(&permission).expect("serialize");
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
            assert_eq!(NotificationPermission::from_token(permission.as_str()), permission);
        }
        assert_eq!(
            NotificationPermission::from_token("prompt"),
            NotificationPermission::Default
        );
    }

    #[test]
    fn memory_service_counts_requests_before_they_resolve() {
        let service = MemoryNotificationService::default();
        service.set_request_outcome(Ok(NotificationPermission::Granted));

        let pending = service.request_permission();
        assert_eq!(service.permission_requests(), 1);
        assert_eq!(service.permission(), NotificationPermission::Default);

        assert_eq!(block_on(pending), Ok(NotificationPermission::Granted));
        assert_eq!(service.permission(), NotificationPermission::Granted);
    }

    #[test]
    fn memory_service_rejected_request_keeps_permission() {
        let service = MemoryNotificationService::with_permission(NotificationPermission::Denied);
        service.set_request_outcome(Err("blocked by policy".to_string()));

        let outcome = block_on(service.request_permission());
        assert_eq!(outcome, Err("blocked by policy".to_string()));
        assert_eq!(service.permission(), NotificationPermission::Denied);
    }

    #[test]
    fn memory_service_records_emits_and_can_fail_them() {
        let service = MemoryNotificationService::with_permission(NotificationPermission::Granted);
        service
            .emit("Build finished", &NotificationOptions::with_icon("/icon.ico"))
            .expect("emit");
        assert_eq!(
            service.emitted(),
            vec![EmittedNotification {
                title: "Build finished".to_string(),
                options: NotificationOptions::with_icon("/icon.ico"),
            }]
        );

        service.fail_emits("no Notification constructor");
        assert!(service.emit("again", &NotificationOptions::default()).is_err());
        assert_eq!(service.emitted().len(), 1);
    }

    #[test]
    fn noop_service_reads_as_denied() {
        let service = NoopNotificationService;
        assert_eq!(service.permission(), NotificationPermission::Denied);
        assert_eq!(
            block_on(service.request_permission()),
            Ok(NotificationPermission::Denied)
        );
        assert!(service.emit("x", &NotificationOptions::default()).is_ok());
    }
}
