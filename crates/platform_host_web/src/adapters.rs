use std::rc::Rc;

use futures::future::LocalBoxFuture;
use platform_host::{
    AlertService, DeferredTask, HostCapabilities, HostServices, HostStrategy, NoopAlertService,
    NoopNotificationService, NoopPrefsStore, NotificationFuture, NotificationOptions,
    NotificationPermission, NotificationService, PrefsStore, PrefsStoreFuture, TaskScheduler,
};

use crate::{WebAlertService, WebNotificationService, WebPrefsStore, WebTaskScheduler};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::DesktopStub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Capability posture of the compile-time selected host strategy.
pub const fn host_capabilities() -> HostCapabilities {
    match selected_host_strategy() {
        HostStrategy::DesktopStub => HostCapabilities::desktop_stub(),
        HostStrategy::Browser | HostStrategy::Headless => HostCapabilities::browser(),
    }
}

/// Adapter enum that erases the concrete notification backend behind [`NotificationService`].
#[derive(Debug, Clone, Copy)]
pub enum NotificationServiceAdapter {
    /// Browser Notification API-backed delivery.
    Browser(WebNotificationService),
    /// No-op fallback used when the host is intentionally stubbed.
    DesktopStub(NoopNotificationService),
}

impl NotificationService for NotificationServiceAdapter {
    fn permission(&self) -> NotificationPermission {
        match self {
            Self::Browser(service) => service.permission(),
            Self::DesktopStub(service) => service.permission(),
        }
    }

    fn request_permission(
        &self,
    ) -> NotificationFuture<'static, Result<NotificationPermission, String>> {
        match self {
            Self::Browser(service) => service.request_permission(),
            Self::DesktopStub(service) => service.request_permission(),
        }
    }

    fn emit(&self, title: &str, options: &NotificationOptions) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.emit(title, options),
            Self::DesktopStub(service) => service.emit(title, options),
        }
    }
}

/// Adapter enum that erases the concrete alert backend behind [`AlertService`].
#[derive(Debug, Clone, Copy)]
pub enum AlertServiceAdapter {
    /// `window.alert`-backed dialogs.
    Browser(WebAlertService),
    /// No-op fallback used when the host is intentionally stubbed.
    DesktopStub(NoopAlertService),
}

impl AlertService for AlertServiceAdapter {
    fn alert(&self, message: &str) {
        match self {
            Self::Browser(service) => service.alert(message),
            Self::DesktopStub(service) => service.alert(message),
        }
    }
}

/// Adapter enum that erases the concrete preference backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser localStorage-backed preferences.
    Browser(WebPrefsStore),
    /// No-op fallback used when the host is intentionally stubbed.
    DesktopStub(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::DesktopStub(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::DesktopStub(store) => store.save_pref(key, raw_json),
        }
    }
}

/// Scheduler adapter. Both strategies run on the browser event loop.
#[derive(Debug, Clone, Copy)]
pub enum TaskSchedulerAdapter {
    /// `setTimeout`/`spawn_local`-backed scheduling.
    Browser(WebTaskScheduler),
}

impl TaskScheduler for TaskSchedulerAdapter {
    fn defer(&self, task: DeferredTask) {
        match self {
            Self::Browser(scheduler) => scheduler.defer(task),
        }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        match self {
            Self::Browser(scheduler) => scheduler.spawn(future),
        }
    }
}

/// Builds the notification adapter for the compile-time selected host strategy.
pub fn notification_service() -> NotificationServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::DesktopStub => {
            NotificationServiceAdapter::DesktopStub(NoopNotificationService)
        }
        HostStrategy::Browser | HostStrategy::Headless => {
            NotificationServiceAdapter::Browser(WebNotificationService)
        }
    }
}

/// Builds the alert adapter for the compile-time selected host strategy.
pub fn alert_service() -> AlertServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::DesktopStub => AlertServiceAdapter::DesktopStub(NoopAlertService),
        HostStrategy::Browser | HostStrategy::Headless => {
            AlertServiceAdapter::Browser(WebAlertService)
        }
    }
}

/// Builds the preference adapter for the compile-time selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::DesktopStub => PrefsStoreAdapter::DesktopStub(NoopPrefsStore),
        HostStrategy::Browser | HostStrategy::Headless => PrefsStoreAdapter::Browser(WebPrefsStore),
    }
}

/// Builds the scheduler adapter.
pub fn task_scheduler() -> TaskSchedulerAdapter {
    TaskSchedulerAdapter::Browser(WebTaskScheduler)
}

/// Composes the full service bundle for the compile-time selected host strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        notifications: Rc::new(notification_service()),
        alerts: Rc::new(alert_service()),
        scheduler: Rc::new(task_scheduler()),
        prefs: Rc::new(prefs_store()),
        capabilities: host_capabilities(),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_selects_browser_adapters() {
        let services = build_host_services();
        if cfg!(feature = "desktop-host-stub") {
            assert_eq!(services.host_strategy, HostStrategy::DesktopStub);
            assert_eq!(host_strategy_name(), "desktop-stub");
        } else {
            assert_eq!(services.host_strategy, HostStrategy::Browser);
            assert_eq!(host_strategy_name(), "browser");
            assert!(matches!(
                notification_service(),
                NotificationServiceAdapter::Browser(_)
            ));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_read_notifications_as_denied() {
        assert_eq!(
            notification_service().permission(),
            NotificationPermission::Denied
        );
        assert!(notification_service()
            .emit("title", &NotificationOptions::default())
            .is_ok());
    }
}
