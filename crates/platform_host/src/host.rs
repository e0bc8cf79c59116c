//! Shared host-bundle and capability models for browser and headless composition.

use std::rc::Rc;

use crate::{
    AlertService, ManualTaskScheduler, MemoryAlertService, MemoryNotificationService,
    MemoryPrefsStore, NotificationService, PrefsStore, TaskScheduler,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed composition over the Web Notifications API.
    Browser,
    /// Composition with placeholder/no-op adapters.
    DesktopStub,
    /// In-memory adapters driven explicitly by the embedder (tests, headless kernels).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopStub => "desktop-stub",
            Self::Headless => "headless",
        }
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available and may be used.
    Available,
    /// Capability is not implemented or not supported on the active host.
    Unavailable,
    /// Capability exists but remains disabled until explicit host/user activation.
    RequiresUserActivation,
}

/// Typed error describing capability-level rejection before a host operation executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host does not support the requested capability.
    Unavailable {
        /// Stable capability identifier used in diagnostics.
        capability: &'static str,
    },
    /// The capability requires an explicit user activation or permission grant first.
    RequiresUserActivation {
        /// Stable capability identifier used in diagnostics.
        capability: &'static str,
    },
}

impl std::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { capability } => write!(f, "capability unavailable: {capability}"),
            Self::RequiresUserActivation { capability } => {
                write!(f, "capability requires user activation: {capability}")
            }
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Host capability snapshot exposed to renderer wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Platform notification availability.
    pub notifications: CapabilityStatus,
    /// Blocking alert dialog availability.
    pub alerts: CapabilityStatus,
    /// Durable preference storage availability.
    pub prefs: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser-default capability posture. Notifications need a permission grant first.
    pub const fn browser() -> Self {
        Self {
            notifications: CapabilityStatus::RequiresUserActivation,
            alerts: CapabilityStatus::Available,
            prefs: CapabilityStatus::Available,
        }
    }

    /// Stub capability posture.
    pub const fn desktop_stub() -> Self {
        Self {
            notifications: CapabilityStatus::Unavailable,
            alerts: CapabilityStatus::Unavailable,
            prefs: CapabilityStatus::Unavailable,
        }
    }

    /// Headless posture where every in-memory adapter is usable.
    pub const fn headless() -> Self {
        Self {
            notifications: CapabilityStatus::Available,
            alerts: CapabilityStatus::Available,
            prefs: CapabilityStatus::Available,
        }
    }
}

/// Runtime-selected host service bundle injected into renderers.
///
/// Environment-specific adapter selection happens before this bundle reaches a renderer, which
/// keeps renderer crates free of browser APIs.
#[derive(Clone)]
pub struct HostServices {
    /// Platform notification service.
    pub notifications: Rc<dyn NotificationService>,
    /// Blocking alert service used for user-facing error reports.
    pub alerts: Rc<dyn AlertService>,
    /// Event-loop scheduler for deferred callbacks and spawned futures.
    pub scheduler: Rc<dyn TaskScheduler>,
    /// Lightweight typed preference store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Host availability snapshot for optional capability domains.
    pub capabilities: HostCapabilities,
    /// Stable strategy identifier for diagnostics and policy.
    pub host_strategy: HostStrategy,
}

/// Concrete handles to the in-memory adapters behind a headless [`HostServices`] bundle.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Recording notification service.
    pub notifications: MemoryNotificationService,
    /// Recording alert service.
    pub alerts: MemoryAlertService,
    /// Explicitly-driven scheduler.
    pub scheduler: ManualTaskScheduler,
    /// In-memory preference store.
    pub prefs: MemoryPrefsStore,
}

impl HeadlessHost {
    /// Builds a service bundle sharing state with these handles.
    pub fn services(&self) -> HostServices {
        HostServices {
            notifications: Rc::new(self.notifications.clone()),
            alerts: Rc::new(self.alerts.clone()),
            scheduler: Rc::new(self.scheduler.clone()),
            prefs: Rc::new(self.prefs.clone()),
            capabilities: HostCapabilities::headless(),
            host_strategy: HostStrategy::Headless,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationPermission;

    #[test]
    fn headless_services_share_state_with_handles() {
        let host = HeadlessHost::default();
        let services = host.services();

        host.notifications
            .set_permission(NotificationPermission::Granted);
        assert_eq!(
            services.notifications.permission(),
            NotificationPermission::Granted
        );

        services.alerts.alert("hello");
        assert_eq!(host.alerts.messages(), vec!["hello"]);

        services.scheduler.defer(Box::new(|| {}));
        assert_eq!(host.scheduler.pending_tasks(), 1);
        assert_eq!(services.host_strategy.as_str(), "headless");
    }

    #[test]
    fn capability_errors_render_their_label() {
        let err = CapabilityError::Unavailable {
            capability: "notifications",
        };
        assert_eq!(err.to_string(), "capability unavailable: notifications");
        assert_eq!(
            HostCapabilities::browser().notifications,
            CapabilityStatus::RequiresUserActivation
        );
    }
}
