//! Typed host-domain contracts shared by notification renderers and browser adapters.
//!
//! This crate is the API-first boundary for platform services: notifications and their
//! permission state, blocking alerts, event-loop scheduling, renderer surfaces, and preference
//! storage. Concrete browser adapters live in `platform_host_web`; the no-op and in-memory
//! adapters here back stub builds and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dialog;
pub mod host;
pub mod notifications;
pub mod scheduler;
pub mod storage;
pub mod surface;
pub mod time;

pub use dialog::{AlertService, MemoryAlertService, NoopAlertService};
pub use host::{
    CapabilityError, CapabilityStatus, HeadlessHost, HostCapabilities, HostServices, HostStrategy,
};
pub use notifications::{
    EmittedNotification, MemoryNotificationService, NoopNotificationService, NotificationFuture,
    NotificationOptions, NotificationPermission, NotificationService,
};
pub use scheduler::{DeferredTask, ManualTaskScheduler, TaskScheduler};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
pub use surface::{MemoryRenderSurface, NoopRenderSurface, RenderSurface, SurfaceBlock};
pub use time::{elapsed_ms, unix_time_ms_now};
