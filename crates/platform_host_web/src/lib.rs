//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for notifications, alert dialogs,
//! event-loop scheduling, DOM render surfaces, and localStorage preferences. Native builds
//! compile the same types with inert bodies so dependent crates stay testable off-browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod dialog;
pub mod notifications;
pub mod scheduler;
pub mod storage;
pub mod surface;

pub use adapters::{
    alert_service, build_host_services, host_capabilities, host_strategy_name,
    notification_service, prefs_store, selected_host_strategy, task_scheduler,
    AlertServiceAdapter, NotificationServiceAdapter, PrefsStoreAdapter, TaskSchedulerAdapter,
};
pub use dialog::WebAlertService;
pub use notifications::WebNotificationService;
pub use scheduler::WebTaskScheduler;
pub use storage::local_prefs::WebPrefsStore;
pub use surface::WebRenderSurface;
