//! Notification-domain contracts, permission models, and lightweight test adapters.

mod service;

pub use service::{
    EmittedNotification, MemoryNotificationService, NoopNotificationService, NotificationFuture,
    NotificationOptions, NotificationPermission, NotificationService,
};
