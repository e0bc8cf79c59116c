//! Notify renderer: turns one desktop-notify record into at most one platform notification.
//!
//! Every render runs to completion synchronously. The only asynchronous work is the permission
//! request, which is spawned and never awaited, and the processed-flag write-back, which is
//! deferred to the next scheduler turn. Writing back synchronously would notify the model's
//! listeners, this renderer among them, before the current render returns.

use std::rc::Rc;

use leptos::logging;
use notify_contract::{
    decode_record, is_processed, mark_processed, NotificationKind, NotificationRecord,
};
use platform_host::{
    CapabilityStatus, HostServices, NotificationPermission, RenderSurface, SurfaceBlock,
};

use crate::{
    config::NotifyRendererConfig,
    model::{ListenerId, MimeModel},
    RenderError,
};

/// Element id of the inline block shown when a record cannot be decoded.
pub const DECODE_ERROR_BLOCK_ID: &str = "desktop-notify-error";

/// What one call to [`NotifyRenderer::render_model`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// The record was already processed and nothing else happened.
    pub skipped: bool,
    /// A permission request was started.
    pub permission_requested: bool,
    /// A platform notification was emitted.
    pub notified: bool,
    /// The missing-permission block replaced the surface contents.
    pub fallback_shown: bool,
    /// A processed-flag write-back was queued.
    pub write_back_scheduled: bool,
}

impl RenderOutcome {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Mime renderer for `application/desktop-notify+json` outputs.
pub struct NotifyRenderer {
    mime_type: String,
    services: HostServices,
    surface: Rc<dyn RenderSurface>,
    config: NotifyRendererConfig,
}

impl std::fmt::Debug for NotifyRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyRenderer")
            .field("mime_type", &self.mime_type)
            .field("host_strategy", &self.services.host_strategy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotifyRenderer {
    /// Creates a renderer reading records stored under `mime_type`.
    pub fn new(
        mime_type: impl Into<String>,
        services: HostServices,
        surface: Rc<dyn RenderSurface>,
        config: NotifyRendererConfig,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            services,
            surface,
            config,
        }
    }

    /// Media type this renderer reads.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Active presentation settings.
    pub fn config(&self) -> &NotifyRendererConfig {
        &self.config
    }

    /// Renders the record held by `model`.
    ///
    /// Returns as soon as the write-back is queued; it never waits for the permission request
    /// or for the write-back itself.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Contract`] when the model holds no record or a malformed one. In
    /// that case an inline error block is shown and nothing else happens. A record already
    /// flagged processed is skipped before it is validated.
    pub fn render_model(&self, model: &MimeModel) -> Result<RenderOutcome, RenderError> {
        if model.with_data(|data| is_processed(data, &self.mime_type)) {
            return Ok(RenderOutcome::skipped());
        }

        let record = match model.with_data(|data| decode_record(data, &self.mime_type)) {
            Ok(record) => record,
            Err(err) => {
                logging::warn!("desktop-notify render rejected output: {err}");
                self.surface.replace_with(SurfaceBlock::new(
                    DECODE_ERROR_BLOCK_ID,
                    format!("Unable to render desktop notification: {err}"),
                ));
                return Err(err.into());
            }
        };

        let mut outcome = RenderOutcome::default();
        // Hosts without a notification API never prompt and always fall back inline.
        let supported = self.services.capabilities.notifications != CapabilityStatus::Unavailable;
        let permission = self.services.notifications.permission();
        if supported && should_request_permission(record.kind, permission) {
            self.request_permission();
            outcome.permission_requested = true;
        }

        if record.kind == NotificationKind::Notify {
            if supported && permission.is_granted() {
                outcome.notified = self.emit(&record);
            } else {
                self.surface.replace_with(SurfaceBlock::new(
                    record.id.clone(),
                    self.config.missing_permission_message.clone(),
                ));
                outcome.fallback_shown = true;
            }
        }

        self.schedule_write_back(model)?;
        outcome.write_back_scheduled = true;
        Ok(outcome)
    }

    /// Re-renders whenever `model` is replaced. Returns the listener handle.
    pub fn attach(self: &Rc<Self>, model: &MimeModel) -> ListenerId {
        let renderer = Rc::clone(self);
        model.connect(move |model| {
            if let Err(err) = renderer.render_model(model) {
                logging::error!("desktop-notify re-render failed: {err}");
            }
        })
    }

    fn request_permission(&self) {
        let request = self.services.notifications.request_permission();
        let alerts = (self.services.capabilities.alerts != CapabilityStatus::Unavailable)
            .then(|| self.services.alerts.clone());
        self.services.scheduler.spawn(Box::pin(async move {
            match request.await {
                Ok(permission) => {
                    logging::log!("desktop notification permission is `{permission}`");
                }
                Err(err) => {
                    let message = format!(
                        "Encountered error - {err} while requesting permissions for notebook notifications"
                    );
                    match alerts {
                        Some(alerts) => alerts.alert(&message),
                        None => logging::error!("{message}"),
                    }
                }
            }
        }));
    }

    fn emit(&self, record: &NotificationRecord) -> bool {
        let title = record.title().unwrap_or_default();
        match self
            .services
            .notifications
            .emit(title, &self.config.notification_options())
        {
            Ok(()) => true,
            Err(err) => {
                logging::error!("desktop notification `{}` failed: {err}", record.id);
                false
            }
        }
    }

    fn schedule_write_back(&self, model: &MimeModel) -> Result<(), RenderError> {
        let mut updated = model.snapshot();
        mark_processed(&mut updated.data, &self.mime_type)?;

        let target = model.clone();
        self.services
            .scheduler
            .defer(Box::new(move || target.set_data(updated)));
        Ok(())
    }
}

/// Permission is requested for a first-time handshake on an undecided host, and otherwise
/// whenever it has not been granted.
pub fn should_request_permission(
    kind: NotificationKind,
    permission: NotificationPermission,
) -> bool {
    (kind == NotificationKind::Init && permission == NotificationPermission::Default)
        || permission != NotificationPermission::Granted
}
