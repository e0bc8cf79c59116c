//! Renderer settings loaded from host preferences.

use leptos::logging;
use platform_host::{load_pref_with, NotificationOptions, PrefsStore};
use serde::{Deserialize, Serialize};

/// Preference key holding a JSON-encoded [`NotifyRendererConfig`].
pub const RENDERER_CONFIG_PREF_KEY: &str = "desktop_notify.renderer";

/// Icon shown with every notification unless configured otherwise.
pub const DEFAULT_NOTIFICATION_ICON: &str = "/static/favicons/favicon.ico";

/// Inline text shown when a notification cannot be emitted for lack of permission.
pub const MISSING_PERMISSION_MESSAGE: &str = "Missing permissions - update \"Notifications\" preferences under browser settings to receive notifications";

/// Presentation settings for [`crate::NotifyRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyRendererConfig {
    /// Icon URL or path passed to the platform notification.
    pub icon: String,
    /// Fallback text rendered inline when permission is missing.
    pub missing_permission_message: String,
}

impl Default for NotifyRendererConfig {
    fn default() -> Self {
        Self {
            icon: DEFAULT_NOTIFICATION_ICON.to_string(),
            missing_permission_message: MISSING_PERMISSION_MESSAGE.to_string(),
        }
    }
}

impl NotifyRendererConfig {
    /// Options handed to [`platform_host::NotificationService::emit`].
    pub fn notification_options(&self) -> NotificationOptions {
        NotificationOptions::with_icon(self.icon.clone())
    }
}

/// Loads renderer settings, falling back to defaults when none are stored or they are invalid.
pub async fn load_renderer_config<S: PrefsStore + ?Sized>(prefs: &S) -> NotifyRendererConfig {
    match load_pref_with::<S, NotifyRendererConfig>(prefs, RENDERER_CONFIG_PREF_KEY).await {
        Ok(Some(config)) => config,
        Ok(None) => NotifyRendererConfig::default(),
        Err(err) => {
            logging::warn!("desktop-notify config load failed, using defaults: {err}");
            NotifyRendererConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{save_pref_with, MemoryPrefsStore};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let prefs = MemoryPrefsStore::default();
        let config = block_on(load_renderer_config(&prefs));
        assert_eq!(config, NotifyRendererConfig::default());
        assert_eq!(
            config.notification_options().icon.as_deref(),
            Some(DEFAULT_NOTIFICATION_ICON)
        );
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let prefs = MemoryPrefsStore::default();
        block_on(prefs.save_pref(RENDERER_CONFIG_PREF_KEY, r#"{"icon":"/lab/icon.png"}"#))
            .expect("save");

        let config = block_on(load_renderer_config(&prefs));
        assert_eq!(config.icon, "/lab/icon.png");
        assert_eq!(config.missing_permission_message, MISSING_PERMISSION_MESSAGE);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let prefs = MemoryPrefsStore::default();
        block_on(prefs.save_pref(RENDERER_CONFIG_PREF_KEY, "[]")).expect("save");
        assert_eq!(
            block_on(load_renderer_config(&prefs)),
            NotifyRendererConfig::default()
        );
    }

    #[test]
    fn saved_config_round_trips() {
        let prefs = MemoryPrefsStore::default();
        let config = NotifyRendererConfig {
            icon: "/custom.ico".to_string(),
            missing_permission_message: "Enable notifications".to_string(),
        };
        block_on(save_pref_with(&prefs, RENDERER_CONFIG_PREF_KEY, &config)).expect("save");
        assert_eq!(block_on(load_renderer_config(&prefs)), config);
    }
}
