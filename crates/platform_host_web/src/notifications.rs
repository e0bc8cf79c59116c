//! Notification host-service adapter over the Web Notifications API.

use platform_host::{
    NotificationFuture, NotificationOptions, NotificationPermission, NotificationService,
};

#[cfg(target_arch = "wasm32")]
use platform_host::CapabilityError;

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by `window.Notification`.
pub struct WebNotificationService;

#[cfg(target_arch = "wasm32")]
fn notification_api_available() -> bool {
    web_sys::window()
        .map(|window| {
            js_sys::Reflect::has(&window, &wasm_bindgen::JsValue::from_str("Notification"))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
fn unavailable() -> String {
    CapabilityError::Unavailable {
        capability: "notifications",
    }
    .to_string()
}

impl NotificationService for WebNotificationService {
    fn permission(&self) -> NotificationPermission {
        #[cfg(target_arch = "wasm32")]
        {
            if !notification_api_available() {
                return NotificationPermission::Denied;
            }
            match web_sys::Notification::permission() {
                web_sys::NotificationPermission::Granted => NotificationPermission::Granted,
                web_sys::NotificationPermission::Denied => NotificationPermission::Denied,
                _ => NotificationPermission::Default,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            NotificationPermission::Denied
        }
    }

    fn request_permission(
        &self,
    ) -> NotificationFuture<'static, Result<NotificationPermission, String>> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;

            if !notification_api_available() {
                return Box::pin(async { Err(unavailable()) });
            }
            // The browser prompt starts here; the future only observes the promise.
            let promise = web_sys::Notification::request_permission();
            Box::pin(async move {
                let promise = promise.map_err(|err: JsValue| format!("{err:?}"))?;
                let choice = wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map_err(|err| err.as_string().unwrap_or_else(|| format!("{err:?}")))?;
                Ok(NotificationPermission::from_token(
                    &choice.as_string().unwrap_or_default(),
                ))
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Box::pin(async { Ok(NotificationPermission::Denied) })
        }
    }

    fn emit(&self, title: &str, options: &NotificationOptions) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;

            if !notification_api_available() {
                return Err(unavailable());
            }
            let web_options = web_sys::NotificationOptions::new();
            if let Some(icon) = options.icon.as_deref() {
                web_options.set_icon(icon);
            }
            web_sys::Notification::new_with_options(title, &web_options)
                .map(|_| ())
                .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (title, options);
            Ok(())
        }
    }
}
