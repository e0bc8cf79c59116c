//! `window.alert` adapter.

use platform_host::AlertService;

#[derive(Debug, Clone, Copy, Default)]
/// Browser alert adapter backed by `window.alert`.
pub struct WebAlertService;

impl AlertService for WebAlertService {
    fn alert(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = message;
        }
    }
}
