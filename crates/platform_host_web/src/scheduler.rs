//! Browser event-loop scheduler: zero-delay timers and `spawn_local`.

use futures::future::LocalBoxFuture;
use platform_host::{DeferredTask, TaskScheduler};

fn dropped_task_warning(reason: &str) -> String {
    format!("deferred task dropped: {reason}")
}

fn warn_dropped(reason: &str) {
    let message = dropped_task_warning(reason);

    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&message));
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{message}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler that defers through `setTimeout(.., 0)` and spawns on the wasm-bindgen executor.
pub struct WebTaskScheduler;

impl TaskScheduler for WebTaskScheduler {
    fn defer(&self, task: DeferredTask) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let Some(window) = web_sys::window() else {
                warn_dropped("no window");
                return;
            };
            let callback = Closure::once_into_js(move || task());
            if let Err(err) = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
            {
                warn_dropped(&format!("setTimeout failed: {err:?}"));
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            warn_dropped("no browser event loop");
            drop(task);
        }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(future);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(future);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn dropped_task_warning_names_the_reason() {
        assert_eq!(
            dropped_task_warning("no window"),
            "deferred task dropped: no window"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_defer_drops_the_task_without_running_it() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        WebTaskScheduler.defer(Box::new(move || flag.set(true)));
        assert!(!ran.get());
    }
}
