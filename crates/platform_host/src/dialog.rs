//! Blocking user-alert host-service contracts.

use std::{cell::RefCell, rc::Rc};

/// Host service for blocking, user-acknowledged alert dialogs.
pub trait AlertService {
    /// Shows `message` and returns once the host has presented it.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op alert service for unsupported targets.
pub struct NoopAlertService;

impl AlertService for NoopAlertService {
    fn alert(&self, _message: &str) {}
}

#[derive(Debug, Clone, Default)]
/// Alert service that records every message for later inspection.
pub struct MemoryAlertService {
    messages: Rc<RefCell<Vec<String>>>,
}

impl MemoryAlertService {
    /// Messages shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl AlertService for MemoryAlertService {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_alerts_are_shared_between_clones() {
        let alerts = MemoryAlertService::default();
        let handle: Rc<dyn AlertService> = Rc::new(alerts.clone());
        handle.alert("first");
        handle.alert("second");
        assert_eq!(alerts.messages(), vec!["first", "second"]);
    }
}
