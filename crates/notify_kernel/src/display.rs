//! Output channel the kernel publishes MIME bundles on.

use std::{cell::RefCell, rc::Rc};

use notify_contract::MimeBundle;

/// Front-end display channel (the kernel's `display` call).
pub trait DisplaySink {
    /// Publishes one MIME bundle as cell output.
    fn display(&self, bundle: MimeBundle);
}

#[derive(Debug, Clone, Default)]
/// Sink that keeps every displayed bundle in memory.
pub struct MemoryDisplaySink {
    bundles: Rc<RefCell<Vec<MimeBundle>>>,
}

impl MemoryDisplaySink {
    /// Bundles displayed so far, oldest first.
    pub fn bundles(&self) -> Vec<MimeBundle> {
        self.bundles.borrow().clone()
    }
}

impl DisplaySink for MemoryDisplaySink {
    fn display(&self, bundle: MimeBundle) {
        self.bundles.borrow_mut().push(bundle);
    }
}
