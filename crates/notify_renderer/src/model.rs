//! Observable output model backing one rendered cell output.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use notify_contract::MimeBundle;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full contents of a [`MimeModel`] at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MimeModelSnapshot {
    /// Media type to value.
    pub data: MimeBundle,
    /// Output metadata, passed through untouched.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Whether the host trusts this output.
    #[serde(default)]
    pub trusted: bool,
}

impl MimeModelSnapshot {
    /// Snapshot holding only `data`.
    pub fn from_data(data: MimeBundle) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

/// Handle returned by [`MimeModel::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ModelListener = Rc<dyn Fn(&MimeModel)>;

struct MimeModelState {
    snapshot: RefCell<MimeModelSnapshot>,
    listeners: RefCell<Vec<(ListenerId, ModelListener)>>,
    next_listener: Cell<u64>,
    version: Cell<u64>,
}

/// Shared, observable output model.
///
/// Clones are handles to the same model. Contents are only ever replaced wholesale through
/// [`MimeModel::set_data`], which then notifies every listener, including renderers that
/// re-render in response.
#[derive(Clone)]
pub struct MimeModel {
    inner: Rc<MimeModelState>,
}

impl std::fmt::Debug for MimeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimeModel")
            .field("snapshot", &*self.inner.snapshot.borrow())
            .field("version", &self.inner.version.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl MimeModel {
    /// Creates a model holding `snapshot`.
    pub fn new(snapshot: MimeModelSnapshot) -> Self {
        Self {
            inner: Rc::new(MimeModelState {
                snapshot: RefCell::new(snapshot),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                version: Cell::new(0),
            }),
        }
    }

    /// Creates a model holding only `data`.
    pub fn from_data(data: MimeBundle) -> Self {
        Self::new(MimeModelSnapshot::from_data(data))
    }

    /// Deep copy of the current contents. The copy shares nothing with the live model.
    pub fn snapshot(&self) -> MimeModelSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Reads the live data mapping without copying it.
    pub fn with_data<R>(&self, read: impl FnOnce(&MimeBundle) -> R) -> R {
        read(&self.inner.snapshot.borrow().data)
    }

    /// Number of wholesale replacements applied so far.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Replaces the model contents and notifies listeners in registration order.
    pub fn set_data(&self, snapshot: MimeModelSnapshot) {
        *self.inner.snapshot.borrow_mut() = snapshot;
        self.inner.version.set(self.inner.version.get() + 1);

        // Listeners may read the model, replace it again, or (dis)connect.
        let listeners: Vec<ModelListener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(self);
        }
    }

    /// Registers a change listener.
    pub fn connect(&self, listener: impl Fn(&MimeModel) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when it was not registered.
    pub fn disconnect(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}
