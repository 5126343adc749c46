use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Callback registered with `add_event_listener`.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// An event dispatched to element or window listeners.
///
/// Custom events carry a type-erased `detail` payload. Listeners recover the
/// concrete type with [`Event::detail`].
#[derive(Clone)]
pub struct Event {
    kind: String,
    detail: Option<Arc<dyn Any + Send + Sync>>,
    default_prevented: Arc<AtomicBool>,
}

impl Event {
    /// Create a plain event of the given type (`"click"`, `"resize"`, ...).
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: None,
            default_prevented: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a custom event carrying `detail`.
    pub fn custom<T: Any + Send + Sync>(kind: impl Into<String>, detail: T) -> Self {
        Self {
            kind: kind.into(),
            detail: Some(Arc::new(detail)),
            default_prevented: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Downcast the detail payload. Returns `None` for plain events or a
    /// payload of another type.
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("has_detail", &self.detail.is_some())
            .field("default_prevented", &self.default_prevented())
            .finish()
    }
}

/// Listener table shared by elements and the window.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<(ListenerId, String, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, kind: &str, listener: Listener) -> ListenerId {
        let id = ListenerId::next();
        self.entries.push((id, kind.to_string(), listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Snapshot of the listeners for `kind`, in registration order.
    pub(crate) fn matching(&self, kind: &str) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|(_, k, _)| k == kind)
            .map(|(_, _, l)| Arc::clone(l))
            .collect()
    }

    pub(crate) fn count(&self, kind: &str) -> usize {
        self.entries.iter().filter(|(_, k, _)| k == kind).count()
    }
}
