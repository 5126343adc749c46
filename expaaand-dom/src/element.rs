use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::event::{Event, Listener, ListenerId, Listeners};

/// Unique identifier for an element handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__el_{}", self.0)
    }
}

#[derive(Debug, Default)]
struct ElementData {
    classes: Vec<String>,
    /// Every attribute except `class`, which lives in `classes`.
    attributes: BTreeMap<String, String>,
}

struct ElementInner {
    id: ElementId,
    tag: String,
    data: RwLock<ElementData>,
    listeners: RwLock<Listeners>,
}

/// A shared handle to a document element.
///
/// Cloning is cheap and yields a handle to the same element; equality is
/// identity, not structural.
#[derive(Clone)]
pub struct Element {
    inner: Arc<ElementInner>,
}

impl Element {
    /// Create a detached element. Use [`crate::Document::create_element`] to
    /// get one that selectors can find.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                id: ElementId::new(),
                tag: tag.into().to_ascii_lowercase(),
                data: RwLock::new(ElementData::default()),
                listeners: RwLock::new(Listeners::default()),
            }),
        }
    }

    pub fn id(&self) -> ElementId {
        self.inner.id
    }

    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Whether both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn data(&self) -> RwLockReadGuard<'_, ElementData> {
        self.inner.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn data_mut(&self) -> RwLockWriteGuard<'_, ElementData> {
        self.inner.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    /// Snapshot of the class list in insertion order.
    pub fn class_list(&self) -> Vec<String> {
        self.data().classes.clone()
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.data().classes.iter().any(|c| c == class)
    }

    /// Add a class. Adding a class that is already present does nothing.
    pub fn add_class(&self, class: &str) {
        let mut data = self.data_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    /// Remove a class. Removing an absent class does nothing.
    pub fn remove_class(&self, class: &str) {
        self.data_mut().classes.retain(|c| c != class);
    }

    /// The raw `class` attribute value.
    pub fn class_name(&self) -> String {
        self.data().classes.join(" ")
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let data = self.data();
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set an attribute. Setting `class` replaces the whole class list.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut data = self.data_mut();
        if name == "class" {
            data.classes.clear();
            for token in value.split_ascii_whitespace() {
                if !data.classes.iter().any(|c| c == token) {
                    data.classes.push(token.to_string());
                }
            }
        } else {
            data.attributes.insert(name.to_string(), value);
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        let mut data = self.data_mut();
        if name == "class" {
            data.classes.clear();
        } else {
            data.attributes.remove(name);
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::add_class`].
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn add_event_listener(&self, kind: &str, listener: Listener) -> ListenerId {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(kind, listener)
    }

    /// Remove a listener. Returns false if it was not registered here.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: &str) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .count(kind)
    }

    /// Invoke every listener registered for the event's type.
    ///
    /// The listener table is snapshotted first, so listeners are free to
    /// touch this element, including its listeners.
    pub fn dispatch_event(&self, event: &Event) {
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .matching(event.kind());
        log::trace!(
            "dispatch {} on <{}> {} to {} listener(s)",
            event.kind(),
            self.tag(),
            self.id(),
            listeners.len()
        );
        for listener in listeners {
            listener(event);
        }
    }

    /// Dispatch a `click` event and return it, so callers can inspect
    /// `default_prevented`.
    pub fn click(&self) -> Event {
        let event = Event::new("click");
        self.dispatch_event(&event);
        event
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("Element")
            .field("id", &self.inner.id)
            .field("tag", &self.inner.tag)
            .field("classes", &data.classes)
            .field("attributes", &data.attributes)
            .finish()
    }
}
