use std::sync::{Arc, PoisonError, RwLock};

use crate::event::{Event, Listener, ListenerId, Listeners};

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

struct WindowInner {
    viewport: RwLock<Viewport>,
    listeners: RwLock<Listeners>,
}

/// The browsing window: viewport size plus `resize` listeners.
#[derive(Clone)]
pub struct Window {
    inner: Arc<WindowInner>,
}

impl Window {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Arc::new(WindowInner {
                viewport: RwLock::new(viewport),
                listeners: RwLock::new(Listeners::default()),
            }),
        }
    }

    pub fn viewport(&self) -> Viewport {
        *self
            .inner
            .viewport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn inner_width(&self) -> u32 {
        self.viewport().width
    }

    pub fn inner_height(&self) -> u32 {
        self.viewport().height
    }

    /// Change the viewport size and dispatch `resize` to window listeners.
    pub fn resize(&self, width: u32, height: u32) {
        *self
            .inner
            .viewport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Viewport { width, height };
        log::debug!("window resized to {}x{}", width, height);
        self.dispatch_event(&Event::new("resize"));
    }

    pub fn add_event_listener(&self, kind: &str, listener: Listener) -> ListenerId {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(kind, listener)
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .count(kind)
    }

    pub fn dispatch_event(&self, event: &Event) {
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .matching(event.kind());
        for listener in listeners {
            listener(event);
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
