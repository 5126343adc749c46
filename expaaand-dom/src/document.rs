use std::sync::{Arc, PoisonError, RwLock};

use crate::element::Element;
use crate::selector::{Selector, SelectorError};
use crate::window::{Viewport, Window};

struct DocumentInner {
    body: Element,
    window: Window,
    /// Connected elements in document order. `body` is always first.
    elements: RwLock<Vec<Element>>,
}

/// A document: the body element, the window and the set of connected
/// elements that selector lookups search.
#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

impl Document {
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        let body = Element::new("body");
        Self {
            inner: Arc::new(DocumentInner {
                body: body.clone(),
                window: Window::new(viewport),
                elements: RwLock::new(vec![body]),
            }),
        }
    }

    pub fn body(&self) -> &Element {
        &self.inner.body
    }

    pub fn window(&self) -> &Window {
        &self.inner.window
    }

    /// Create an element and connect it at the end of the document.
    pub fn create_element(&self, tag: &str) -> Element {
        let element = Element::new(tag);
        self.append(element.clone());
        element
    }

    /// Connect an element created elsewhere. Appending a connected element
    /// does nothing.
    pub fn append(&self, element: Element) {
        let mut elements = self
            .inner
            .elements
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !elements.iter().any(|e| e.ptr_eq(&element)) {
            elements.push(element);
        }
    }

    /// Disconnect an element. The body cannot be removed.
    pub fn remove(&self, element: &Element) -> bool {
        if element.ptr_eq(&self.inner.body) {
            return false;
        }
        let mut elements = self
            .inner
            .elements
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = elements.len();
        elements.retain(|e| !e.ptr_eq(element));
        elements.len() != before
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.elements().iter().any(|e| e.ptr_eq(element))
    }

    /// Snapshot of connected elements in document order.
    pub fn elements(&self) -> Vec<Element> {
        self.inner
            .elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// First connected element matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.elements().into_iter().find(|e| selector.matches(e)))
    }

    /// Every connected element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .elements()
            .into_iter()
            .filter(|e| selector.matches(e))
            .collect())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
