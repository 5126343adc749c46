//! Minimal document model the expand/collapse widget runs against.
//!
//! Elements, the window and the document are cheap-to-clone shared handles,
//! so listeners can capture them and be invoked from any thread (the debounce
//! timer fires on the tokio runtime).

pub mod document;
pub mod element;
pub mod event;
pub mod selector;
pub mod window;

pub use document::Document;
pub use element::{Element, ElementId};
pub use event::{Event, Listener, ListenerId};
pub use selector::{Selector, SelectorError};
pub use window::{Viewport, Window};
