//! Responsive expand/collapse widget.
//!
//! An [`Expaaand`] binds a trigger element to a target element. Activating
//! the trigger expands the target; siblings sharing a group collapse when
//! another member opens, and breakpoints can disable the behavior (and
//! collapse open instances) below a given viewport width.

pub mod breakpoint;
pub mod error;
pub mod event;
pub mod options;
pub mod utils;
pub mod widget;

pub use breakpoint::{Breakpoint, Breakpoints};
pub use error::ExpaaandError;
pub use event::{END_EVENT, ExpaaandDetail, HIDDEN_EVENT, START_EVENT};
pub use options::{Options, ResolvedOptions};
pub use utils::{ClassTarget, DEFAULT_DEBOUNCE_DELAY, Debounce, debounce, has_class};
pub use widget::Expaaand;

pub mod prelude {
    pub use crate::breakpoint::{Breakpoint, Breakpoints};
    pub use crate::event::ExpaaandDetail;
    pub use crate::options::Options;
    pub use crate::widget::Expaaand;
    pub use expaaand_dom::{Document, Element, Event, Viewport};
}
