//! The expand/collapse widget instance.
//!
//! An instance is bound to one trigger element and moves between two states:
//! collapsed (initial) and expanded. Expanding adds the active class to the
//! trigger and target, adds the body class, and sets `aria-expanded="true"`
//! on the trigger; collapsing reverses all of it.
//!
//! Instances never reference each other. Before every expand the instance
//! fires [`START_EVENT`] on the document body; every other expanded instance
//! in the same group collapses when it sees it.
//!
//! # Example
//!
//! ```
//! use expaaand::prelude::*;
//!
//! let doc = Document::new();
//! let menu = doc.create_element("nav").with_attribute("id", "menu");
//! let button = doc.create_element("button").with_attribute("data-expaaand", "#menu");
//!
//! let widget = Expaaand::new(button.clone(), &doc, Options::new());
//! button.click();
//! assert!(widget.is_active());
//! assert!(menu.contains_class("is-active"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use expaaand_dom::{Document, Element, Event, Listener, ListenerId};

use crate::breakpoint::Breakpoint;
use crate::event::{END_EVENT, ExpaaandDetail, HIDDEN_EVENT, START_EVENT};
use crate::options::{Options, ResolvedOptions, TARGET_ATTR};
use crate::utils::{DEFAULT_DEBOUNCE_DELAY, Debounce, debounce, has_class};

#[derive(Debug)]
struct WidgetState {
    is_active: bool,
    is_initialised: bool,
    /// Index into the configured breakpoints. `None` only when the sequence
    /// is empty.
    breakpoint: Option<usize>,
}

/// A listener this instance registered, kept so `destroy` can remove it.
enum Registration {
    Element(Element, ListenerId),
    Window(ListenerId),
}

struct ExpaaandInner {
    document: Document,
    trigger_elm: Element,
    options: ResolvedOptions,
    state: RwLock<WidgetState>,
    registrations: Mutex<Vec<Registration>>,
    debounced_on_resize: Debounce<()>,
}

/// A responsive expand/collapse widget bound to one trigger element.
///
/// Cheap to clone; clones share state. Listeners registered on the trigger,
/// window, body and close element only hold weak references: the widget
/// stays attached while a handle to it exists and detaches itself when the
/// last handle is dropped.
///
/// Handles may be used from any thread. The debounced resize check runs on a
/// runtime worker; each transition checks and flips the active flag under one
/// lock, so concurrent collapses fire [`HIDDEN_EVENT`] once.
#[derive(Clone)]
pub struct Expaaand {
    inner: Arc<ExpaaandInner>,
}

impl Expaaand {
    /// Bind a widget to `trigger`.
    ///
    /// If no target element resolves, a warning is logged and the instance
    /// stays uninitialised: no listeners are attached and every operation
    /// is a no-op.
    pub fn new(trigger: Element, document: &Document, options: Options) -> Self {
        let options = ResolvedOptions::resolve(&trigger, document, options);
        let initial = (!options.breakpoints.is_empty()).then_some(0);

        let inner = Arc::new_cyclic(|weak: &Weak<ExpaaandInner>| {
            let weak = weak.clone();
            ExpaaandInner {
                document: document.clone(),
                trigger_elm: trigger,
                options,
                state: RwLock::new(WidgetState {
                    is_active: false,
                    is_initialised: false,
                    breakpoint: initial,
                }),
                registrations: Mutex::new(Vec::new()),
                debounced_on_resize: debounce(
                    move |()| {
                        if let Some(inner) = weak.upgrade() {
                            Expaaand { inner }.resize();
                        }
                    },
                    DEFAULT_DEBOUNCE_DELAY,
                ),
            }
        });

        let widget = Self { inner };
        widget.init();
        widget
    }

    /// Create an instance for every connected element carrying a
    /// `data-expaaand` attribute, in document order.
    pub fn attach_all(document: &Document, options: Options) -> Vec<Self> {
        document
            .query_selector_all(&format!("[{TARGET_ATTR}]"))
            .unwrap_or_default()
            .into_iter()
            .map(|trigger| Self::new(trigger, document, options.clone()))
            .collect()
    }

    fn init(&self) {
        if self.inner.options.target_elm.is_none() {
            log::warn!(
                "Expaaand target element not found for trigger {}",
                self.inner.trigger_elm.id()
            );
            return;
        }

        self.check_responsive();
        self.events();
        self.state_mut().is_initialised = true;
        self.check_active();
    }

    fn state(&self) -> RwLockReadGuard<'_, WidgetState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, WidgetState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the active flag to `active`. Returns false, changing nothing, if
    /// the instance is uninitialised or already in that state.
    fn transition(&self, active: bool) -> bool {
        let mut state = self.state_mut();
        if !state.is_initialised || state.is_active == active {
            return false;
        }
        state.is_active = active;
        true
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.state().is_active
    }

    pub fn is_initialised(&self) -> bool {
        self.state().is_initialised
    }

    pub fn group(&self) -> &str {
        &self.inner.options.group
    }

    pub fn body_class(&self) -> &str {
        &self.inner.options.body_class
    }

    pub fn enable_toggle(&self) -> bool {
        self.inner.options.enable_toggle
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.inner.options
    }

    pub fn trigger_elm(&self) -> &Element {
        &self.inner.trigger_elm
    }

    pub fn target_elm(&self) -> Option<&Element> {
        self.inner.options.target_elm.as_ref()
    }

    pub fn close_elm(&self) -> Option<&Element> {
        self.inner.options.close_elm.as_ref()
    }

    /// The current breakpoint, `None` if no breakpoints are configured.
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        let index = self.state().breakpoint?;
        self.inner.options.breakpoints.get(index).cloned()
    }

    // -------------------------------------------------------------------------
    // Breakpoints
    // -------------------------------------------------------------------------

    /// Make the breakpoint at `index` current. Setting the current breakpoint
    /// again, or an index out of range, does nothing.
    pub fn set_breakpoint(&self, index: usize) {
        let Some(next) = self.inner.options.breakpoints.get(index) else {
            return;
        };
        let mut state = self.state_mut();
        if state.breakpoint != Some(index) {
            log::debug!(
                "{}: breakpoint -> {} ({}px, active: {})",
                self.inner.trigger_elm.id(),
                next.name,
                next.size,
                next.active
            );
            state.breakpoint = Some(index);
        }
    }

    /// Re-resolve the current breakpoint from the viewport width and report
    /// whether expand/collapse behavior is enabled there.
    ///
    /// If no breakpoint fits the width the previous one stays current. With
    /// no breakpoints at all the behavior is always enabled.
    pub fn check_responsive(&self) -> bool {
        let width = self.inner.document.window().inner_width();
        if let Some(index) = self.inner.options.breakpoints.resolve(width) {
            self.set_breakpoint(index);
        }
        self.breakpoint().is_none_or(|bp| bp.active)
    }

    /// Expand on startup if the trigger already carries the active class and
    /// the current breakpoint allows it. Returns whether it expanded.
    pub fn check_active(&self) -> bool {
        if !self.is_initialised() {
            return false;
        }
        let marked = match has_class(&self.inner.trigger_elm, &self.inner.options.active_class) {
            Ok(marked) => marked,
            Err(e) => {
                log::warn!("cannot check active class: {e}");
                false
            }
        };
        if marked && self.check_responsive() {
            self.show(None);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Expand, or collapse when already expanded and toggling is enabled.
    ///
    /// [`START_EVENT`] fires before the transition and [`END_EVENT`] after,
    /// even when nothing changes.
    pub fn expand(&self, evt: Option<&Event>) {
        if let Some(evt) = evt {
            evt.prevent_default();
        }
        if !self.is_initialised() {
            return;
        }

        self.fire_event(START_EVENT, BTreeMap::new());

        if self.transition(true) {
            self.apply_expanded();
        } else if self.enable_toggle() && self.transition(false) {
            self.apply_collapsed();
        }

        self.fire_event(END_EVENT, BTreeMap::new());
    }

    /// Apply the expanded state. Fires no notifications.
    pub fn show(&self, evt: Option<&Event>) {
        if let Some(evt) = evt {
            evt.prevent_default();
        }
        let mut state = self.state_mut();
        if !state.is_initialised {
            return;
        }
        state.is_active = true;
        drop(state);
        self.apply_expanded();
    }

    /// Apply the collapsed state and fire [`HIDDEN_EVENT`].
    pub fn hide(&self, evt: Option<&Event>) {
        if let Some(evt) = evt {
            evt.prevent_default();
        }
        let mut state = self.state_mut();
        if !state.is_initialised {
            return;
        }
        state.is_active = false;
        drop(state);
        self.apply_collapsed();
    }

    fn apply_expanded(&self) {
        let Some(target) = &self.inner.options.target_elm else {
            return;
        };
        let active_class = &self.inner.options.active_class;
        self.inner.trigger_elm.add_class(active_class);
        target.add_class(active_class);
        self.inner
            .document
            .body()
            .add_class(&self.inner.options.body_class);
        self.inner.trigger_elm.set_attribute("aria-expanded", "true");

        log::debug!("{}: expanded (group {})", self.inner.trigger_elm.id(), self.group());
    }

    fn apply_collapsed(&self) {
        let Some(target) = &self.inner.options.target_elm else {
            return;
        };
        let active_class = &self.inner.options.active_class;
        self.inner.trigger_elm.remove_class(active_class);
        target.remove_class(active_class);
        self.inner
            .document
            .body()
            .remove_class(&self.inner.options.body_class);
        self.inner.trigger_elm.set_attribute("aria-expanded", "false");

        log::debug!("{}: collapsed (group {})", self.inner.trigger_elm.id(), self.group());

        self.fire_event(HIDDEN_EVENT, BTreeMap::new());
    }

    /// Collapse when another instance in the same group starts expanding.
    pub fn broadcast(&self, evt: &Event) {
        let Some(detail) = evt.detail::<ExpaaandDetail>() else {
            return;
        };
        if !detail.trigger_elm.ptr_eq(&self.inner.trigger_elm)
            && detail.group == self.inner.options.group
            && self.transition(false)
        {
            log::debug!(
                "{}: collapsing for {} in group {}",
                self.inner.trigger_elm.id(),
                detail.trigger_elm.id(),
                detail.group
            );
            self.apply_collapsed();
        }
    }

    /// Collapse if the viewport moved into a breakpoint that disables the
    /// behavior. Never expands.
    pub fn resize(&self) {
        if !self.check_responsive() && self.transition(false) {
            self.apply_collapsed();
        }
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Fire a custom notification on the body. `overrides` are merged over
    /// the default detail.
    pub fn notify(&self, name: &str, overrides: BTreeMap<String, String>) {
        self.fire_event(name, overrides);
    }

    fn fire_event(&self, name: &str, overrides: BTreeMap<String, String>) {
        let detail = ExpaaandDetail {
            group: self.inner.options.group.clone(),
            is_active: self.is_active(),
            target_elm: self.inner.options.target_elm.clone(),
            trigger_elm: self.inner.trigger_elm.clone(),
            extra: BTreeMap::new(),
        }
        .with_overrides(overrides);

        self.inner
            .document
            .body()
            .dispatch_event(&Event::custom(name, detail));
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Wrap `action` in a listener that does not keep the instance alive.
    fn listener(&self, action: fn(&Expaaand, &Event)) -> Listener {
        let weak = Arc::downgrade(&self.inner);
        Arc::new(move |evt: &Event| {
            if let Some(inner) = weak.upgrade() {
                action(&Expaaand { inner }, evt);
            }
        })
    }

    fn events(&self) {
        let mut registrations = Vec::new();

        let id = self.inner.trigger_elm.add_event_listener(
            "click",
            self.listener(|widget, evt| widget.expand(Some(evt))),
        );
        registrations.push(Registration::Element(self.inner.trigger_elm.clone(), id));

        let debounced = self.inner.debounced_on_resize.clone();
        let id = self.inner.document.window().add_event_listener(
            "resize",
            Arc::new(move |_: &Event| debounced.trigger(())),
        );
        registrations.push(Registration::Window(id));

        let body = self.inner.document.body();
        let id = body.add_event_listener(
            START_EVENT,
            self.listener(|widget, evt| widget.broadcast(evt)),
        );
        registrations.push(Registration::Element(body.clone(), id));

        if let Some(close) = &self.inner.options.close_elm {
            let id = close.add_event_listener(
                "click",
                self.listener(|widget, evt| widget.hide(Some(evt))),
            );
            registrations.push(Registration::Element(close.clone(), id));
        }

        self.inner
            .registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(registrations);
    }

    /// Remove every listener this instance registered and make it inert.
    ///
    /// Element classes are left as they are. Calling this twice is harmless.
    /// Dropping the last handle removes the listeners too.
    pub fn destroy(&self) {
        let registrations: Vec<Registration> = self
            .inner
            .registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        self.inner.detach(registrations);

        self.state_mut().is_initialised = false;
    }
}

impl ExpaaandInner {
    fn detach(&self, registrations: Vec<Registration>) {
        for registration in registrations {
            match registration {
                Registration::Element(elm, id) => {
                    elm.remove_event_listener(id);
                }
                Registration::Window(id) => {
                    self.document.window().remove_event_listener(id);
                }
            }
        }
    }
}

impl Drop for ExpaaandInner {
    fn drop(&mut self) {
        let registrations = std::mem::take(
            self.registrations
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        self.detach(registrations);
    }
}

impl fmt::Debug for Expaaand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Expaaand")
            .field("trigger", &self.inner.trigger_elm.id())
            .field("group", &self.inner.options.group)
            .field("is_active", &state.is_active)
            .field("is_initialised", &state.is_initialised)
            .field("breakpoint", &state.breakpoint)
            .finish()
    }
}
