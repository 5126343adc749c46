//! Widget configuration.
//!
//! [`Options`] is what callers pass in; every field is optional.
//! [`ResolvedOptions::resolve`] merges, in increasing priority, the built-in
//! defaults, the caller's options and the trigger's data attributes.

use expaaand_dom::{Document, Element};
use serde::Deserialize;

use crate::breakpoint::{Breakpoint, Breakpoints};

/// Selector for the target element.
pub const TARGET_ATTR: &str = "data-expaaand";
/// Group name.
pub const GROUP_ATTR: &str = "data-expaaand-group";
/// `"true"` enables toggling.
pub const TOGGLE_ATTR: &str = "data-expaaand-toggle";
/// Selector for the close element.
pub const CLOSE_ATTR: &str = "data-expaaand-close";
/// Body class applied while expanded.
pub const BODY_CLASS_ATTR: &str = "data-expaaand-active";

pub const DEFAULT_GROUP: &str = "global";
pub const DEFAULT_ACTIVE_CLASS: &str = "is-active";
pub const DEFAULT_INIT_CLASS: &str = "is-expaaand-init";

/// Caller-supplied options.
///
/// Element references cannot be deserialized; set them with
/// [`Options::with_target`] and [`Options::with_close`].
///
/// # Example
///
/// ```
/// use expaaand::{Breakpoint, Options};
///
/// let options = Options::new()
///     .with_group("nav")
///     .with_toggle(true)
///     .with_breakpoints(vec![
///         Breakpoint::new("desktop", 768),
///         Breakpoint::new("mobile", 0).active(false),
///     ]);
/// assert_eq!(options.group.as_deref(), Some("nav"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Element to expand. Overridden by `data-expaaand`.
    #[serde(skip)]
    pub target_elm: Option<Element>,

    /// Coordination group. Overridden by `data-expaaand-group`.
    ///
    /// Default: `"global"`
    pub group: Option<String>,

    /// Class added to the body while expanded. Overridden by
    /// `data-expaaand-active`.
    ///
    /// Default: `expaaand-active-<group>`
    pub body_class: Option<String>,

    /// Element whose click collapses the widget. Overridden by
    /// `data-expaaand-close`.
    #[serde(skip)]
    pub close_elm: Option<Element>,

    /// Default: `"is-active"`
    pub active_class: Option<String>,

    /// Default: `"is-expaaand-init"`. Accepted for compatibility; never applied.
    pub init_class: Option<String>,

    /// Whether expanding an expanded widget collapses it. Forced on by
    /// `data-expaaand-toggle="true"`.
    ///
    /// Default: `false`
    pub enable_toggle: Option<bool>,

    /// Default: [`Breakpoints::default`]
    pub breakpoints: Option<Vec<Breakpoint>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: Element) -> Self {
        self.target_elm = Some(target);
        self
    }

    pub fn with_close(mut self, close: Element) -> Self {
        self.close_elm = Some(close);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = Some(class.into());
        self
    }

    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = Some(class.into());
        self
    }

    pub fn with_init_class(mut self, class: impl Into<String>) -> Self {
        self.init_class = Some(class.into());
        self
    }

    pub fn with_toggle(mut self, enable: bool) -> Self {
        self.enable_toggle = Some(enable);
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = Some(breakpoints);
        self
    }
}

/// Fully populated configuration for one widget instance.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub target_elm: Option<Element>,
    pub close_elm: Option<Element>,
    pub group: String,
    pub body_class: String,
    pub active_class: String,
    pub init_class: String,
    pub enable_toggle: bool,
    pub breakpoints: Breakpoints,
}

impl ResolvedOptions {
    /// Resolve options for `trigger`. Selectors in data attributes are looked
    /// up once, here.
    pub fn resolve(trigger: &Element, document: &Document, options: Options) -> Self {
        let target_elm = resolve_element(trigger, document, TARGET_ATTR, options.target_elm);
        let close_elm = resolve_element(trigger, document, CLOSE_ATTR, options.close_elm);

        let group = non_empty_attribute(trigger, GROUP_ATTR)
            .or(options.group)
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let body_class = non_empty_attribute(trigger, BODY_CLASS_ATTR)
            .or(options.body_class)
            .unwrap_or_else(|| format!("expaaand-active-{group}"));

        let enable_toggle = trigger.get_attribute(TOGGLE_ATTR).as_deref() == Some("true")
            || options.enable_toggle.unwrap_or(false);

        let breakpoints = options
            .breakpoints
            .map(Breakpoints::new)
            .unwrap_or_default();

        Self {
            target_elm,
            close_elm,
            group,
            body_class,
            active_class: options
                .active_class
                .unwrap_or_else(|| DEFAULT_ACTIVE_CLASS.to_string()),
            init_class: options
                .init_class
                .unwrap_or_else(|| DEFAULT_INIT_CLASS.to_string()),
            enable_toggle,
            breakpoints,
        }
    }
}

fn non_empty_attribute(elm: &Element, name: &str) -> Option<String> {
    elm.get_attribute(name).filter(|value| !value.is_empty())
}

/// The element named by the selector in `attribute`, or `fallback` when the
/// attribute is missing, invalid or matches nothing.
fn resolve_element(
    trigger: &Element,
    document: &Document,
    attribute: &str,
    fallback: Option<Element>,
) -> Option<Element> {
    if let Some(selector) = non_empty_attribute(trigger, attribute) {
        match document.query_selector(&selector) {
            Ok(Some(found)) => return Some(found),
            Ok(None) => log::debug!("{attribute}=\"{selector}\" matches no element"),
            Err(e) => log::warn!("{attribute}=\"{selector}\" is not a valid selector: {e}"),
        }
    }
    fallback
}
