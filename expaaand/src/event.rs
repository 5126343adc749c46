//! Notifications dispatched on the document body.

use std::collections::BTreeMap;

use expaaand_dom::Element;

/// Fired before an expand/toggle is evaluated. Other instances listen for
/// this to collapse themselves.
pub const START_EVENT: &str = "widget:start";

/// Fired after an expand/toggle has been evaluated.
pub const END_EVENT: &str = "widget:end";

/// Fired after an instance has collapsed.
pub const HIDDEN_EVENT: &str = "widget:hidden";

/// Detail carried by every widget notification.
#[derive(Debug, Clone)]
pub struct ExpaaandDetail {
    pub group: String,
    /// Expanded state at the time the notification was fired.
    pub is_active: bool,
    pub target_elm: Option<Element>,
    pub trigger_elm: Element,
    /// Caller-supplied fields with no typed counterpart.
    pub extra: BTreeMap<String, String>,
}

impl ExpaaandDetail {
    /// Merge override fields over the defaults. `group` and `isActive`
    /// replace the typed fields; anything else lands in `extra`.
    pub(crate) fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            match key.as_str() {
                "group" => self.group = value,
                "isActive" => match value.parse() {
                    Ok(active) => self.is_active = active,
                    Err(_) => {
                        log::warn!("ignoring non-boolean isActive override {:?}", value);
                    }
                },
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
        self
    }
}
