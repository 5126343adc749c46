//! Responsive breakpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named minimum viewport width.
///
/// `active` controls whether expand/collapse behavior is enabled while this
/// breakpoint is current.
///
/// Deserializes from either the flat form `{"name": "md", "active": true,
/// "size": 768}` or the keyed form `{"md": {"active": true, "size": 768}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BreakpointRepr")]
pub struct Breakpoint {
    pub name: String,
    pub active: bool,
    /// Minimum viewport width in pixels.
    pub size: u32,
}

impl Breakpoint {
    /// An active breakpoint.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            active: true,
            size,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

#[derive(Deserialize)]
struct Tier {
    #[serde(default = "default_active")]
    active: bool,
    size: u32,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BreakpointRepr {
    Flat {
        name: String,
        #[serde(default = "default_active")]
        active: bool,
        size: u32,
    },
    Keyed(BTreeMap<String, Tier>),
}

impl TryFrom<BreakpointRepr> for Breakpoint {
    type Error = String;

    fn try_from(repr: BreakpointRepr) -> Result<Self, Self::Error> {
        match repr {
            BreakpointRepr::Flat { name, active, size } => Ok(Self { name, active, size }),
            BreakpointRepr::Keyed(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "keyed breakpoint must have exactly one name, found {}",
                        map.len()
                    ));
                }
                let (name, tier) = map.into_iter().next().ok_or("empty breakpoint")?;
                Ok(Self {
                    name,
                    active: tier.active,
                    size: tier.size,
                })
            }
        }
    }
}

/// Ordered breakpoint sequence, widest first.
///
/// Construction sorts by descending `size` (stable for equal sizes), so the
/// first entry whose size fits a width is also the widest one that fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Self {
        breakpoints.sort_by(|a, b| b.size.cmp(&a.size));
        Self(breakpoints)
    }

    /// Index of the breakpoint that applies at `width`.
    ///
    /// `None` only when no entry's size fits, which cannot happen if the
    /// sequence contains a zero-size fallback.
    pub fn resolve(&self, width: u32) -> Option<usize> {
        self.0.iter().position(|bp| bp.size <= width)
    }

    pub fn get(&self, index: usize) -> Option<&Breakpoint> {
        self.0.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set `active` on the breakpoint called `name`. Unknown names are ignored.
    pub fn with_active(mut self, name: &str, active: bool) -> Self {
        if let Some(bp) = self.0.iter_mut().find(|bp| bp.name == name) {
            bp.active = active;
        }
        self
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(vec![
            Breakpoint::new("xl", 1200),
            Breakpoint::new("lg", 992),
            Breakpoint::new("md", 768),
            Breakpoint::new("sm", 480),
            Breakpoint::new("xs", 0),
        ])
    }
}

impl From<Vec<Breakpoint>> for Breakpoints {
    fn from(breakpoints: Vec<Breakpoint>) -> Self {
        Self::new(breakpoints)
    }
}
