//! Class-membership check and trailing-edge debounce.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use expaaand_dom::Element;
use regex::Regex;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::error::ExpaaandError;

/// Default quiet period before a debounced call fires.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(150);

/// Something that carries CSS classes.
///
/// `contains_class` is the native class-list check. Sources without a class
/// list return `None` and are matched against their raw class string.
pub trait ClassTarget {
    fn contains_class(&self, class: &str) -> Option<bool>;

    /// Raw, whitespace-separated class string.
    fn class_name(&self) -> String;
}

impl ClassTarget for Element {
    fn contains_class(&self, class: &str) -> Option<bool> {
        Some(Element::contains_class(self, class))
    }

    fn class_name(&self) -> String {
        Element::class_name(self)
    }
}

impl ClassTarget for str {
    fn contains_class(&self, _class: &str) -> Option<bool> {
        None
    }

    fn class_name(&self) -> String {
        self.to_string()
    }
}

impl ClassTarget for String {
    fn contains_class(&self, _class: &str) -> Option<bool> {
        None
    }

    fn class_name(&self) -> String {
        self.clone()
    }
}

/// Whether `class_name` is one of `elm`'s classes.
///
/// An empty name is never present. Fails if `class_name` contains
/// whitespace.
pub fn has_class<T: ClassTarget + ?Sized>(elm: &T, class_name: &str) -> Result<bool, ExpaaandError> {
    if class_name.is_empty() {
        return Ok(false);
    }
    if class_name.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(ExpaaandError::InvalidClassName(class_name.to_string()));
    }

    if let Some(found) = elm.contains_class(class_name) {
        return Ok(found);
    }

    let pattern = Regex::new(&format!(
        r"(^|[\t\n\x0C\r ]){}([\t\n\x0C\r ]|$)",
        regex::escape(class_name)
    ))?;
    Ok(pattern.is_match(&elm.class_name()))
}

/// Runtime used by debouncers created outside of a tokio runtime.
fn background_handle() -> Option<Handle> {
    static RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            match Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("expaaand-debounce")
                .enable_time()
                .build()
            {
                Ok(runtime) => Some(runtime),
                Err(e) => {
                    log::warn!("debounce: failed to start background runtime: {e}");
                    None
                }
            }
        })
        .as_ref()
        .map(|runtime| runtime.handle().clone())
}

struct DebounceInner<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    runtime: Option<Handle>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Trailing-edge debounced callback.
///
/// Each [`Debounce::trigger`] cancels the pending call (if any) and schedules
/// a new one `delay` later with the latest arguments. Clones share the timer.
pub struct Debounce<A> {
    inner: Arc<DebounceInner<A>>,
}

impl<A: Send + 'static> Debounce<A> {
    /// Create a debouncer on the current tokio runtime.
    ///
    /// Outside a runtime, calls are scheduled on a shared background runtime
    /// so the callback runs on its worker thread.
    pub fn new<F>(callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().ok().or_else(background_handle);
        if runtime.is_none() {
            log::warn!("debounce: no runtime available, calls will be dropped");
        }
        Self::build(Box::new(callback), delay, runtime)
    }

    /// Create a debouncer that schedules on `runtime`.
    pub fn with_handle<F>(callback: F, delay: Duration, runtime: Handle) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::build(Box::new(callback), delay, Some(runtime))
    }

    fn build(callback: Box<dyn Fn(A) + Send + Sync>, delay: Duration, runtime: Option<Handle>) -> Self {
        Self {
            inner: Arc::new(DebounceInner {
                callback,
                delay,
                runtime,
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Schedule the callback, replacing any pending call.
    pub fn trigger(&self, args: A) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = pending.take() {
            task.abort();
        }

        let Some(runtime) = &self.inner.runtime else {
            log::debug!("debounce: no runtime, dropping call");
            return;
        };
        let inner = Arc::clone(&self.inner);
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(inner.delay).await;
            (inner.callback)(args);
        }));
    }

    /// Whether a call is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.inner.delay)
            .finish_non_exhaustive()
    }
}

/// Wrap `callback` so that bursts of calls collapse into one, fired `delay`
/// after the last call with that call's arguments.
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounce<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounce::new(callback, delay)
}
