//! Synchronous publish/subscribe channel between clock faces and the picker.
//!
//! Faces never touch the picker directly. When the user picks a value on the
//! dial the face triggers `HourChange` / `MinuteChange` on the bus and the
//! picker's subscriptions update its time state. The bus is single-threaded:
//! handlers run inline on the UI thread in subscription order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    HourChange,
    MinuteChange,
    ControlOpen,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Topic::HourChange => "hourChange",
            Topic::MinuteChange => "minuteChange",
            Topic::ControlOpen => "controlOpen",
        };
        write!(f, "{}", s)
    }
}

type Handler = Rc<RefCell<dyn FnMut(Option<u32>)>>;

#[derive(Default)]
struct Subscribers {
    handlers: Vec<(Topic, Handler)>,
}

/// Cloneable handle to a shared subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Subscribers>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, topic: Topic, handler: F)
    where
        F: FnMut(Option<u32>) + 'static,
    {
        let handler: Handler = Rc::new(RefCell::new(handler));
        self.inner.borrow_mut().handlers.push((topic, handler));
    }

    /// Deliver `payload` to every handler subscribed to `topic`.
    ///
    /// The handler list is snapshotted first so handlers may subscribe or
    /// trigger other topics while running.
    ///
    /// A handler that is still running when its own topic fires again (it
    /// re-triggered it, directly or through another topic) does not see the
    /// nested payload. Every other handler on the topic still does, and the
    /// skip is logged at debug level.
    pub fn trigger(&self, topic: Topic, payload: Option<u32>) {
        let matching: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .filter(|(t, _)| *t == topic)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        tracing::trace!(%topic, ?payload, subscribers = matching.len(), "bus trigger");
        for handler in matching {
            match handler.try_borrow_mut() {
                Ok(mut f) => f(payload),
                Err(_) => {
                    tracing::debug!(%topic, ?payload, "handler busy, nested delivery skipped");
                }
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .borrow()
            .handlers
            .iter()
            .filter(|(t, _)| *t == topic)
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.inner.borrow().handlers.len())
            .finish()
    }
}
