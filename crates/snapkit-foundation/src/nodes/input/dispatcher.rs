//! Document-level pointer stream with scoped subscriptions.
//!
//! A drag can wander outside the surface that captured it, so move/up events
//! have to be observed at the document level. Instead of ambient global
//! listeners, the host owns a [`PointerDispatcher`] and forwards every
//! move/up/cancel to it. A surface subscribes when it captures a drag and
//! holds the returned [`PointerSubscription`]; dropping the guard removes
//! the handler, so release, abort and unmount all unsubscribe by construction.

use super::types::PointerEvent;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Default)]
struct DispatcherInner {
    handlers: RefCell<Vec<(u64, PointerHandler)>>,
    next_id: Cell<u64>,
}

/// Host-owned fan-out of document-level pointer events.
#[derive(Clone, Default)]
pub struct PointerDispatcher {
    inner: Rc<DispatcherInner>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` until the returned guard is dropped.
    pub fn subscribe(&self, handler: impl Fn(&PointerEvent) + 'static) -> PointerSubscription {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        self.inner
            .handlers
            .borrow_mut()
            .push((id, Rc::new(handler)));
        log::trace!("pointer subscription {id} registered");
        PointerSubscription {
            dispatcher: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Delivers `event` to every live subscriber, in subscription order.
    ///
    /// Handlers are snapshotted first, so a handler may drop its own
    /// subscription (or subscribe another) while handling the event.
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let handlers: Vec<PointerHandler> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }
}

impl std::fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for one registered handler. Unsubscribes on drop.
#[derive(Debug)]
pub struct PointerSubscription {
    dispatcher: Weak<DispatcherInner>,
    id: Option<u64>,
}

impl PointerSubscription {
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.dispatcher.strong_count() > 0
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.dispatcher.upgrade() {
            inner
                .handlers
                .borrow_mut()
                .retain(|(handler_id, _)| *handler_id != id);
            log::trace!("pointer subscription {id} released");
        }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerEvent;

    #[test]
    fn dropping_guard_unsubscribes() {
        let dispatcher = PointerDispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let guard = dispatcher.subscribe(move |_| counter.set(counter.get() + 1));

        assert_eq!(dispatcher.subscriber_count(), 1);
        assert_eq!(dispatcher.dispatch(&PointerEvent::moved(0.0, 0.0, 0)), 1);
        assert_eq!(hits.get(), 1);

        drop(guard);
        assert_eq!(dispatcher.subscriber_count(), 0);
        assert_eq!(dispatcher.dispatch(&PointerEvent::moved(0.0, 0.0, 1)), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handler_can_drop_its_own_subscription() {
        let dispatcher = PointerDispatcher::new();
        let slot: Rc<RefCell<Option<PointerSubscription>>> = Rc::new(RefCell::new(None));
        let slot_in_handler = Rc::clone(&slot);
        let guard = dispatcher.subscribe(move |event| {
            if event.is_release() {
                slot_in_handler.borrow_mut().take();
            }
        });
        *slot.borrow_mut() = Some(guard);

        dispatcher.dispatch(&PointerEvent::moved(0.0, 0.0, 0));
        assert_eq!(dispatcher.subscriber_count(), 1);
        dispatcher.dispatch(&PointerEvent::up(0.0, 0.0, 1));
        assert_eq!(dispatcher.subscriber_count(), 0);
    }

    #[test]
    fn guard_outliving_dispatcher_is_harmless() {
        let dispatcher = PointerDispatcher::new();
        let guard = dispatcher.subscribe(|_| {});
        assert!(guard.is_active());
        drop(dispatcher);
        assert!(!guard.is_active());
        guard.cancel();
    }
}
