use scrollspy_protocol::{ObserverOptions, SectionId};

/// Scoped handle to a live viewport observation.
///
/// Acquired when a host subscribes its anchors, released on page unmount.
/// Releasing is the one correctness-critical lifetime contract in this
/// crate: a dangling observation keeps callbacks pointed at removed
/// anchors. `cancel` must be idempotent.
pub trait Subscription {
    fn cancel(&mut self);
}

/// Host-side seam for whatever viewport mechanism the platform has: a DOM
/// `IntersectionObserver`, a per-frame rect check, a scroll-event poll.
///
/// Implementations observe the given (already resolved) anchor ids at the
/// requested threshold and deliver [`scrollspy_protocol::ObservationBatch`]
/// values to the tracker on their own schedule. The returned subscription
/// is what the tracker tears down on unmount.
pub trait ViewportObserver {
    fn subscribe(
        &mut self,
        anchor_ids: &[SectionId],
        options: ObserverOptions,
    ) -> Box<dyn Subscription>;
}

/// Subscription that runs a closure on first cancel.
///
/// The wasm bridge uses this to disconnect the JS-side observer; tests use
/// it to record teardown.
pub struct CallbackSubscription {
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl CallbackSubscription {
    pub fn new(on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
        }
    }
}

impl Subscription for CallbackSubscription {
    fn cancel(&mut self) {
        if let Some(release) = self.on_cancel.take() {
            release();
        }
    }
}

/// Subscription for polling hosts that re-derive visibility every frame
/// from widget rects or a scroll offset. Nothing to release.
#[derive(Debug, Default, Clone, Copy)]
pub struct PollSubscription;

impl Subscription for PollSubscription {
    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn callback_fires_exactly_once() {
        let fired = Rc::new(Cell::new(0u32));
        let counter = fired.clone();
        let mut sub = CallbackSubscription::new(move || counter.set(counter.get() + 1));

        sub.cancel();
        sub.cancel();
        assert_eq!(fired.get(), 1);
    }
}
