use log::debug;
use scrollspy_protocol::{NavCommand, ObservationBatch, ScrollBehavior, SectionId};
use thiserror::Error;

use crate::observe::Subscription;
use crate::registry::{Section, SectionRegistry};

/// `navigate_to` was called with an id absent from the registry.
///
/// Recoverable: the caller treats it as a no-op; tracker state is untouched.
#[derive(Debug, Error, PartialEq)]
#[error("unknown section id: {id}")]
pub struct UnknownSectionError {
    pub id: SectionId,
}

/// Keeps one `current` section id synchronized with whichever section
/// dominates the viewport, and lets nav surfaces force-navigate.
///
/// The tracker is page-scoped: the page component owns exactly one instance
/// for its mounted lifetime and calls [`teardown`](Self::teardown) (or just
/// drops it) on unmount. Two writers mutate `current`, both on the host's
/// event loop, never concurrently:
///
/// - the viewport observer, via [`apply_batch`](Self::apply_batch);
/// - user navigation, via [`navigate_to`](Self::navigate_to), which updates
///   synchronously so the highlight never lags the click.
pub struct ActiveSectionTracker<M> {
    registry: SectionRegistry<M>,
    current: SectionId,
    outbox: Vec<NavCommand>,
    observation: Option<Box<dyn Subscription>>,
}

impl<M: std::fmt::Debug> std::fmt::Debug for ActiveSectionTracker<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSectionTracker")
            .field("registry", &self.registry)
            .field("current", &self.current)
            .field("outbox", &self.outbox)
            .field("observation", &self.observation.is_some())
            .finish()
    }
}

impl<M> ActiveSectionTracker<M> {
    /// Consume the registry; the topmost section starts active.
    pub fn new(registry: SectionRegistry<M>) -> Self {
        let current = registry.first_id().clone();
        Self {
            registry,
            current,
            outbox: Vec::new(),
            observation: None,
        }
    }

    pub fn current_id(&self) -> &SectionId {
        &self.current
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.current == *id
    }

    /// Sections in document order, for rendering nav lists.
    pub fn sections(&self) -> &[Section<M>] {
        self.registry.sections()
    }

    pub fn registry(&self) -> &SectionRegistry<M> {
        &self.registry
    }

    /// Scroll-driven transition: fold one observer delivery into the state.
    ///
    /// Every change that reports an anchor as now-visible moves `current`
    /// to that anchor's section, in batch order; when several sections
    /// cross the threshold in one delivery, the last one reported wins.
    /// Anchors leaving the viewport and ids the registry doesn't know are
    /// ignored.
    pub fn apply_batch(&mut self, batch: &ObservationBatch) {
        for change in &batch.changes {
            if !change.visible {
                continue;
            }
            if self.registry.contains(&change.id) {
                if self.current != change.id {
                    debug!("active section: {} -> {}", self.current, change.id);
                }
                self.current = change.id.clone();
            } else {
                debug!("observer reported unregistered id: {}", change.id);
            }
        }
    }

    /// Click-driven transition: activate `id` now and request the scroll.
    ///
    /// `current` is updated synchronously, before any scroll animation runs,
    /// so the nav highlight reflects the user's intent immediately rather
    /// than waiting for the observer to catch up. The smooth scroll itself
    /// is requested through the outbox and never awaited; a later call
    /// simply supersedes it.
    pub fn navigate_to(&mut self, id: &str) -> Result<(), UnknownSectionError> {
        let Some(section) = self.registry.get(id) else {
            return Err(UnknownSectionError {
                id: SectionId::from(id),
            });
        };
        self.current = section.id.clone();
        self.outbox.push(NavCommand::ScrollIntoView {
            id: section.id.clone(),
            behavior: ScrollBehavior::Smooth,
        });
        Ok(())
    }

    /// Back-to-top control: the topmost section becomes active again and
    /// the host is asked to scroll above the first anchor.
    pub fn scroll_to_top(&mut self) {
        self.current = self.registry.first_id().clone();
        self.outbox.push(NavCommand::ScrollToTop {
            behavior: ScrollBehavior::Smooth,
        });
    }

    /// Take the pending side-effect requests. The host performs them with
    /// its own scroll primitive.
    pub fn drain_commands(&mut self) -> Vec<NavCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Store the platform's observation handle, releasing any previous one.
    pub fn attach_observation(&mut self, subscription: Box<dyn Subscription>) {
        self.teardown();
        self.observation = Some(subscription);
    }

    /// Release the viewport observation. Idempotent; also runs on drop, so
    /// every unmount path releases the subscription.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.observation.take() {
            subscription.cancel();
        }
    }
}

impl<M> Drop for ActiveSectionTracker<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use scrollspy_protocol::SectionConfig;

    use super::*;
    use crate::observe::CallbackSubscription;

    fn tracker(ids: &[&str]) -> ActiveSectionTracker<()> {
        let configs = ids
            .iter()
            .map(|id| SectionConfig::new(*id, id.to_uppercase(), ()))
            .collect();
        ActiveSectionTracker::new(SectionRegistry::build(configs).expect("valid configs"))
    }

    #[test]
    fn first_section_starts_active() {
        let t = tracker(&["intro", "science", "quran", "reflection"]);
        assert_eq!(*t.current_id(), "intro");
        assert!(t.is_active("intro"));
    }

    #[test]
    fn visible_report_moves_current() {
        let mut t = tracker(&["intro", "science", "reflection"]);
        t.apply_batch(&ObservationBatch::single("science", true));
        assert_eq!(*t.current_id(), "science");
    }

    #[test]
    fn leaving_viewport_does_not_move_current() {
        let mut t = tracker(&["intro", "science"]);
        t.apply_batch(&ObservationBatch::single("science", true));
        t.apply_batch(&ObservationBatch::single("science", false));
        assert_eq!(*t.current_id(), "science");
    }

    #[test]
    fn last_change_in_a_batch_wins() {
        let mut t = tracker(&["intro", "science", "quran", "reflection"]);
        let mut batch = ObservationBatch::new();
        batch.push("quran", true);
        batch.push("science", true);
        t.apply_batch(&batch);
        // Batch order decides, not document order.
        assert_eq!(*t.current_id(), "science");
    }

    #[test]
    fn unregistered_ids_in_a_batch_are_ignored() {
        let mut t = tracker(&["intro", "science"]);
        let mut batch = ObservationBatch::new();
        batch.push("science", true);
        batch.push("footer", true);
        t.apply_batch(&batch);
        assert_eq!(*t.current_id(), "science");
    }

    #[test]
    fn navigate_updates_synchronously_and_requests_scroll() {
        let mut t = tracker(&["intro", "science", "reflection"]);
        t.navigate_to("reflection").expect("registered id");
        assert_eq!(*t.current_id(), "reflection");

        let commands = t.drain_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0],
            NavCommand::ScrollIntoView {
                id: SectionId::from("reflection"),
                behavior: ScrollBehavior::Smooth,
            }
        );
        // Outbox is drained, not re-delivered.
        assert!(t.drain_commands().is_empty());
    }

    #[test]
    fn navigate_pre_empts_pending_observation() {
        // A batch folded in after the click must not be able to lag the
        // highlight behind the user's intent at click time.
        let mut t = tracker(&["intro", "science", "reflection"]);
        t.navigate_to("reflection").expect("registered id");
        assert_eq!(*t.current_id(), "reflection");
    }

    #[test]
    fn unknown_id_is_a_safe_no_op() {
        let mut t = tracker(&["intro", "science"]);
        t.navigate_to("science").expect("registered id");

        let err = t.navigate_to("nonexistent").unwrap_err();
        assert_eq!(err.id, "nonexistent");
        assert_eq!(*t.current_id(), "science");
        // No partial scroll either: only the earlier navigate is queued.
        assert_eq!(t.drain_commands().len(), 1);
    }

    #[test]
    fn scroll_to_top_reactivates_first_section() {
        let mut t = tracker(&["intro", "science"]);
        t.navigate_to("science").expect("registered id");
        t.drain_commands();

        t.scroll_to_top();
        assert_eq!(*t.current_id(), "intro");
        assert_eq!(
            t.drain_commands(),
            vec![NavCommand::ScrollToTop {
                behavior: ScrollBehavior::Smooth,
            }]
        );
    }

    #[test]
    fn teardown_is_idempotent() {
        let cancelled = Rc::new(Cell::new(0u32));
        let counter = cancelled.clone();

        let mut t = tracker(&["intro", "science"]);
        t.attach_observation(Box::new(CallbackSubscription::new(move || {
            counter.set(counter.get() + 1);
        })));

        t.teardown();
        t.teardown();
        assert_eq!(cancelled.get(), 1);

        // Teardown with zero anchors ever observed must not fail either.
        let mut bare = tracker(&["intro"]);
        bare.teardown();
        bare.teardown();
    }

    #[test]
    fn drop_releases_the_observation() {
        let cancelled = Rc::new(Cell::new(0u32));
        let counter = cancelled.clone();
        {
            let mut t = tracker(&["intro"]);
            t.attach_observation(Box::new(CallbackSubscription::new(move || {
                counter.set(counter.get() + 1);
            })));
        }
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn reattaching_releases_the_previous_observation() {
        let cancelled = Rc::new(Cell::new(0u32));
        let counter = cancelled.clone();

        let mut t = tracker(&["intro"]);
        t.attach_observation(Box::new(CallbackSubscription::new(move || {
            counter.set(counter.get() + 1);
        })));
        t.attach_observation(Box::new(CallbackSubscription::new(|| {})));
        assert_eq!(cancelled.get(), 1);
    }
}
