//! Integration test: drive a tracker through a full page lifecycle with a
//! fake host: anchor resolution, observer subscription, scroll-driven and
//! click-driven transitions, and teardown.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use scrollspy_core::{ActiveSectionTracker, CallbackSubscription, SectionRegistry, Subscription, ViewportObserver};
use scrollspy_protocol::{
    NavCommand, ObservationBatch, ObserverOptions, ScrollBehavior, SectionConfig, SectionId,
};

/// Stand-in for the host's anchor store (the DOM, widget rects, ...).
struct FakeAnchors {
    mounted: HashMap<String, u64>,
}

/// Observer that records what it was asked to watch and hands back a
/// cancel-counting subscription.
struct FakeObserver {
    observed: Vec<SectionId>,
    threshold: f64,
    cancels: Rc<Cell<u32>>,
}

impl ViewportObserver for FakeObserver {
    fn subscribe(
        &mut self,
        anchor_ids: &[SectionId],
        options: ObserverOptions,
    ) -> Box<dyn Subscription> {
        self.observed = anchor_ids.to_vec();
        self.threshold = options.threshold;
        let cancels = self.cancels.clone();
        Box::new(CallbackSubscription::new(move || {
            cancels.set(cancels.get() + 1);
        }))
    }
}

fn build_tracker(ids: &[&str]) -> ActiveSectionTracker<()> {
    let configs = ids
        .iter()
        .map(|id| SectionConfig::new(*id, id.to_uppercase(), ()))
        .collect();
    ActiveSectionTracker::new(SectionRegistry::build(configs).expect("valid configs"))
}

#[test]
fn full_page_lifecycle() {
    let mut tracker = build_tracker(&["intro", "science", "quran", "reflection"]);
    assert_eq!(*tracker.current_id(), "intro");

    // Mount: "quran" has not rendered yet and must be skipped silently.
    let anchors = FakeAnchors {
        mounted: [
            ("intro".to_string(), 1),
            ("science".to_string(), 2),
            ("reflection".to_string(), 4),
        ]
        .into_iter()
        .collect(),
    };
    let resolved = tracker
        .registry()
        .resolve_anchors(|id| anchors.mounted.get(id).copied());
    let resolved_ids: Vec<SectionId> = resolved.into_iter().map(|(id, _)| id).collect();
    assert_eq!(resolved_ids.len(), 3);

    let cancels = Rc::new(Cell::new(0u32));
    let mut observer = FakeObserver {
        observed: Vec::new(),
        threshold: 0.0,
        cancels: cancels.clone(),
    };
    let subscription = observer.subscribe(&resolved_ids, ObserverOptions::default());
    tracker.attach_observation(subscription);

    assert_eq!(observer.observed.len(), 3);
    assert!((observer.threshold - 0.30).abs() < f64::EPSILON);

    // Scroll: "science" crosses the 30% threshold.
    tracker.apply_batch(&ObservationBatch::single("science", true));
    assert_eq!(*tracker.current_id(), "science");

    // Click: immediate highlight plus a smooth-scroll request.
    tracker.navigate_to("reflection").expect("registered id");
    assert_eq!(*tracker.current_id(), "reflection");
    assert_eq!(
        tracker.drain_commands(),
        vec![NavCommand::ScrollIntoView {
            id: SectionId::from("reflection"),
            behavior: ScrollBehavior::Smooth,
        }]
    );

    // Unknown id: error, no state change, no scroll request.
    let err = tracker.navigate_to("nonexistent").unwrap_err();
    assert_eq!(err.id, "nonexistent");
    assert_eq!(*tracker.current_id(), "reflection");
    assert!(tracker.drain_commands().is_empty());

    // A late observer delivery still lands after the click, as in the
    // browser: whichever callback runs last wins.
    tracker.apply_batch(&ObservationBatch::single("intro", true));
    assert_eq!(*tracker.current_id(), "intro");

    // Unmount: teardown releases the subscription exactly once.
    tracker.teardown();
    tracker.teardown();
    drop(tracker);
    assert_eq!(cancels.get(), 1);
}

#[test]
fn lifecycle_with_no_resolvable_anchors() {
    // Worst case from the error-handling design: nothing ever highlights
    // beyond the initial section, but nothing fails either.
    let mut tracker = build_tracker(&["intro", "science"]);
    let resolved = tracker.registry().resolve_anchors(|_| None::<u64>);
    assert!(resolved.is_empty());

    tracker.teardown();
    tracker.teardown();
    assert_eq!(*tracker.current_id(), "intro");
}
