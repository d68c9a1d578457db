use serde::{Deserialize, Serialize};

use crate::id::SectionId;

/// A single, stateless navigation side-effect request.
///
/// The tracker emits these into an outbox when the user force-navigates;
/// the host drains the outbox and performs the actual scrolling with
/// whatever primitive it has (`scrollIntoView`, egui scroll-to-rect, a text
/// offset jump). The tracker never waits for the scroll to finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavCommand {
    /// Bring the anchor for `id` to the top of the viewport.
    ScrollIntoView {
        id: SectionId,
        behavior: ScrollBehavior,
    },

    /// Return to the very top of the page (above the first anchor).
    ScrollToTop { behavior: ScrollBehavior },
}

/// How the host should animate a requested scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    /// Animated scroll; superseded by the next request, never awaited.
    Smooth,
    /// Jump without animation.
    Instant,
}
