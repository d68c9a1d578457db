use serde::{Deserialize, Serialize};

use crate::id::SectionId;

/// Fraction of an anchor's box that must be inside the viewport before the
/// section counts as visible.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.30;

/// Options handed to the platform's viewport observer at subscribe time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Visibility fraction in `0.0..=1.0` at which an anchor flips to visible.
    pub threshold: f64,
}

impl ObserverOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

/// One anchor crossing the visibility threshold, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityChange {
    pub id: SectionId,
    /// `true` when the anchor now satisfies the threshold.
    pub visible: bool,
}

impl VisibilityChange {
    pub fn new(id: impl Into<SectionId>, visible: bool) -> Self {
        Self {
            id: id.into(),
            visible,
        }
    }
}

/// One delivery from the viewport observer.
///
/// The underlying mechanism (DOM `IntersectionObserver`, a per-frame rect
/// check, a scroll-event poll) batches threshold crossings and delivers them
/// together; change order is the mechanism's report order, not document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationBatch {
    pub changes: Vec<VisibilityChange>,
}

impl ObservationBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-change batch, the common case outside of initial layout.
    pub fn single(id: impl Into<SectionId>, visible: bool) -> Self {
        Self {
            changes: vec![VisibilityChange::new(id, visible)],
        }
    }

    pub fn push(&mut self, id: impl Into<SectionId>, visible: bool) {
        self.changes.push(VisibilityChange::new(id, visible));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl From<Vec<VisibilityChange>> for ObservationBatch {
    fn from(changes: Vec<VisibilityChange>) -> Self {
        Self { changes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_thirty_percent() {
        let options = ObserverOptions::default();
        assert!((options.threshold - 0.30).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_is_clamped() {
        assert!((ObserverOptions::with_threshold(1.5).threshold - 1.0).abs() < f64::EPSILON);
        assert!(ObserverOptions::with_threshold(-0.2).threshold.abs() < f64::EPSILON);
    }

    #[test]
    fn batch_json_shape() {
        // The wasm bridge receives batches in exactly this shape from JS.
        let json = r#"{"changes": [{"id": "science", "visible": true}]}"#;
        let batch: ObservationBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.changes.len(), 1);
        assert_eq!(batch.changes[0].id, "science");
        assert!(batch.changes[0].visible);
    }
}
