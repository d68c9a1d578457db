//! Handle-based bridge for JS hosts that own the real DOM.
//!
//! The host resolves anchors with `document.getElementById`, attaches one
//! `IntersectionObserver` per page at [`default_threshold`], and forwards
//! each observer callback as an [`ObservationBatch`] JSON payload. Commands
//! returned from `navigate_to` / `scroll_to_top` map directly onto
//! `scrollIntoView({behavior: "smooth"})` and `window.scrollTo`.

use std::cell::RefCell;

use scrollspy_core::{ActiveSectionTracker, PageDoc, SectionRegistry};
use scrollspy_protocol::{
    DEFAULT_VISIBILITY_THRESHOLD, DisplayMeta, ObservationBatch, SectionConfig,
};
use wasm_bindgen::prelude::*;

type Tracker = ActiveSectionTracker<DisplayMeta>;

thread_local! {
    // One slot per mounted page. Trackers hold non-Send subscription
    // handles, and wasm is single-threaded anyway.
    static TRACKERS: RefCell<Vec<Option<Tracker>>> = const { RefCell::new(Vec::new()) };
}

fn with_tracker<R>(
    handle: usize,
    f: impl FnOnce(&mut Tracker) -> Result<R, JsError>,
) -> Result<R, JsError> {
    TRACKERS.with(|cell| {
        let mut trackers = cell.borrow_mut();
        let tracker = trackers
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or_else(|| JsError::new("invalid tracker handle"))?;
        f(tracker)
    })
}

fn store(tracker: Tracker) -> usize {
    TRACKERS.with(|cell| {
        let mut trackers = cell.borrow_mut();
        let handle = trackers.len();
        trackers.push(Some(tracker));
        handle
    })
}

/// Build a tracker from a JSON array of section configs
/// (`[{id, title, meta: {icon, tone}}, ...]`). Returns a handle.
#[wasm_bindgen]
pub fn create_tracker(configs_json: &str) -> Result<usize, JsError> {
    let configs: Vec<SectionConfig<DisplayMeta>> =
        serde_json::from_str(configs_json).map_err(|e| JsError::new(&e.to_string()))?;
    let registry = SectionRegistry::build(configs).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(store(ActiveSectionTracker::new(registry)))
}

/// Build a tracker from a full page document (same shape as
/// `demos/sample-page.json`). Returns a handle.
#[wasm_bindgen]
pub fn create_page_tracker(page_json: &str) -> Result<usize, JsError> {
    let page = PageDoc::from_json(page_json.as_bytes()).map_err(|e| JsError::new(&e.to_string()))?;
    let tracker = page.tracker().map_err(|e| JsError::new(&e.to_string()))?;
    Ok(store(tracker))
}

/// The currently active section id.
#[wasm_bindgen]
pub fn current_section(handle: usize) -> Result<String, JsError> {
    with_tracker(handle, |tracker| Ok(tracker.current_id().to_string()))
}

/// Sections in document order, as JSON, for rendering the nav list.
#[wasm_bindgen]
pub fn section_list(handle: usize) -> Result<String, JsError> {
    with_tracker(handle, |tracker| {
        let configs: Vec<SectionConfig<DisplayMeta>> = tracker
            .sections()
            .iter()
            .map(|s| SectionConfig::new(s.id.clone(), s.title.clone(), s.meta.clone()))
            .collect();
        serde_json::to_string(&configs).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Fold one observer delivery into the tracker
/// (`{"changes": [{"id": ..., "visible": ...}, ...]}`).
#[wasm_bindgen]
pub fn apply_observations(handle: usize, batch_json: &str) -> Result<(), JsError> {
    let batch: ObservationBatch =
        serde_json::from_str(batch_json).map_err(|e| JsError::new(&e.to_string()))?;
    with_tracker(handle, |tracker| {
        tracker.apply_batch(&batch);
        Ok(())
    })
}

/// Activate `id` immediately; returns the scroll requests the host must
/// perform, as JSON. Fails (without state change) on an unknown id.
#[wasm_bindgen]
pub fn navigate_to(handle: usize, id: &str) -> Result<String, JsError> {
    with_tracker(handle, |tracker| {
        tracker
            .navigate_to(id)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_json::to_string(&tracker.drain_commands()).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Reactivate the first section; returns the scroll requests as JSON.
#[wasm_bindgen]
pub fn scroll_to_top(handle: usize) -> Result<String, JsError> {
    with_tracker(handle, |tracker| {
        tracker.scroll_to_top();
        serde_json::to_string(&tracker.drain_commands()).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// The visibility threshold the host should configure its
/// `IntersectionObserver` with.
#[wasm_bindgen]
pub fn default_threshold() -> f64 {
    DEFAULT_VISIBILITY_THRESHOLD
}

/// Release the tracker's observation handle. Idempotent; the host still
/// disconnects its own `IntersectionObserver`.
#[wasm_bindgen]
pub fn teardown(handle: usize) -> Result<(), JsError> {
    with_tracker(handle, |tracker| {
        tracker.teardown();
        Ok(())
    })
}

/// Drop the tracker entirely (page unmount). The handle becomes invalid.
#[wasm_bindgen]
pub fn drop_tracker(handle: usize) -> Result<(), JsError> {
    TRACKERS.with(|cell| {
        let mut trackers = cell.borrow_mut();
        let slot = trackers
            .get_mut(handle)
            .ok_or_else(|| JsError::new("invalid tracker handle"))?;
        // Dropping runs teardown.
        *slot = None;
        Ok(())
    })
}
