//! Core scroll-spy model: an ordered section registry, the active-section
//! tracker, and the observation seam hosts plug their viewport mechanism
//! into. Everything here is pure state; scrolling itself is delegated back
//! to the host through [`scrollspy_protocol::NavCommand`].

pub mod observe;
pub mod page;
pub mod registry;
pub mod tracker;

pub use observe::{CallbackSubscription, PollSubscription, Subscription, ViewportObserver};
pub use page::{PageDoc, PageError, RefLink, SectionBody};
pub use registry::{ConfigError, Section, SectionRegistry};
pub use tracker::{ActiveSectionTracker, UnknownSectionError};
