pub mod commands;
pub mod config;
pub mod id;
pub mod observation;
pub mod theme;

pub use commands::{NavCommand, ScrollBehavior};
pub use config::{DisplayMeta, SectionConfig};
pub use id::SectionId;
pub use observation::{
    DEFAULT_VISIBILITY_THRESHOLD, ObservationBatch, ObserverOptions, VisibilityChange,
};
pub use theme::ThemeToken;
