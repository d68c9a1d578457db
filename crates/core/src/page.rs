//! Page document model shared by the demo surfaces.
//!
//! A page is a title plus an ordered list of section bodies; each body
//! carries the display meta and the paragraphs a surface renders. The
//! registry/tracker only ever see the derived `SectionConfig` list; the
//! body text stays on the surface side of the seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scrollspy_protocol::{DisplayMeta, SectionConfig, SectionId, ThemeToken};

use crate::registry::{ConfigError, SectionRegistry};
use crate::tracker::ActiveSectionTracker;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid page document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// External reference link rendered at the end of a section. Inert content;
/// nothing in the core consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefLink {
    pub label: String,
    pub url: String,
}

/// One content block of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionBody {
    pub id: SectionId,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "SectionBody::default_tone")]
    pub tone: ThemeToken,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub links: Vec<RefLink>,
}

impl SectionBody {
    fn default_tone() -> ThemeToken {
        ThemeToken::DEFAULT_TONE
    }
}

/// A full page document, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDoc {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub sections: Vec<SectionBody>,
}

impl PageDoc {
    pub fn from_json(data: &[u8]) -> Result<Self, PageError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Section configs in document order, for building the registry.
    pub fn section_configs(&self) -> Vec<SectionConfig<DisplayMeta>> {
        self.sections
            .iter()
            .map(|body| {
                SectionConfig::new(
                    body.id.clone(),
                    body.title.clone(),
                    DisplayMeta::new(body.icon.clone(), body.tone),
                )
            })
            .collect()
    }

    /// Build the page's tracker in one step. Fails on an empty section
    /// list or a duplicate id, same as [`SectionRegistry::build`].
    pub fn tracker(&self) -> Result<ActiveSectionTracker<DisplayMeta>, ConfigError> {
        Ok(ActiveSectionTracker::new(SectionRegistry::build(
            self.section_configs(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "title": "How Honeybees Navigate",
        "subtitle": "Sun compasses, polarized light, and the waggle dance",
        "sections": [
            {
                "id": "intro",
                "title": "Introduction",
                "icon": "🐝",
                "tone": "ToneAmber",
                "paragraphs": ["Bees find their way home across kilometers."]
            },
            {
                "id": "science",
                "title": "What the Evidence Shows",
                "icon": "🔬",
                "tone": "ToneSky",
                "paragraphs": ["Polarization patterns act as a sky-wide compass."],
                "links": [{"label": "Polarized light navigation", "url": "https://example.org/bees"}]
            },
            {
                "id": "reflection",
                "title": "Reflection",
                "paragraphs": ["A few cubic millimeters of brain suffice."]
            }
        ]
    }"#;

    #[test]
    fn parses_and_derives_configs_in_order() {
        let page = PageDoc::from_json(PAGE.as_bytes()).expect("valid page");
        assert_eq!(page.title, "How Honeybees Navigate");
        assert_eq!(page.sections.len(), 3);

        let configs = page.section_configs();
        let ids: Vec<&str> = configs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["intro", "science", "reflection"]);
        assert_eq!(configs[1].meta.tone, ThemeToken::ToneSky);
        // Unspecified tone falls back.
        assert_eq!(configs[2].meta.tone, ThemeToken::DEFAULT_TONE);
    }

    #[test]
    fn tracker_starts_on_the_first_section() {
        let page = PageDoc::from_json(PAGE.as_bytes()).expect("valid page");
        let tracker = page.tracker().expect("valid registry");
        assert_eq!(*tracker.current_id(), "intro");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PageDoc::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, PageError::Parse(_)));
    }

    #[test]
    fn duplicate_section_ids_fail_at_tracker_build() {
        let mut page = PageDoc::from_json(PAGE.as_bytes()).expect("valid page");
        let mut dup = page.sections[0].clone();
        dup.title = "Introduction, again".into();
        page.sections.push(dup);

        let err = page.tracker().unwrap_err();
        assert_eq!(err, ConfigError::DuplicateId(SectionId::from("intro")));
    }
}
