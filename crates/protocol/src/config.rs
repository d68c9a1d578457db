use serde::{Deserialize, Serialize};

use crate::id::SectionId;
use crate::theme::ThemeToken;

/// One navigable section, as supplied by per-page configuration.
///
/// `meta` is opaque display data (icon reference, color tone, whatever the
/// surface wants). The registry and tracker carry it through untouched and
/// never branch on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de> + Default"))]
pub struct SectionConfig<M = DisplayMeta> {
    /// Unique within a page; must match the DOM/widget anchor for the block.
    pub id: SectionId,
    /// Display label for nav entries.
    pub title: String,
    #[serde(default)]
    pub meta: M,
}

impl<M> SectionConfig<M> {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>, meta: M) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            meta,
        }
    }
}

/// The display meta the shipped surfaces use: an icon glyph plus an accent
/// tone token. Hosts with other needs substitute their own `M`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    #[serde(default)]
    pub icon: String,
    #[serde(default = "DisplayMeta::default_tone")]
    pub tone: ThemeToken,
}

impl DisplayMeta {
    pub fn new(icon: impl Into<String>, tone: ThemeToken) -> Self {
        Self {
            icon: icon.into(),
            tone,
        }
    }

    fn default_tone() -> ThemeToken {
        ThemeToken::DEFAULT_TONE
    }
}

impl Default for DisplayMeta {
    fn default() -> Self {
        Self {
            icon: String::new(),
            tone: ThemeToken::DEFAULT_TONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_defaults_when_absent() {
        let json = r#"{"id": "intro", "title": "Introduction"}"#;
        let config: SectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.id, "intro");
        assert_eq!(config.meta, DisplayMeta::default());
    }

    #[test]
    fn unit_meta_for_hosts_without_display_data() {
        let json = r#"{"id": "intro", "title": "Introduction"}"#;
        let config: SectionConfig<()> = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Introduction");
    }
}
