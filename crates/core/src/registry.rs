use std::collections::HashMap;

use log::debug;
use scrollspy_protocol::{SectionConfig, SectionId};
use thiserror::Error;

/// Registry construction failure. Both variants are programming errors in
/// the page configuration and should fail fast during development.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("section list is empty")]
    Empty,
    #[error("duplicate section id: {0}")]
    DuplicateId(SectionId),
}

/// A validated entry in a [`SectionRegistry`].
#[derive(Debug, Clone)]
pub struct Section<M> {
    pub id: SectionId,
    pub title: String,
    /// Opaque display payload, carried through untouched.
    pub meta: M,
}

/// The ordered set of navigable sections for one page.
///
/// Insertion order is document order (top to bottom). The registry is built
/// once at page-mount time and is immutable for the page's lifetime; the
/// order is used for deterministic iteration by nav surfaces, never for
/// active-section computation.
#[derive(Debug)]
pub struct SectionRegistry<M> {
    sections: Vec<Section<M>>,
    index: HashMap<SectionId, usize>,
}

impl<M> SectionRegistry<M> {
    /// Validate the configs and build a registry.
    ///
    /// Fails with [`ConfigError::Empty`] on an empty list and
    /// [`ConfigError::DuplicateId`] on a repeated id.
    pub fn build(configs: Vec<SectionConfig<M>>) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut sections = Vec::with_capacity(configs.len());
        let mut index = HashMap::with_capacity(configs.len());
        for (position, config) in configs.into_iter().enumerate() {
            if index.contains_key(config.id.as_str()) {
                return Err(ConfigError::DuplicateId(config.id));
            }
            index.insert(config.id.clone(), position);
            sections.push(Section {
                id: config.id,
                title: config.title,
                meta: config.meta,
            });
        }

        Ok(Self { sections, index })
    }

    /// All sections in document order.
    pub fn sections(&self) -> &[Section<M>] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section<M>> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`: `build` rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Section<M>> {
        self.index.get(id).map(|&i| &self.sections[i])
    }

    /// Document-order position of a section, if registered.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The topmost section's id, which is the tracker's initial active section.
    pub fn first_id(&self) -> &SectionId {
        // build() rejects empty lists, so index 0 always exists.
        &self.sections[0].id
    }

    /// Resolve each section id to a live anchor via the host's lookup.
    ///
    /// Anchors may mount asynchronously, so a missing anchor is not an
    /// error: the section is skipped (debug-logged) and simply never
    /// reported by the observer. Hosts may resolve again later and replace
    /// their observation. Results keep document order.
    pub fn resolve_anchors<A>(
        &self,
        mut lookup: impl FnMut(&str) -> Option<A>,
    ) -> Vec<(SectionId, A)> {
        let mut resolved = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            match lookup(&section.id) {
                Some(anchor) => resolved.push((section.id.clone(), anchor)),
                None => debug!("anchor not mounted yet, skipping: {}", section.id),
            }
        }
        resolved
    }
}

impl<'a, M> IntoIterator for &'a SectionRegistry<M> {
    type Item = &'a Section<M>;
    type IntoIter = std::slice::Iter<'a, Section<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
