use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stable section identifier, shared by the registry, the tracker state,
/// and every navigation surface.
///
/// Wraps `Arc<str>` so that `.clone()` is a pointer copy + refcount
/// increment instead of a heap allocation. Nav surfaces clone the active
/// id and every entry id on each frame, so this is the type that crosses
/// the core/surface boundary.
///
/// Implements `PartialEq<&str>` so assertions like
/// `assert_eq!(tracker.current_id(), "intro")` work naturally.
#[derive(Debug, Clone, Eq)]
pub struct SectionId(Arc<str>);

impl SectionId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// --- Equality ---

impl PartialEq for SectionId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer means equal.
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for SectionId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

// --- Hashing ---

impl std::hash::Hash for SectionId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

// --- Deref / Borrow / AsRef ---

impl std::ops::Deref for SectionId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SectionId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

// --- Conversions ---

impl From<&str> for SectionId {
    #[inline]
    fn from(s: &str) -> Self {
        SectionId(Arc::from(s))
    }
}

impl From<String> for SectionId {
    #[inline]
    fn from(s: String) -> Self {
        SectionId(Arc::from(s.as_str()))
    }
}

// --- Display ---

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// --- Serde (hand-rolled to avoid the `rc` feature flag) ---

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SectionId(Arc::from(s.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_allocation() {
        let a = SectionId::from("intro");
        let b = a.clone();
        assert_eq!(&*a, &*b);
        assert_eq!(a, b);
    }

    #[test]
    fn eq_str() {
        let id = SectionId::from("science");
        assert_eq!(id, "science");
        assert!(id == "science");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(SectionId::from("reflection"), 3usize);
        assert_eq!(map.get("reflection"), Some(&3));
    }

    #[test]
    fn serde_is_a_plain_string() {
        let id = SectionId::from("intro");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"intro\"");
        let back: SectionId = serde_json::from_str(&json).unwrap_or_else(|_| SectionId::from(""));
        assert_eq!(back, "intro");
    }
}
