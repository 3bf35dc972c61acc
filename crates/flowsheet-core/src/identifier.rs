//! Equipment identifiers.
//!
//! Ids are compared and hashed constantly while resolving pipe endpoints. Each
//! one owns a shared `Arc<str>`, so clones are a reference-count bump and
//! nothing outlives the model that created it.

use std::{borrow::Borrow, fmt, sync::Arc};

use serde::Deserialize;

/// Caller-assigned identifier of one equipment instance.
///
/// # Examples
///
/// ```
/// use flowsheet_core::identifier::EquipmentId;
///
/// let feed_pump = EquipmentId::new("feed-pump");
/// let same = feed_pump.clone();
///
/// assert_eq!(feed_pump, same);
/// assert_eq!(feed_pump, "feed-pump");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct EquipmentId(Arc<str>);

impl EquipmentId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EquipmentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EquipmentId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

// Hash and Eq both delegate to the string, so `&str` lookups are consistent.
impl Borrow<str> for EquipmentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EquipmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EquipmentId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for EquipmentId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = EquipmentId::new("pump-1");
        let id2 = EquipmentId::new("pump-1");
        let id3 = EquipmentId::new("tank-1");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "pump-1");
    }

    #[test]
    fn test_display_trait() {
        let id = EquipmentId::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
        assert_eq!(id.as_str(), "display_test");
    }

    #[test]
    fn test_from_owned_string() {
        let id: EquipmentId = String::from("owned").into();
        assert_eq!(id, EquipmentId::new("owned"));
    }

    #[test]
    fn test_hash_and_eq() {
        let id1 = EquipmentId::new("key1");
        let id2 = EquipmentId::new("key1");
        let id3 = EquipmentId::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.get("key2"), Some(&"value2"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_ids_are_released_with_their_owner() {
        let id = EquipmentId::new("short-lived");
        let weak = Arc::downgrade(&id.0);
        let copy = id.clone();

        drop(id);
        assert!(weak.upgrade().is_some());
        drop(copy);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_partial_eq_str() {
        let id = EquipmentId::new("V-101 <bypass>");
        assert!(id == "V-101 <bypass>");
        assert!(id != "V-101");

        let empty = EquipmentId::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_deserialize_from_string() {
        #[derive(Deserialize)]
        struct Holder {
            id: EquipmentId,
        }

        let holder: Holder = toml::from_str(r#"id = "reactor""#).unwrap();
        assert_eq!(holder.id, "reactor");
    }
}
