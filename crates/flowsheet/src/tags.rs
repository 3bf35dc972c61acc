//! Sequential equipment tags.
//!
//! Each equipment instance gets `PREFIX-N`, where the prefix comes from its
//! class symbol and `N` is a 1-based counter per prefix. Numbering follows the
//! order equipment appears in the model and nothing else, so callers who need
//! stable tags across edits must keep that order stable.

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::{trace, warn};

use flowsheet_core::{identifier::EquipmentId, model::Equipment};

/// A human-readable equipment tag such as `P-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    prefix: &'static str,
    number: u32,
}

impl Tag {
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.number)
    }
}

/// Tags keyed by equipment id, in allocation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap {
    tags: IndexMap<EquipmentId, Tag>,
}

impl TagMap {
    pub fn get(&self, id: &str) -> Option<Tag> {
        self.tags.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EquipmentId, Tag)> + '_ {
        self.tags.iter().map(|(id, tag)| (id, *tag))
    }
}

/// Per-prefix running counters, scoped to one generation call.
///
/// # Examples
///
/// ```
/// # use flowsheet::TagAllocator;
/// let mut allocator = TagAllocator::new();
/// assert_eq!(allocator.next_tag("P").to_string(), "P-1");
/// assert_eq!(allocator.next_tag("V").to_string(), "V-1");
/// assert_eq!(allocator.next_tag("P").to_string(), "P-2");
/// ```
#[derive(Debug, Default)]
pub struct TagAllocator {
    counters: HashMap<&'static str, u32>,
}

impl TagAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next tag for `prefix`.
    pub fn next_tag(&mut self, prefix: &'static str) -> Tag {
        let counter = self.counters.entry(prefix).or_insert(0);
        *counter += 1;
        Tag {
            prefix,
            number: *counter,
        }
    }

    /// Tags every equipment instance in iteration order.
    ///
    /// A repeated id keeps the tag of its first occurrence and does not
    /// advance any counter.
    pub fn allocate<'a, I>(equipment: I) -> TagMap
    where
        I: IntoIterator<Item = &'a Equipment>,
    {
        let mut allocator = Self::new();
        let mut tags = IndexMap::new();

        for item in equipment {
            if tags.contains_key(item.id()) {
                warn!(id:% = item.id(); "Duplicate equipment id, keeping first tag");
                continue;
            }
            let tag = allocator.next_tag(item.class().tag_prefix());
            trace!(id:% = item.id(), tag:% = tag; "Allocated tag");
            tags.insert(item.id().clone(), tag);
        }

        TagMap { tags }
    }
}
