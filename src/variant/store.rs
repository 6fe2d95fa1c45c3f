//! Current variant index per part.

use std::collections::HashMap;

use crate::config::PartSpec;
use crate::error::{MascotError, Result};
use crate::part::PartName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    current: u32,
    max: u32,
}

/// Maps each part to its current variant and variant count.
///
/// Every stored index lies in `[1, max]`.
#[derive(Debug, Clone, Default)]
pub struct VariantStore {
    entries: HashMap<PartName, Entry>,
}

impl VariantStore {
    /// Creates a store with every part at variant 1.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = &'a PartSpec>) -> Self {
        let entries = parts
            .into_iter()
            .map(|spec| {
                (
                    spec.name.clone(),
                    Entry {
                        current: 1,
                        max: spec.max_variant.max(1),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    fn entry(&self, part: &PartName) -> Result<&Entry> {
        self.entries.get(part).ok_or_else(|| MascotError::UnknownPart {
            part: part.clone(),
        })
    }

    /// Current variant of the part.
    pub fn get(&self, part: &PartName) -> Result<u32> {
        Ok(self.entry(part)?.current)
    }

    /// Number of variants of the part.
    pub fn max(&self, part: &PartName) -> Result<u32> {
        Ok(self.entry(part)?.max)
    }

    /// Stores a new current variant. Fails if `index` is outside `[1, max]`.
    pub fn set(&mut self, part: &PartName, index: u32) -> Result<()> {
        let entry = self
            .entries
            .get_mut(part)
            .ok_or_else(|| MascotError::UnknownPart { part: part.clone() })?;

        if index < 1 || index > entry.max {
            return Err(MascotError::OutOfRange {
                part: part.clone(),
                index,
                max: entry.max,
            });
        }

        entry.current = index;
        Ok(())
    }

    pub fn contains(&self, part: &PartName) -> bool {
        self.entries.contains_key(part)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VariantStore {
        VariantStore::from_parts(&[PartSpec::new("head", 15), PartSpec::new("legs", 8)])
    }

    #[test]
    fn starts_at_first_variant() {
        let store = store();
        assert_eq!(store.get(&"head".into()).unwrap(), 1);
        assert_eq!(store.max(&"legs".into()).unwrap(), 8);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn set_within_range() {
        let mut store = store();
        store.set(&"head".into(), 15).unwrap();
        assert_eq!(store.get(&"head".into()).unwrap(), 15);
    }

    #[test]
    fn set_out_of_range_leaves_value() {
        let mut store = store();
        store.set(&"legs".into(), 4).unwrap();

        for bad in [0, 9] {
            assert!(matches!(
                store.set(&"legs".into(), bad),
                Err(MascotError::OutOfRange { index, max: 8, .. }) if index == bad
            ));
        }
        assert_eq!(store.get(&"legs".into()).unwrap(), 4);
    }

    #[test]
    fn unknown_part() {
        let mut store = store();
        assert!(matches!(
            store.get(&"tail".into()),
            Err(MascotError::UnknownPart { .. })
        ));
        assert!(store.set(&"tail".into(), 1).is_err());
    }
}
