use std::collections::BTreeSet;

use crate::values::DayId;

/// Days for which diagnosis-key packages have been downloaded
///
/// Read-only view over the key-package store, taken at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPackageInventory {
    days: BTreeSet<DayId>,
}

impl KeyPackageInventory {
    pub fn new(days: impl IntoIterator<Item = DayId>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayId> {
        self.days.iter()
    }

    /// Most recent day with a downloaded package
    pub fn latest_day(&self) -> Option<DayId> {
        self.days.last().copied()
    }
}

impl FromIterator<DayId> for KeyPackageInventory {
    fn from_iter<T: IntoIterator<Item = DayId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DayId {
        DayId::from_ymd_opt(2020, 6, d).unwrap()
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = KeyPackageInventory::default();
        assert!(inventory.is_empty());
        assert_eq!(inventory.latest_day(), None);
    }

    #[test]
    fn test_days_are_deduplicated_and_sorted() {
        let inventory: KeyPackageInventory = [day(3), day(1), day(3)].into_iter().collect();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.latest_day(), Some(day(3)));
        assert_eq!(inventory.days().next(), Some(&day(1)));
    }
}
