//! Local link key cache
//!
//! A fixed number of slots, each either free or holding the key of one
//! remote device. Storing a key reuses the slot already holding that
//! address, otherwise takes the first free slot, and never evicts an
//! unrelated entry.

use crate::gap::{BdAddr, LinkKey};
use thiserror::Error;

/// Every slot holds the key of another device
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("link key cache is full")]
pub struct LinkKeyCacheFull;

/// Link key stored for a remote device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkKeyEntry {
    /// Remote device address
    pub address: BdAddr,
    /// Key created during pairing
    pub key: LinkKey,
}

#[derive(Debug, Clone)]
pub struct LinkKeyCache {
    slots: Vec<Option<LinkKeyEntry>>,
}

impl LinkKeyCache {
    /// Create an empty cache with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key stored for `address`, if any
    pub fn get(&self, address: &BdAddr) -> Option<LinkKey> {
        self.slots
            .iter()
            .flatten()
            .find(|entry| entry.address == *address)
            .map(|entry| entry.key)
    }

    /// Store `key` for `address`
    ///
    /// Returns the index of the slot used.
    pub fn store(&mut self, address: BdAddr, key: LinkKey) -> Result<usize, LinkKeyCacheFull> {
        let index = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some(entry) if entry.address == address))
            .or_else(|| self.slots.iter().position(Option::is_none))
            .ok_or(LinkKeyCacheFull)?;

        self.slots[index] = Some(LinkKeyEntry { address, key });
        Ok(index)
    }

    /// Free the slot holding `address`; returns whether one was found
    pub fn remove(&mut self, address: &BdAddr) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(entry) if entry.address == *address))
        {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Free every slot
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkKeyEntry> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> BdAddr {
        BdAddr::new([last, 0, 0, 0, 0, 0x11])
    }

    #[test]
    fn test_store_reuses_matching_slot() {
        let mut cache = LinkKeyCache::new(2);
        assert_eq!(cache.store(addr(1), LinkKey([1; 16])), Ok(0));
        assert_eq!(cache.store(addr(2), LinkKey([2; 16])), Ok(1));
        assert_eq!(cache.store(addr(1), LinkKey([3; 16])), Ok(0));
        assert_eq!(cache.get(&addr(1)), Some(LinkKey([3; 16])));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_store_never_evicts() {
        let mut cache = LinkKeyCache::new(1);
        cache.store(addr(1), LinkKey([1; 16])).unwrap();
        assert_eq!(cache.store(addr(2), LinkKey([2; 16])), Err(LinkKeyCacheFull));
        assert_eq!(cache.get(&addr(1)), Some(LinkKey([1; 16])));
        assert_eq!(cache.get(&addr(2)), None);
    }

    #[test]
    fn test_remove_frees_only_that_slot() {
        let mut cache = LinkKeyCache::new(3);
        cache.store(addr(1), LinkKey([1; 16])).unwrap();
        cache.store(addr(2), LinkKey([2; 16])).unwrap();
        assert!(cache.remove(&addr(1)));
        assert!(!cache.remove(&addr(1)));
        assert_eq!(cache.get(&addr(2)), Some(LinkKey([2; 16])));
        // The freed slot is the first free one again
        assert_eq!(cache.store(addr(3), LinkKey([3; 16])), Ok(0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 3);
    }
}
