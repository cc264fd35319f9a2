use crate::gap::BdAddr;

/// Devices found by the last completed inquiry
///
/// Each inquiry result replaces the whole list. Users refer to entries by
/// their 1-based position.
#[derive(Debug, Clone)]
pub struct InquiryCache {
    devices: Vec<BdAddr>,
    capacity: usize,
}

impl InquiryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the list with `devices`, keeping at most `capacity` of them.
    /// Returns the number kept.
    pub fn replace(&mut self, devices: &[BdAddr]) -> usize {
        let kept = devices.len().min(self.capacity);
        self.devices.clear();
        self.devices.extend_from_slice(&devices[..kept]);
        kept
    }

    pub fn reset(&mut self) {
        self.devices.clear();
    }

    /// Number of meaningful entries
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Address at the 1-based `index`
    ///
    /// `None` for index 0, an index past the valid count, or a slot holding
    /// the all-zero address.
    pub fn select(&self, index: u32) -> Option<BdAddr> {
        let position = (index as usize).checked_sub(1)?;
        self.devices
            .get(position)
            .copied()
            .filter(|address| !address.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BdAddr> {
        self.devices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_one_based() {
        let mut cache = InquiryCache::new(25);
        let a = BdAddr::new([1, 2, 3, 4, 5, 6]);
        let b = BdAddr::new([7, 8, 9, 10, 11, 12]);
        cache.replace(&[a, b]);
        assert_eq!(cache.select(0), None);
        assert_eq!(cache.select(1), Some(a));
        assert_eq!(cache.select(2), Some(b));
        assert_eq!(cache.select(3), None);
    }

    #[test]
    fn test_select_rejects_null_slot() {
        let mut cache = InquiryCache::new(25);
        cache.replace(&[BdAddr::NULL]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.select(1), None);
    }

    #[test]
    fn test_replace_caps_and_overwrites() {
        let mut cache = InquiryCache::new(2);
        let devices: Vec<BdAddr> = (1..=4).map(|i| BdAddr::new([i, 0, 0, 0, 0, 0])).collect();
        assert_eq!(cache.replace(&devices), 2);
        assert_eq!(cache.select(2), Some(devices[1]));
        cache.replace(&devices[3..]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.select(1), Some(devices[3]));
    }
}
