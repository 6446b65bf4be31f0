use std::collections::VecDeque;

/// Entries stored in a [`BoundedLog`] expose their numeric id for lookups.
pub trait HasId {
    fn id(&self) -> u64;
}

/// Append-only in-memory log with a fixed capacity. Newest entries sit at
/// the front; once the capacity is exceeded the tail is truncated.
///
/// Not durable by design: contents are lost on restart.
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entries past capacity.
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// A contiguous newest-first slice plus the total entry count.
    pub fn page(&self, offset: usize, limit: usize) -> (Vec<T>, usize)
    where
        T: Clone,
    {
        let total = self.entries.len();
        let data = self
            .entries
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (data, total)
    }

    /// Empty the log, returning how many entries were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn get_by_id(&self, id: u64) -> Option<&T>
    where
        T: HasId,
    {
        self.entries.iter().find(|e| e.id() == id)
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
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u64);

    impl HasId for Item {
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn push_keeps_newest_first() {
        let mut log = BoundedLog::new(10);
        log.push(Item(1));
        log.push(Item(2));
        log.push(Item(3));

        let (data, total) = log.page(0, 10);
        assert_eq!(total, 3);
        assert_eq!(data, vec![Item(3), Item(2), Item(1)]);
    }

    #[test]
    fn push_beyond_capacity_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 1..=5 {
            log.push(Item(i));
        }

        let (data, total) = log.page(0, 10);
        assert_eq!(total, 3);
        assert_eq!(data, vec![Item(5), Item(4), Item(3)]);
        assert!(log.get_by_id(1).is_none());
        assert!(log.get_by_id(2).is_none());
    }

    #[test]
    fn page_returns_contiguous_slice() {
        let mut log = BoundedLog::new(100);
        for i in 1..=10 {
            log.push(Item(i));
        }

        let (data, total) = log.page(2, 3);
        assert_eq!(total, 10);
        assert_eq!(data, vec![Item(8), Item(7), Item(6)]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let mut log = BoundedLog::new(10);
        log.push(Item(1));

        let (data, total) = log.page(5, 10);
        assert_eq!(total, 1);
        assert!(data.is_empty());
    }

    #[test]
    fn clear_reports_prior_count() {
        let mut log = BoundedLog::new(10);
        for i in 0..4 {
            log.push(Item(i));
        }

        assert_eq!(log.clear(), 4);
        assert!(log.is_empty());
        assert_eq!(log.clear(), 0);
    }

    #[test]
    fn get_by_id_finds_entry() {
        let mut log = BoundedLog::new(10);
        log.push(Item(7));
        log.push(Item(9));

        assert_eq!(log.get_by_id(7), Some(&Item(7)));
        assert!(log.get_by_id(8).is_none());
    }

    proptest! {
        #[test]
        fn capacity_bound_holds(
            capacity in 1usize..=64,
            pushes in 0u64..=200,
        ) {
            let mut log = BoundedLog::new(capacity);
            for i in 0..pushes {
                log.push(Item(i));
            }

            prop_assert!(log.len() <= capacity);

            // The survivors are exactly the most recent ids, newest first.
            let (data, total) = log.page(0, capacity);
            prop_assert_eq!(total, (pushes as usize).min(capacity));
            for (offset, item) in data.iter().enumerate() {
                prop_assert_eq!(item.0, pushes - 1 - offset as u64);
            }
        }
    }
}
