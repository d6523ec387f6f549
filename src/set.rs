//! Module implement a counting set, a multiset that count occurrences of
//! each key, on top of [Index].

use std::borrow::Borrow;

use crate::rbt::{DumpValues, Index};

/// CountSet type, each distinct key is stored once in the underlying
/// [Index], along with the number of times it was inserted.
#[derive(Clone)]
pub struct CountSet<K> {
    index: Index<K, usize>,
}

impl<K> Default for CountSet<K> {
    fn default() -> CountSet<K> {
        CountSet::new("rbt-set")
    }
}

impl<K> CountSet<K> {
    pub fn new(name: &str) -> CountSet<K> {
        CountSet {
            index: Index::new(name),
        }
    }

    /// Return number of distinct keys in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove all keys.
    pub fn clear(&mut self) {
        self.index.clear()
    }

    /// Return the number of occurrences of `key`, ZERO if key is missing.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|count| *count).unwrap_or(0)
    }

    /// Return whether `key` occurs at least once.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.count(key) > 0
    }

    /// Return the underlying index, counts are the values.
    pub fn as_index(&self) -> &Index<K, usize> {
        &self.index
    }

    /// Return a printable dump of the underlying tree, along with counts.
    pub fn dump(&self) -> DumpValues<'_, K, usize> {
        self.index.dump_with_values()
    }
}

impl<K> CountSet<K>
where
    K: Ord,
{
    /// Add one occurrence of `key`, return its count after insert.
    pub fn insert(&mut self, key: K) -> usize {
        match self.index.get_mut(&key) {
            Ok(count) => {
                *count += 1;
                *count
            }
            Err(_) => {
                self.index.insert(key, 1);
                1
            }
        }
    }

    /// Remove one occurrence of `key`, return its count after delete. Key
    /// is dropped from the set when its last occurrence is removed.
    /// Deleting a missing key is a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index.get_mut(key) {
            Ok(count) if *count > 1 => {
                *count -= 1;
                return *count;
            }
            Ok(_) => (),
            Err(_) => return 0,
        }
        self.index.delete(key);
        0
    }

    /// Remove all occurrences of `key`, return the number of occurrences
    /// removed.
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.delete(key).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "set_test.rs"]
mod set_test;
