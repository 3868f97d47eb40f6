use std::cmp::Ordering;

use crate::compare::Compare;

/// Block corresponds to a single sorted run of elements inside a
/// block-list instance. Its buffer is allocated once, at the capacity
/// configured on the owning directory, and never resized; a full block
/// is only ever halved by [`Block::split`].
#[derive(Clone)]
pub struct Block<T>
where
    T: Clone,
{
    values: Vec<T>,
}

// Primary operations on a single block. The owning directory holds the
// capacity and the comparator, both are passed in.
impl<T> Block<T>
where
    T: Clone,
{
    pub(crate) fn seed(cap: usize, value: T) -> Block<T> {
        let mut values = Vec::with_capacity(cap);
        values.push(value);
        Block { values }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    // min/max require a non-empty block, which the directory guarantees
    // for every admitted block.
    #[inline]
    pub(crate) fn min(&self) -> &T {
        &self.values[0]
    }

    #[inline]
    pub(crate) fn max(&self) -> &T {
        &self.values[self.values.len() - 1]
    }

    /// Binary search under `cmp`. `Ok(idx)` is an exact match,
    /// `Err(pos)` is the position a genuine insert would take.
    pub(crate) fn search<C>(&self, value: &T, cmp: &C) -> Result<usize, usize>
    where
        C: Compare<T>,
    {
        self.values.binary_search_by(|e| cmp.compare(e, value))
    }

    /// Insert at a position previously obtained from a failed
    /// [`Block::search`], shifting the tail right by one.
    pub(crate) fn insert_at(&mut self, pos: usize, value: T) {
        self.values.insert(pos, value);
    }

    /// Remove the element at `i`, shifting the tail left by one.
    pub(crate) fn remove_at(&mut self, i: usize) -> T {
        self.values.remove(i)
    }

    /// Halve a full block: move the upper half into a fresh block of
    /// capacity `cap`. Caller must not split a block of less than two
    /// elements, both halves are non-empty afterwards.
    pub(crate) fn split(&mut self, cap: usize) -> Block<T> {
        let at = self.values.len() / 2;
        let mut upper = Vec::with_capacity(cap);
        upper.extend(self.values.drain(at..));
        Block { values: upper }
    }

    /// Where does `value` lie relative to this block, list form:
    /// `cmp(min, value)` when that is not `Less`, else
    /// `cmp(max, value)`. `Less` means the whole block is below
    /// `value`; anything else means the block may still have to be
    /// descended into. Drives the directory's `partition_point`
    /// searches.
    pub(crate) fn cmp_to_value<C>(&self, value: &T, cmp: &C) -> Ordering
    where
        C: Compare<T>,
    {
        let low = cmp.compare(self.min(), value);
        if low != Ordering::Less {
            low
        } else {
            cmp.compare(self.max(), value)
        }
    }

    /// Where does `value` lie relative to this block, set form: the
    /// answer is clamped to `Equal` for any value inside
    /// `[min, max]`, so the directory's binary search lands directly on
    /// the covering block when one exists.
    pub(crate) fn cmp_covering<C>(&self, value: &T, cmp: &C) -> Ordering
    where
        C: Compare<T>,
    {
        if cmp.compare(self.max(), value) == Ordering::Less {
            Ordering::Less
        } else if cmp.compare(self.min(), value) == Ordering::Greater {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;
