use std::cmp::Ordering;

use rand::Rng;

use crate::compare::Compare;
use crate::error::Error;
use crate::list::{Between, BlockList, Iter, Matching, Stats};

/// BlockSet manage a single instance of in-memory ordered set with the
/// same structure and semantics as [`BlockList`], plus a cached bounds
/// shortcut for negative membership queries.
///
/// The shortcut is a `(min, max)` pair widened on insert and dropped on
/// every delete; a probe outside it is answered without touching the
/// directory. It is semantically redundant, every query produces
/// identical results with or without it.
///
/// ```
/// use sblist_index::{BlockSet, Natural};
///
/// let mut set: BlockSet<i64, Natural> = BlockSet::new("myinstance", Natural, 128);
/// assert!(set.insert(20));
/// assert!(set.insert(10));
/// assert!(!set.contains(&30));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    list: BlockList<T, C>,
    bounds: Option<(T, T)>,
}

impl<T, C> Extend<T> for BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(|value| {
            self.insert(value);
        });
    }
}

/// Different ways to construct a new BlockSet instance.
impl<T, C> BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Create an empty instance of BlockSet, identified by `name`. The
    /// directory is sized adaptively. `block_cap` must be non-zero.
    pub fn new<S>(name: S, cmp: C, block_cap: usize) -> BlockSet<T, C>
    where
        S: AsRef<str>,
    {
        BlockSet {
            list: BlockList::new(name, cmp, 0, block_cap),
            bounds: None,
        }
    }

    /// Create an empty instance sized for an expected total element
    /// count.
    pub fn with_expected<S>(name: S, cmp: C, expected: usize, block_cap: usize) -> BlockSet<T, C>
    where
        S: AsRef<str>,
    {
        BlockSet {
            list: BlockList::with_expected(name, cmp, expected, block_cap),
            bounds: None,
        }
    }
}

/// Maintenance API.
impl<T, C> BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Identify this instance.
    #[inline]
    pub fn id(&self) -> String {
        self.list.id()
    }

    /// Return number of elements in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Return the configured per-block element capacity.
    #[inline]
    pub fn block_capacity(&self) -> usize {
        self.list.block_capacity()
    }

    /// Return a reference to the ordering comparator supplied at
    /// construction.
    #[inline]
    pub fn comparator(&self) -> &C {
        self.list.comparator()
    }

    /// Release directory slots reserved beyond the current block count.
    pub fn trim(&mut self) {
        self.list.trim();
    }

    /// Return quickly with basic statistics.
    pub fn stats(&self) -> Stats {
        self.list.stats()
    }

    /// Validate the underlying block-list, and additionally prove the
    /// cached bounds equal to the true extremes when present. Refer to
    /// [`BlockList::validate`].
    pub fn validate(&self) -> Result<Stats, Error<T>> {
        let stats = self.list.validate()?;
        if let Some((min, max)) = &self.bounds {
            let cmp = self.list.comparator();
            match self.list.extremes() {
                Some((first, last))
                    if cmp.compare(min, first) == Ordering::Equal
                        && cmp.compare(max, last) == Ordering::Equal => {}
                _ => return Err(Error::BoundsMismatch),
            }
        }
        Ok(stats)
    }
}

/// Write operations on BlockSet instance.
impl<T, C> BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Add `value` to the instance. Return false, without structural
    /// change, if an equal element is already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.widen(&value);
        self.list.insert(value)
    }

    /// Add `value` to the instance, or hand back a clone of the stored
    /// duplicate. `None` means the value was inserted.
    pub fn insert_or_get(&mut self, value: T) -> Option<T> {
        self.widen(&value);
        self.list.insert_or_get(value)
    }

    /// Delete `value` from this instance. A successful delete drops the
    /// cached bounds, they are re-seeded only from the empty state.
    pub fn delete(&mut self, value: &T) -> bool {
        if self.list.delete(value) {
            self.bounds = None;
            true
        } else {
            false
        }
    }

    // Widening is safe even for duplicate inserts: a duplicate is equal
    // to a stored element and therefore never outside the bounds.
    fn widen(&mut self, value: &T) {
        if self.bounds.is_none() {
            if self.list.is_empty() {
                self.bounds = Some((value.clone(), value.clone()));
            }
            return;
        }
        if let Some((min, max)) = self.bounds.as_mut() {
            if self.list.comparator().compare(value, min) == Ordering::Less {
                *min = value.clone();
            } else if self.list.comparator().compare(value, max) == Ordering::Greater {
                *max = value.clone();
            }
        }
    }
}

/// Read operations on BlockSet instance.
impl<T, C> BlockSet<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Check whether an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        if self.outside(value) {
            return false;
        }
        self.list.contains(value)
    }

    /// Get the stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<T> {
        if self.outside(value) {
            return None;
        }
        self.list.get(value)
    }

    /// Return a random element from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<T> {
        self.list.random(rng)
    }

    /// Return an iterator over all elements, in ascending order.
    pub fn iter(&self) -> Iter<T> {
        self.list.iter()
    }

    /// Return an iterator over every stored element equal to `probe`
    /// under `probe_cmp`. Refer to [`BlockList::matching`].
    pub fn matching<'a, P>(&'a self, probe: &'a T, probe_cmp: P) -> Matching<'a, T, P>
    where
        P: Compare<T>,
    {
        self.list.matching(probe, probe_cmp)
    }

    /// Return an iterator over the closed interval `[lo, hi]` under the
    /// ordering comparator.
    pub fn range<'a>(&'a self, lo: &'a T, hi: &'a T) -> Between<'a, T, &'a C> {
        self.list.range(lo, hi)
    }

    /// Return an iterator over the closed interval `[lo, hi]` under
    /// `probe_cmp`. Refer to [`BlockList::range_by`].
    pub fn range_by<'a, P>(&'a self, lo: &'a T, hi: &'a T, probe_cmp: P) -> Between<'a, T, P>
    where
        P: Compare<T>,
    {
        self.list.range_by(lo, hi, probe_cmp)
    }

    fn outside(&self, value: &T) -> bool {
        match &self.bounds {
            Some((min, max)) => {
                let cmp = self.list.comparator();
                cmp.compare(value, min) == Ordering::Less
                    || cmp.compare(value, max) == Ordering::Greater
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "set_test.rs"]
mod set_test;
