use std::cmp::Ordering;
use std::mem;

use rand::Rng;

use crate::block::Block;
use crate::compare::Compare;
use crate::error::Error;
use crate::fill::Fill;

/// BlockList manage a single instance of in-memory ordered set using a
/// two-level sorted block list: a directory of sorted blocks, ordered
/// by each block's minimum element.
///
/// Membership and routing run a binary search over the directory
/// followed by a binary search inside one block; insertion shifts at
/// most one block's tail. Ordering and equality are fixed by the
/// [`Compare`] value supplied at construction, elements equal under it
/// are rejected as duplicates.
///
/// ```
/// use sblist_index::{BlockList, Natural};
///
/// let mut list: BlockList<i64, Natural> = BlockList::new("myinstance", Natural, 0, 128);
/// assert!(list.insert(20));
/// assert!(list.insert(10));
/// assert!(!list.insert(10)); // duplicate
/// assert_eq!(list.iter().collect::<Vec<i64>>(), vec![10, 20]);
/// ```
#[derive(Clone)]
pub struct BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    name: String,
    blocks: Vec<Block<T>>,
    block_cap: usize,
    cmp: C,
    n_count: usize, // number of elements across all blocks.
}

impl<T, C> Extend<T> for BlockList<T, C>
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

// Routing result for one element: which block, and where inside it.
enum Slot {
    // exact member at (block, offset).
    Found(usize, usize),
    // covering block without a match, offset is the insert position.
    Inside(usize, usize),
    // strictly between blocks, directory gap position.
    Gap(usize),
}

/// Different ways to construct a new BlockList instance.
impl<T, C> BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Create an empty instance of BlockList, identified by `name`.
    /// Applications can choose unique names. `dir_hint` pre-reserves
    /// directory slots for that many blocks, it never caps the
    /// instance. `block_cap` is the maximum number of elements per
    /// block and must be non-zero.
    pub fn new<S>(name: S, cmp: C, dir_hint: usize, block_cap: usize) -> BlockList<T, C>
    where
        S: AsRef<str>,
    {
        if block_cap == 0 {
            panic!("new(): zero block capacity ? call the programmer");
        }
        BlockList {
            name: name.as_ref().to_string(),
            blocks: Vec::with_capacity(dir_hint),
            block_cap,
            cmp,
            n_count: Default::default(),
        }
    }

    /// Create an empty instance sized for an expected total element
    /// count, deriving the directory reservation from it.
    pub fn with_expected<S>(name: S, cmp: C, expected: usize, block_cap: usize) -> BlockList<T, C>
    where
        S: AsRef<str>,
    {
        if block_cap == 0 {
            panic!("with_expected(): zero block capacity ? call the programmer");
        }
        let dir_hint = (expected + block_cap - 1) / block_cap + 25;
        BlockList::new(name, cmp, dir_hint, block_cap)
    }
}

/// Maintenance API.
impl<T, C> BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Identify this instance. Applications can choose unique names
    /// while creating BlockList instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of elements in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the configured per-block element capacity.
    #[inline]
    pub fn block_capacity(&self) -> usize {
        self.block_cap
    }

    /// Return a reference to the ordering comparator supplied at
    /// construction.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Release directory slots reserved beyond the current block
    /// count. Purely a memory measure, no observable effect on
    /// subsequent operations.
    pub fn trim(&mut self) {
        self.blocks.shrink_to_fit();
    }

    /// Return quickly with basic statistics, the fill histogram is only
    /// populated by [`BlockList::validate`].
    pub fn stats(&self) -> Stats {
        Stats::new(
            self.n_count,
            self.blocks.len(),
            self.block_cap,
            mem::size_of::<T>(),
        )
    }

    /// Validate the block-list with following rules:
    ///
    /// * Elements are in strict ascending order, within and across
    ///   blocks.
    /// * Every block is non-empty and within capacity.
    /// * The running element count matches the walked count.
    ///
    /// Additionally return full statistics on the instance, including
    /// the block occupancy histogram. Refer to [`Stats`] for more
    /// information.
    pub fn validate(&self) -> Result<Stats, Error<T>> {
        let mut walked = 0;
        let mut fill = Fill::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if block.is_empty() {
                return Err(Error::EmptyBlock(i));
            }
            if block.len() > self.block_cap {
                let msg = format!("block {} size {} cap {}", i, block.len(), self.block_cap);
                return Err(Error::BlockOverflow(msg));
            }
            for pair in block.values().windows(2) {
                if self.cmp.compare(&pair[0], &pair[1]) != Ordering::Less {
                    return Err(Error::SortError(pair[0].clone(), pair[1].clone()));
                }
            }
            if i > 0 {
                let prev = self.blocks[i - 1].max();
                if self.cmp.compare(prev, block.min()) != Ordering::Less {
                    return Err(Error::SortError(prev.clone(), block.min().clone()));
                }
            }
            walked += block.len();
            fill.sample((block.len() * 100) / self.block_cap);
        }
        if walked != self.n_count {
            let msg = format!("stored {} walked {}", self.n_count, walked);
            return Err(Error::CountMismatch(msg));
        }
        let mut stats = self.stats();
        stats.set_fill(fill);
        Ok(stats)
    }
}

/// Write operations on BlockList instance.
impl<T, C> BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Add `value` to the instance. Return false, without structural
    /// change, if an element equal under the ordering comparator is
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        match self.locate(&value) {
            Slot::Found(_, _) => false,
            slot => {
                self.place(value, slot);
                true
            }
        }
    }

    /// Add `value` to the instance, or hand back a clone of the stored
    /// duplicate. `None` means the value was inserted. Useful when the
    /// element type has identity beyond its ordering.
    pub fn insert_or_get(&mut self, value: T) -> Option<T> {
        match self.locate(&value) {
            Slot::Found(i, j) => Some(self.blocks[i].values()[j].clone()),
            slot => {
                self.place(value, slot);
                None
            }
        }
    }

    /// Delete `value` from this instance. If no equal element is
    /// present, then delete is effectively a no-op. A block left empty
    /// is removed from the directory.
    pub fn delete(&mut self, value: &T) -> bool {
        match self.locate(value) {
            Slot::Found(i, j) => {
                self.blocks[i].remove_at(j);
                if self.blocks[i].is_empty() {
                    self.blocks.remove(i);
                }
                self.n_count -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Read operations on BlockList instance.
impl<T, C> BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    /// Check whether an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        matches!(self.locate(value), Slot::Found(_, _))
    }

    /// Get the stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<T> {
        match self.locate(value) {
            Slot::Found(i, j) => Some(self.blocks[i].values()[j].clone()),
            _ => None,
        }
    }

    /// Return a random element from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<T> {
        if self.n_count == 0 {
            return None;
        }
        let mut at = rng.gen::<usize>() % self.n_count;
        for block in self.blocks.iter() {
            if at < block.len() {
                return Some(block.values()[at].clone());
            }
            at -= block.len();
        }
        None
    }

    /// Return an iterator over all elements in this instance, in
    /// ascending order.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            blocks: &self.blocks,
            block: 0,
            off: 0,
        }
    }

    /// Return an iterator over every stored element equal to `probe`
    /// under `probe_cmp`, in ascending order. `probe_cmp` must be a
    /// consistent coarsening of the ordering comparator, see
    /// [`Compare`].
    pub fn matching<'a, P>(&'a self, probe: &'a T, probe_cmp: P) -> Matching<'a, T, P>
    where
        P: Compare<T>,
    {
        let (block, off) = self.start_at(probe, &probe_cmp);
        Matching {
            blocks: &self.blocks,
            probe,
            cmp: probe_cmp,
            block,
            off,
        }
    }

    /// Return an iterator over every stored element in the closed
    /// interval `[lo, hi]` under the ordering comparator. An interval
    /// with `hi < lo` yields nothing.
    pub fn range<'a>(&'a self, lo: &'a T, hi: &'a T) -> Between<'a, T, &'a C> {
        self.range_by(lo, hi, &self.cmp)
    }

    /// Return an iterator over every stored element in the closed
    /// interval `[lo, hi]` under `probe_cmp`, a consistent coarsening
    /// of the ordering comparator.
    pub fn range_by<'a, P>(&'a self, lo: &'a T, hi: &'a T, probe_cmp: P) -> Between<'a, T, P>
    where
        P: Compare<T>,
    {
        let (block, off) = self.start_at(lo, &probe_cmp);
        Between {
            blocks: &self.blocks,
            hi,
            cmp: probe_cmp,
            block,
            off,
        }
    }
}

impl<T, C> BlockList<T, C>
where
    T: Clone,
    C: Compare<T>,
{
    fn locate(&self, value: &T) -> Slot {
        let found = self
            .blocks
            .binary_search_by(|block| block.cmp_covering(value, &self.cmp));
        match found {
            Ok(i) => match self.blocks[i].search(value, &self.cmp) {
                Ok(j) => Slot::Found(i, j),
                Err(pos) => Slot::Inside(i, pos),
            },
            Err(p) => Slot::Gap(p),
        }
    }

    // Admit a genuinely new element at a previously located slot.
    fn place(&mut self, value: T, slot: Slot) {
        match slot {
            Slot::Found(_, _) => {
                panic!("place(): placing a duplicate ? call the programmer")
            }
            Slot::Inside(i, pos) => {
                if self.blocks[i].len() < self.block_cap {
                    self.blocks[i].insert_at(pos, value);
                } else {
                    // Full covering block: halve it, route the element
                    // into whichever half now covers it.
                    let upper = self.blocks[i].split(self.block_cap);
                    self.blocks.insert(i + 1, upper);
                    let i = match self.cmp.compare(&value, self.blocks[i + 1].min()) {
                        Ordering::Less => i,
                        _ => i + 1,
                    };
                    let pos = match self.blocks[i].search(&value, &self.cmp) {
                        Err(pos) => pos,
                        Ok(_) => panic!("place(): duplicate past split ? call the programmer"),
                    };
                    self.blocks[i].insert_at(pos, value);
                }
            }
            Slot::Gap(p) => {
                if self.blocks.is_empty() {
                    self.blocks.push(Block::seed(self.block_cap, value));
                } else {
                    // The element falls strictly between two blocks (or
                    // before the first, or after the last). It becomes
                    // the left neighbour's new maximum, except at the
                    // front where it becomes the first block's new
                    // minimum. A full neighbour admits a fresh block at
                    // the gap instead.
                    let nbr = if p == 0 { 0 } else { p - 1 };
                    if self.blocks[nbr].len() < self.block_cap {
                        let pos = if p == 0 { 0 } else { self.blocks[nbr].len() };
                        self.blocks[nbr].insert_at(pos, value);
                    } else {
                        self.blocks.insert(p, Block::seed(self.block_cap, value));
                    }
                }
            }
        }
        self.n_count += 1;
    }

    // First cursor position whose element is not below `value` under
    // `cmp`. Both halves are partition points, blocks are only scanned
    // logarithmically.
    fn start_at<P>(&self, value: &T, cmp: &P) -> (usize, usize)
    where
        P: Compare<T>,
    {
        let block = self
            .blocks
            .partition_point(|b| b.cmp_to_value(value, cmp) == Ordering::Less);
        let off = match self.blocks.get(block) {
            Some(b) => b
                .values()
                .partition_point(|e| cmp.compare(e, value) == Ordering::Less),
            None => 0,
        };
        (block, off)
    }

    pub(crate) fn extremes(&self) -> Option<(&T, &T)> {
        match (self.blocks.first(), self.blocks.last()) {
            (Some(first), Some(last)) => Some((first.min(), last.max())),
            _ => None,
        }
    }
}

/// Lazy forward iterator over all elements, in ascending order.
pub struct Iter<'a, T>
where
    T: Clone,
{
    blocks: &'a [Block<T>],
    block: usize,
    off: usize,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.block < self.blocks.len() {
            let values = self.blocks[self.block].values();
            if self.off < values.len() {
                let item = values[self.off].clone();
                self.off += 1;
                return Some(item);
            }
            self.block += 1;
            self.off = 0;
        }
        None
    }
}

/// Lazy forward iterator over elements equal to a probe under a
/// query-time comparator. Terminates at the first non-match past the
/// matching run.
pub struct Matching<'a, T, P>
where
    T: Clone,
    P: Compare<T>,
{
    blocks: &'a [Block<T>],
    probe: &'a T,
    cmp: P,
    block: usize,
    off: usize,
}

impl<'a, T, P> Iterator for Matching<'a, T, P>
where
    T: Clone,
    P: Compare<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.block < self.blocks.len() {
            let values = self.blocks[self.block].values();
            if self.off == values.len() {
                self.block += 1;
                self.off = 0;
                continue;
            }
            let e = &values[self.off];
            if self.cmp.compare(e, self.probe) == Ordering::Equal {
                self.off += 1;
                return Some(e.clone());
            }
            // first non-match ends the run.
            self.block = self.blocks.len();
        }
        None
    }
}

/// Lazy forward iterator over the closed interval `[lo, hi]`, under
/// either the ordering comparator or a query-time coarsening of it.
/// Terminates at the first element above `hi`.
pub struct Between<'a, T, P>
where
    T: Clone,
    P: Compare<T>,
{
    blocks: &'a [Block<T>],
    hi: &'a T,
    cmp: P,
    block: usize,
    off: usize,
}

impl<'a, T, P> Iterator for Between<'a, T, P>
where
    T: Clone,
    P: Compare<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.block < self.blocks.len() {
            let values = self.blocks[self.block].values();
            if self.off == values.len() {
                self.block += 1;
                self.off = 0;
                continue;
            }
            let e = &values[self.off];
            if self.cmp.compare(e, self.hi) != Ordering::Greater {
                self.off += 1;
                return Some(e.clone());
            }
            self.block = self.blocks.len();
        }
        None
    }
}

/// Statistics on a block-list instance. Serves two purpose:
///
/// * To get partial but quick statistics via the `stats` method.
/// * To get full statistics via the `validate` method.
#[derive(Default)]
pub struct Stats {
    entries: usize,
    blocks: usize,
    block_cap: usize,
    value_size: usize,
    fill: Option<Fill>,
}

impl Stats {
    fn new(entries: usize, blocks: usize, block_cap: usize, value_size: usize) -> Stats {
        Stats {
            entries,
            blocks,
            block_cap,
            value_size,
            fill: Default::default(),
        }
    }

    #[inline]
    fn set_fill(&mut self, fill: Fill) {
        self.fill = Some(fill)
    }

    /// Return number of elements in the instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return number of blocks in the directory.
    #[inline]
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Return the configured per-block element capacity.
    #[inline]
    pub fn block_cap(&self) -> usize {
        self.block_cap
    }

    /// Return the in-memory size of one element. EG:
    ///
    /// ```
    /// use sblist_index::{BlockList, Natural};
    /// let list: BlockList<u64, Natural> = BlockList::new("myinstance", Natural, 0, 128);
    ///
    /// // size of one u64 element
    /// assert_eq!(list.stats().value_size(), 8);
    /// ```
    #[inline]
    pub fn value_size(&self) -> usize {
        self.value_size
    }

    /// Return [`Fill`] statistics.
    pub fn fill(&self) -> Option<Fill> {
        match self.fill.as_ref() {
            Some(fill) if fill.samples() > 0 => Some(fill.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;
