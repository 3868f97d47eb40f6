use std::cmp::Ordering;

/// Three-way ordering contract. A [`Compare`] value injected at
/// construction fixes both the ordering and the equality of a container
/// instance; a second, coarser [`Compare`] value may be supplied per
/// query to drive prefix and interval matching.
///
/// A query-time comparator must be a consistent coarsening of the
/// construction-time one: whenever the ordering comparator reports
/// `Equal` the probe comparator must report `Equal` as well, and probe
/// results must be non-decreasing along the container's order.
pub trait Compare<T> {
    /// Compare `a` against `b`, with the usual sign convention.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<'a, T, C> Compare<T> for &'a C
where
    C: Compare<T> + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (**self).compare(a, b)
    }
}

/// Natural ordering, for element types that are [`Ord`].
#[derive(Clone, Copy, Default)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapt a plain closure into a [`Compare`] value.
///
/// ```
/// use std::cmp::Ordering;
/// use sblist_index::FnCmp;
/// use sblist_index::Compare;
///
/// let by_len = FnCmp(|a: &String, b: &String| a.len().cmp(&b.len()));
/// assert_eq!(by_len.compare(&"ab".to_string(), &"xyz".to_string()), Ordering::Less);
/// ```
#[derive(Clone, Copy)]
pub struct FnCmp<F>(pub F);

impl<T, F> Compare<T> for FnCmp<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}
