/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<T>
where
    T: Clone,
{
    /// Fatal case, elements are not in strict ascending order. Carries
    /// the offending adjacent pair.
    SortError(T, T),
    /// Fatal case, the directory holds a block with no elements. Carries
    /// the block's ordinal position.
    EmptyBlock(usize),
    /// Fatal case, a block outgrew its configured capacity. The String
    /// component of this variant can be used for debugging.
    BlockOverflow(String),
    /// Fatal case, the running element count disagrees with the walked
    /// count. The String component of this variant can be used for
    /// debugging.
    CountMismatch(String),
    /// Fatal case, the set variant's cached bounds disagree with the
    /// true extremes.
    BoundsMismatch,
}
