use fm_types::Record;

use crate::lookup::Lookup;

/// Index of the first candidate satisfying `lookup`.
pub fn find_match_index(candidates: &[Record], lookup: &Lookup) -> Option<usize> {
    candidates.iter().position(|candidate| lookup.matches(candidate))
}

/// The first candidate satisfying `lookup`, in iteration order.
///
/// No ambiguity detection: if several candidates qualify, the earliest wins.
pub fn find_match<'a>(candidates: &'a [Record], lookup: &Lookup) -> Option<&'a Record> {
    find_match_index(candidates, lookup).map(|i| &candidates[i])
}

/// Index of the first candidate satisfying `lookup` that is not yet
/// consumed. `consumed` is indexed like `candidates`; indices beyond its
/// length count as unconsumed.
pub fn find_unconsumed_match(
    candidates: &[Record],
    lookup: &Lookup,
    consumed: &[bool],
) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.get(*i).copied().unwrap_or(false))
        .find(|(_, candidate)| lookup.matches(candidate))
        .map(|(i, _)| i)
}
