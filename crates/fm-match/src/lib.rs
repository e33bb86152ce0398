//! Row matching for factmerge.
//!
//! Finds the record, within a candidate set, whose values agree with a
//! lookup of field names. Matching is first-match-wins in candidate order
//! with no ambiguity detection: when two candidates satisfy a lookup, the
//! earlier one is returned. Callers order candidates to express precedence.

pub mod identity;
pub mod lookup;
pub mod matcher;

pub use identity::{identity_group, identity_lookup, partial_lookup};
pub use lookup::Lookup;
pub use matcher::{find_match, find_match_index, find_unconsumed_match};
