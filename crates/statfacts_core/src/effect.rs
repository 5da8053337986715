use crate::LookupId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Resolve the profile and star total for `username`.
    FetchProfile { lookup_id: LookupId, username: String },
    /// Fetch one trivia sentence per count, in `StatKind::ALL` order.
    FetchFacts { lookup_id: LookupId, counts: Vec<u64> },
}
