#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the username input.
    UsernameChanged(String),
    /// User clicked "Generate Facts".
    GenerateClicked,
    /// User clicked "Check another user".
    CheckAnotherClicked,
    /// Engine progress for the profile half of a lookup.
    LookupProgress {
        lookup_id: crate::LookupId,
        stage: crate::Stage,
    },
    /// Engine resolved the profile.
    ProfileLoaded {
        lookup_id: crate::LookupId,
        profile: crate::Profile,
    },
    /// Engine failed to resolve the profile or its repositories.
    ProfileFailed {
        lookup_id: crate::LookupId,
        reason: String,
    },
    /// Engine finished enriching the three statistics.
    FactsLoaded {
        lookup_id: crate::LookupId,
        trivia: crate::StatTrivia,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
