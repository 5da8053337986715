use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Engine replies carry the lookup id they were issued for; replies for any
/// lookup other than the one currently loading are dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UsernameChanged(input) => {
            state.set_username_input(input);
            Vec::new()
        }
        Msg::GenerateClicked => match state.begin_lookup() {
            Some((lookup_id, username)) => vec![Effect::FetchProfile {
                lookup_id,
                username,
            }],
            None => Vec::new(),
        },
        Msg::CheckAnotherClicked => {
            state.reset();
            Vec::new()
        }
        Msg::LookupProgress { lookup_id, stage } => {
            state.apply_stage(lookup_id, stage);
            Vec::new()
        }
        Msg::ProfileLoaded { lookup_id, profile } => match state.apply_profile(lookup_id, profile)
        {
            Some(counts) => vec![Effect::FetchFacts { lookup_id, counts }],
            None => Vec::new(),
        },
        Msg::ProfileFailed { lookup_id, reason } => {
            state.apply_failure(lookup_id, reason);
            Vec::new()
        }
        Msg::FactsLoaded { lookup_id, trivia } => {
            state.apply_facts(lookup_id, &trivia);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
