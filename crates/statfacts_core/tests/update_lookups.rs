use std::sync::Once;

use pretty_assertions::assert_eq;
use statfacts_core::{update, AppState, Effect, Msg, Profile, Screen, StatTrivia, ViewState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(facts_logging::initialize_for_tests);
}

fn submit_username(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UsernameChanged(input.to_string()));
    update(state, Msg::GenerateClicked)
}

fn profile(username: &str, repos: u64, followers: u64, stars: u64) -> Profile {
    Profile {
        username: username.to_string(),
        avatar_url: format!("https://avatars.example/{username}"),
        profile_url: format!("https://github.com/{username}"),
        repository_count: repos,
        follower_count: followers,
        star_count: stars,
    }
}

fn fallback_trivia(counts: &[u64]) -> StatTrivia {
    let text = |n: u64| format!("No interesting fact found for number {n}");
    StatTrivia {
        repositories: text(counts[0]),
        followers: text(counts[1]),
        stars: text(counts[2]),
    }
}

/// Drives a full lookup, answering effects the way the engine would.
fn run_lookup(state: AppState, username: &str, fetched: Profile) -> AppState {
    let (state, effects) = submit_username(state, username);
    let lookup_id = match effects.as_slice() {
        [Effect::FetchProfile { lookup_id, .. }] => *lookup_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, effects) = update(
        state,
        Msg::ProfileLoaded {
            lookup_id,
            profile: fetched,
        },
    );
    let counts = match effects.as_slice() {
        [Effect::FetchFacts { counts, .. }] => counts.clone(),
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::FactsLoaded {
            lookup_id,
            trivia: fallback_trivia(&counts),
        },
    );
    state
}

#[test]
fn check_another_user_clears_everything() {
    init_logging();
    let state = run_lookup(AppState::new(), "octocat", profile("octocat", 8, 500, 10));
    assert_eq!(state.view().screen, Screen::Results);

    let (state, effects) = update(state, Msg::CheckAnotherClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view_state(), &ViewState::AwaitingInput);
    let view = state.view();
    assert!(view.profile.is_none());
    assert!(view.facts.is_empty());
    assert!(view.calendar_username.is_none());
    assert!(view.generate_enabled);
    assert_eq!(view.username_input, "octocat");
}

#[test]
fn resubmitting_after_reset_reproduces_equivalent_results() {
    init_logging();
    let first = run_lookup(AppState::new(), "octocat", profile("octocat", 8, 500, 10));
    let first_view = first.view();

    let (state, _) = update(first, Msg::CheckAnotherClicked);
    let second = run_lookup(state, "octocat", profile("octocat", 8, 500, 10));
    let second_view = second.view();

    assert_eq!(second_view.profile, first_view.profile);
    assert_eq!(second_view.facts, first_view.facts);
}

#[test]
fn fallback_trivia_still_yields_three_facts() {
    init_logging();
    let state = run_lookup(AppState::new(), "octocat", profile("octocat", 0, 0, 0));
    let view = state.view();

    assert_eq!(view.facts.len(), 3);
    assert_eq!(
        view.facts[1].text,
        "Having 0 followers is impressive, considering No interesting fact found for number 0"
    );
}

#[test]
fn stale_replies_from_previous_lookup_are_ignored() {
    init_logging();
    let (state, _) = submit_username(AppState::new(), "first");
    let (state, _) = update(
        state,
        Msg::ProfileFailed {
            lookup_id: 1,
            reason: "network error".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchProfile {
            lookup_id: 2,
            username: "first".to_string(),
        }]
    );
    let before = state.view_state().clone();

    // A late success for lookup 1 must not leak into lookup 2.
    let (state, effects) = update(
        state,
        Msg::ProfileLoaded {
            lookup_id: 1,
            profile: profile("first", 1, 1, 1),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view_state(), &before);

    let (state, effects) = update(
        state,
        Msg::FactsLoaded {
            lookup_id: 1,
            trivia: fallback_trivia(&[1, 1, 1]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view_state(), &before);
}

#[test]
fn facts_before_profile_are_ignored() {
    init_logging();
    let (state, _) = submit_username(AppState::new(), "octocat");
    let before = state.view_state().clone();

    let (state, _) = update(
        state,
        Msg::FactsLoaded {
            lookup_id: 1,
            trivia: fallback_trivia(&[1, 2, 3]),
        },
    );

    assert_eq!(state.view_state(), &before);
}

#[test]
fn check_another_is_noop_while_loading() {
    init_logging();
    let (state, _) = submit_username(AppState::new(), "octocat");
    let before = state.clone();

    let (state, effects) = update(state, Msg::CheckAnotherClicked);

    assert!(effects.is_empty());
    assert_eq!(state, before);
}
