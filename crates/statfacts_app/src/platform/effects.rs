use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use facts_logging::{facts_error, facts_info, facts_warn};
use statfacts_core::{Effect, LookupId, Msg, Profile, Stage, StatTrivia};
use statfacts_engine::{
    fallback_fact, EngineError, EngineEvent, EngineHandle, EngineSettings, GithubProfile,
};

use super::app::Inbox;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings, inbox: mpsc::Sender<Inbox>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(inbox);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProfile {
                    lookup_id,
                    username,
                } => {
                    facts_info!("FetchProfile lookup_id={} username={}", lookup_id, username);
                    self.engine.fetch_profile(lookup_id, username);
                }
                Effect::FetchFacts { lookup_id, counts } => {
                    facts_info!("FetchFacts lookup_id={} counts={:?}", lookup_id, counts);
                    self.engine.fetch_facts(lookup_id, counts);
                }
            }
        }
    }

    fn spawn_event_loop(&self, inbox: mpsc::Sender<Inbox>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                continue;
            };
            if inbox.send(Inbox::Msg(map_event(event))).is_err() {
                break;
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { lookup_id, stage } => Msg::LookupProgress {
            lookup_id,
            stage: map_stage(stage),
        },
        EngineEvent::ProfileFetched { lookup_id, result } => match result {
            Ok(profile) => Msg::ProfileLoaded {
                lookup_id,
                profile: map_profile(profile),
            },
            Err(err) => {
                facts_warn!("Lookup {} failed: {}", lookup_id, err);
                Msg::ProfileFailed {
                    lookup_id,
                    reason: err.kind.to_string(),
                }
            }
        },
        EngineEvent::FactsFetched {
            lookup_id,
            counts,
            facts,
        } => Msg::FactsLoaded {
            lookup_id,
            trivia: map_trivia(lookup_id, &counts, facts),
        },
    }
}

fn map_stage(stage: statfacts_engine::Stage) -> Stage {
    match stage {
        statfacts_engine::Stage::FetchingProfile => Stage::FetchingProfile,
        statfacts_engine::Stage::FetchingRepositories => Stage::FetchingRepositories,
    }
}

fn map_profile(profile: GithubProfile) -> Profile {
    Profile {
        username: profile.login,
        avatar_url: profile.avatar_url,
        profile_url: profile.html_url,
        repository_count: profile.public_repos,
        follower_count: profile.followers,
        star_count: profile.stars,
    }
}

/// Missing entries degrade to the fallback text for their count.
fn map_trivia(lookup_id: LookupId, counts: &[u64], facts: Vec<String>) -> StatTrivia {
    if facts.len() != 3 || counts.len() != 3 {
        facts_error!(
            "Lookup {} returned {} facts for {} counts, expected 3",
            lookup_id,
            facts.len(),
            counts.len()
        );
    }
    let mut facts = facts.into_iter();
    let mut next = |index: usize| {
        facts
            .next()
            .unwrap_or_else(|| fallback_fact(counts.get(index).copied().unwrap_or_default()))
    };
    StatTrivia {
        repositories: next(0),
        followers: next(1),
        stars: next(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statfacts_engine::{FailureKind, FetchError};

    #[test]
    fn profile_failure_maps_to_reason() {
        let msg = map_event(EngineEvent::ProfileFetched {
            lookup_id: 4,
            result: Err(FetchError {
                kind: FailureKind::NotFound,
                message: String::new(),
            }),
        });
        assert_eq!(
            msg,
            Msg::ProfileFailed {
                lookup_id: 4,
                reason: "user not found".to_string(),
            }
        );
    }

    #[test]
    fn facts_map_in_stat_order() {
        let msg = map_event(EngineEvent::FactsFetched {
            lookup_id: 2,
            counts: vec![8, 500, 10],
            facts: vec!["r".to_string(), "f".to_string(), "s".to_string()],
        });
        assert_eq!(
            msg,
            Msg::FactsLoaded {
                lookup_id: 2,
                trivia: StatTrivia {
                    repositories: "r".to_string(),
                    followers: "f".to_string(),
                    stars: "s".to_string(),
                },
            }
        );
    }

    #[test]
    fn short_fact_list_falls_back_per_count() {
        let msg = map_event(EngineEvent::FactsFetched {
            lookup_id: 5,
            counts: vec![8, 500, 10],
            facts: vec!["r".to_string()],
        });
        assert_eq!(
            msg,
            Msg::FactsLoaded {
                lookup_id: 5,
                trivia: StatTrivia {
                    repositories: "r".to_string(),
                    followers: "No interesting fact found for number 500".to_string(),
                    stars: "No interesting fact found for number 10".to_string(),
                },
            }
        );
    }

    #[test]
    fn profile_fields_are_renamed() {
        let msg = map_event(EngineEvent::ProfileFetched {
            lookup_id: 1,
            result: Ok(GithubProfile {
                login: "octocat".to_string(),
                avatar_url: "a".to_string(),
                html_url: "h".to_string(),
                public_repos: 8,
                followers: 500,
                stars: 10,
            }),
        });
        let Msg::ProfileLoaded { profile, .. } = msg else {
            panic!("expected ProfileLoaded");
        };
        assert_eq!(profile.username, "octocat");
        assert_eq!(profile.profile_url, "h");
        assert_eq!(profile.counts(), vec![8, 500, 10]);
    }
}
