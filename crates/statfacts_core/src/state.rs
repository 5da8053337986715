use crate::view_model::{AppViewModel, FunFactView, ProfileView, Screen};
use crate::{FunFact, Profile};

pub type LookupId = u64;

/// Progress of the profile half of a lookup, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Queued,
    FetchingProfile,
    FetchingRepositories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingPhase {
    Profile { stage: Stage },
    Facts { profile: Profile },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    AwaitingInput,
    Loading {
        lookup_id: LookupId,
        username: String,
        phase: LoadingPhase,
    },
    Results {
        profile: Profile,
        facts: Vec<FunFact>,
    },
    Failed {
        username: String,
        reason: String,
    },
}

impl ViewState {
    pub fn screen(&self) -> Screen {
        match self {
            ViewState::AwaitingInput => Screen::InputForm,
            ViewState::Loading { .. } => Screen::Loading,
            ViewState::Results { .. } => Screen::Results,
            ViewState::Failed { .. } => Screen::Failed,
        }
    }

    /// Generation may start only when no lookup is in flight and no results are shown.
    pub fn accepts_generate(&self) -> bool {
        matches!(self, ViewState::AwaitingInput | ViewState::Failed { .. })
    }

    pub(crate) fn in_flight(&self) -> Option<LookupId> {
        match self {
            ViewState::Loading { lookup_id, .. } => Some(*lookup_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    username_input: String,
    view: ViewState,
    next_lookup_id: LookupId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_lookup_id: 1,
            ..Self::default()
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn view(&self) -> AppViewModel {
        let (profile, facts) = match &self.view {
            ViewState::Results { profile, facts } => (
                Some(ProfileView::from(profile)),
                facts.iter().map(FunFactView::from).collect(),
            ),
            _ => (None, Vec::new()),
        };
        AppViewModel {
            screen: self.view.screen(),
            username_input: self.username_input.clone(),
            generate_enabled: self.view.accepts_generate(),
            status: self.status_text(),
            calendar_username: profile.as_ref().map(|p| p.username.clone()),
            profile,
            facts,
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_username_input(&mut self, input: String) {
        if self.username_input != input {
            self.username_input = input;
            self.mark_dirty();
        }
    }

    /// Moves to `Loading` for the trimmed input and returns the new lookup,
    /// or `None` when the input is blank or a lookup cannot start now.
    pub(crate) fn begin_lookup(&mut self) -> Option<(LookupId, String)> {
        if !self.view.accepts_generate() {
            return None;
        }
        let username = self.username_input.trim();
        if username.is_empty() {
            return None;
        }
        let username = username.to_string();
        let lookup_id = self.next_lookup_id.max(1);
        self.next_lookup_id = lookup_id + 1;
        self.view = ViewState::Loading {
            lookup_id,
            username: username.clone(),
            phase: LoadingPhase::Profile {
                stage: Stage::Queued,
            },
        };
        self.mark_dirty();
        Some((lookup_id, username))
    }

    pub(crate) fn apply_stage(&mut self, id: LookupId, new_stage: Stage) {
        if let ViewState::Loading {
            lookup_id,
            phase: LoadingPhase::Profile { stage },
            ..
        } = &mut self.view
        {
            if *lookup_id == id && *stage != new_stage {
                *stage = new_stage;
                self.dirty = true;
            }
        }
    }

    /// Stores the fetched profile while facts are pending. Returns the counts to enrich.
    pub(crate) fn apply_profile(&mut self, id: LookupId, profile: Profile) -> Option<Vec<u64>> {
        match &mut self.view {
            ViewState::Loading {
                lookup_id, phase, ..
            } if *lookup_id == id && matches!(phase, LoadingPhase::Profile { .. }) => {
                let counts = profile.counts();
                *phase = LoadingPhase::Facts { profile };
                self.dirty = true;
                Some(counts)
            }
            _ => None,
        }
    }

    pub(crate) fn apply_failure(&mut self, id: LookupId, reason: String) {
        if self.view.in_flight() != Some(id) {
            return;
        }
        if let ViewState::Loading { username, .. } = std::mem::take(&mut self.view) {
            self.view = ViewState::Failed { username, reason };
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_facts(&mut self, id: LookupId, trivia: &crate::StatTrivia) {
        let profile = match &self.view {
            ViewState::Loading {
                lookup_id,
                phase: LoadingPhase::Facts { profile },
                ..
            } if *lookup_id == id => profile.clone(),
            _ => return,
        };
        let facts = FunFact::for_profile(&profile, trivia);
        self.view = ViewState::Results { profile, facts };
        self.mark_dirty();
    }

    /// Clears results or a failure and returns to the input form.
    pub(crate) fn reset(&mut self) {
        if matches!(self.view, ViewState::Results { .. } | ViewState::Failed { .. }) {
            self.view = ViewState::AwaitingInput;
            self.mark_dirty();
        }
    }

    fn status_text(&self) -> String {
        match &self.view {
            ViewState::AwaitingInput => "Let's see Facts about your Stats".to_string(),
            ViewState::Loading {
                username, phase, ..
            } => match phase {
                LoadingPhase::Profile { stage } => match stage {
                    Stage::Queued => format!("Looking up {username}..."),
                    Stage::FetchingProfile => format!("Fetching profile for {username}..."),
                    Stage::FetchingRepositories => {
                        format!("Counting stars across {username}'s repositories...")
                    }
                },
                LoadingPhase::Facts { .. } => format!("Generating facts for {username}..."),
            },
            ViewState::Results { profile, .. } => format!("Stats for {}", profile.username),
            ViewState::Failed { username, reason } => {
                format!("No results for {username} ({reason}). Try again.")
            }
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
