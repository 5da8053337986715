//! Statfacts core: pure view-state machine and view-model helpers.
mod effect;
mod msg;
mod profile;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use profile::{FunFact, Profile, StatKind, StatTrivia};
pub use state::{AppState, LoadingPhase, LookupId, Stage, ViewState};
pub use update::update;
pub use view_model::{AppViewModel, FunFactView, ProfileView, Screen};
