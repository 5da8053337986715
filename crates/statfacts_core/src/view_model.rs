use crate::{FunFact, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    InputForm,
    Loading,
    Results,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub username_input: String,
    pub generate_enabled: bool,
    pub status: String,
    pub profile: Option<ProfileView>,
    pub facts: Vec<FunFactView>,
    /// Username handed to the contribution calendar, present only with results.
    pub calendar_username: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub repositories: u64,
    pub followers: u64,
    pub stars: u64,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            avatar_url: profile.avatar_url.clone(),
            profile_url: profile.profile_url.clone(),
            repositories: profile.repository_count,
            followers: profile.follower_count,
            stars: profile.star_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunFactView {
    pub label: String,
    pub count: u64,
    pub text: String,
}

impl From<&FunFact> for FunFactView {
    fn from(fact: &FunFact) -> Self {
        Self {
            label: fact.label().to_string(),
            count: fact.count,
            text: fact.text(),
        }
    }
}
