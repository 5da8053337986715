use std::fmt;

/// Public statistics for one account, as resolved by a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub repository_count: u64,
    pub follower_count: u64,
    pub star_count: u64,
}

impl Profile {
    pub fn count(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::Repositories => self.repository_count,
            StatKind::Followers => self.follower_count,
            StatKind::Stars => self.star_count,
        }
    }

    /// Counts in `StatKind::ALL` order.
    pub fn counts(&self) -> Vec<u64> {
        StatKind::ALL.iter().map(|kind| self.count(*kind)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Repositories,
    Followers,
    Stars,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Repositories, StatKind::Followers, StatKind::Stars];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Repositories => "Repositories",
            StatKind::Followers => "Followers",
            StatKind::Stars => "Stars",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One trivia sentence per tracked statistic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatTrivia {
    pub repositories: String,
    pub followers: String,
    pub stars: String,
}

impl StatTrivia {
    pub fn get(&self, kind: StatKind) -> &str {
        match kind {
            StatKind::Repositories => &self.repositories,
            StatKind::Followers => &self.followers,
            StatKind::Stars => &self.stars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunFact {
    pub kind: StatKind,
    pub count: u64,
    pub trivia: String,
}

impl FunFact {
    /// Builds the full fact list for `profile`, one entry per `StatKind::ALL`.
    pub fn for_profile(profile: &Profile, trivia: &StatTrivia) -> Vec<FunFact> {
        StatKind::ALL
            .iter()
            .map(|&kind| FunFact {
                kind,
                count: profile.count(kind),
                trivia: trivia.get(kind).to_string(),
            })
            .collect()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn text(&self) -> String {
        let n = self.count;
        let trivia = &self.trivia;
        match self.kind {
            StatKind::Repositories => format!("With {n} repositories, {trivia}"),
            StatKind::Followers => {
                format!("Having {n} followers is impressive, considering {trivia}")
            }
            StatKind::Stars => format!("Your {n} stars shine bright because {trivia}"),
        }
    }
}
