use serde::{Deserialize, Serialize};

/// A row of the backend `User` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub highest_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserRecord {
    pub fn score(&self) -> u32 {
        self.highest_score.unwrap_or(0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewUserRequest {
    pub username: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HighScorePatch {
    pub highest_score: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UsernameRow {
    pub username: String,
}

/// Users ordered by best score, highest first.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Leaderboard {
    pub entries: Vec<UserRecord>,
}

impl Leaderboard {
    pub fn from_users(mut users: Vec<UserRecord>) -> Self {
        // Stable sort keeps backend order among equal scores.
        users.sort_by(|a, b| b.score().cmp(&a.score()));
        Self { entries: users }
    }

    /// 1-based rank of `username`, if present.
    pub fn rank_of(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|u| u.username == username)
            .map(|i| i + 1)
    }

    pub fn top(&self, n: usize) -> &[UserRecord] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
